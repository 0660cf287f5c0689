//! Docrelay API Library
//!
//! This crate provides the HTTP handlers, form actions, and application setup of the
//! document relay.

mod api_doc;
mod handlers;
mod middleware;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use api_doc::ApiDoc;
pub use error::{ErrorResponse, HttpAppError};
