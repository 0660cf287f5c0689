//! Validation modules

pub mod file;

pub use file::{
    format_file_size, is_allowed_content_type, validate_file, validate_upload,
    FILE_TOO_LARGE_MESSAGE, SCHEMA_TOO_LARGE_MESSAGE, UNSUPPORTED_TYPE_MESSAGE,
};
