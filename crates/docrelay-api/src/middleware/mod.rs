pub mod body_limit;

pub use body_limit::body_limit_middleware;
