//! Request extractors and middleware.

pub mod auth;
pub mod extract;
pub mod metrics;
pub mod request_path;
