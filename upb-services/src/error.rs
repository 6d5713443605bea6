//! Error types for the upb-services crate.
//!
//! Adapters never return these to the caller; they are rendered into the
//! body of an error [`Reply`](crate::types::Reply) at the adapter boundary.
//! Messages are stable and safe to print.

/// Errors that can occur while talking to an upstream service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The upstream answered with a failure status (>= 400).
    #[error("HTTP status {0}: {1}")]
    Status(u16, String),

    /// The body was not JSON, or not the shape the adapter expects.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid endpoint configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for upb-services results.
pub type Result<T> = std::result::Result<T, ServiceError>;
