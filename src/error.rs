//! Error types for the uPB browser.

use upb_services::ServiceError;

/// Top-level error type for the browser.
///
/// Service fetch failures never surface here; they are rendered into
/// replies by the adapters. These errors cover startup and terminal I/O.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    /// Configuration file missing, unreadable, or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Service layer could not be initialised.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// Wireless interface refused an operation.
    #[error("network error: {0}")]
    Network(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, BrowserError>;
