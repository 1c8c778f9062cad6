//! Error types for setting up backend clients
//!
//! Failures of individual calls are not errors of this type: they are
//! classified into [`fleet_core::CallFailure`].

use thiserror::Error;

/// Result type alias for client construction
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while building a client or test server
#[derive(Error, Debug)]
pub enum ClientError {
    /// The underlying HTTP client could not be built
    #[error("HTTP client setup failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
