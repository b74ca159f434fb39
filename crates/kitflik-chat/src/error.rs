//! Error types for kitflik-chat

use thiserror::Error;

/// Result type alias using kitflik-chat Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the prompt endpoint.
///
/// Every variant is treated the same way by the conversation: the failure is
/// swallowed and a fixed fallback reply is appended to the log. The variants
/// exist for logging, not for recovery.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("endpoint returned status {code}")]
    Status { code: u16 },
}
