//! Error types for the skip selection plugin.
//!
//! [`SkipHireError`] covers every failure the plugin can surface, from a
//! failed offerings request to a bad configuration value. None of them is
//! fatal: fetch errors are shown with a retry hint, configuration errors fall
//! back to defaults.

use thiserror::Error;

/// The main error type for skip selection operations.
///
/// The three fetch variants ([`Transport`](Self::Transport),
/// [`HttpStatus`](Self::HttpStatus) and
/// [`MalformedPayload`](Self::MalformedPayload)) all end up in the same
/// user-visible error panel; their `Display` output is the message shown.
///
/// # Examples
///
/// ```
/// use skiphire::SkipHireError;
///
/// let err = SkipHireError::HttpStatus(500);
/// assert_eq!(err.to_string(), "HTTP error! status: 500");
/// ```
#[derive(Debug, Error)]
pub enum SkipHireError {
    /// The request never produced an HTTP response.
    #[error("Failed to fetch skip data: {0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    /// The response body is not a list of well-formed offerings.
    #[error("Malformed skip data: {0}")]
    MalformedPayload(String),

    /// Configuration is invalid.
    ///
    /// Raised for unknown step names, a current step outside the step list,
    /// or an unparseable closing delay.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization of an outbound message failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized `Result` type for skip selection operations.
pub type Result<T> = std::result::Result<T, SkipHireError>;
