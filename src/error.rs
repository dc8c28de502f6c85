//! Error types for the UI layer.

use thiserror::Error;

/// UI layer error type.
///
/// None of these are fatal to the page: handlers turn them into a degraded
/// UI state (a disabled selector, an unchanged preview) and log them.
#[derive(Error, Debug)]
pub enum UiError {
    /// Configuration could not be built or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The club endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP request failed or the body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Server returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Reading a selected file failed.
    #[error("File read failed: {0}")]
    FileRead(String),

    /// A browser API rejected a call.
    #[error("Browser error: {0}")]
    Js(String),
}

/// Result type alias for UI operations.
pub type Result<T> = std::result::Result<T, UiError>;
