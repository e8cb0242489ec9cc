//! Error types for the console core

use thiserror::Error;

/// Result type alias using our ConsoleError
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Main error type for console operations
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Authentication errors (missing or rejected bearer token)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Strategy not found
    #[error("Strategy not found: {0}")]
    StrategyNotFound(String),

    /// Pre-submit validation failure
    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    /// Out-of-bounds access into an editable array. Not reachable from a
    /// well-behaved caller; indicates a programming error, not user input.
    #[error("Index {index} out of bounds for {editor} (len {len})")]
    IndexOutOfBounds {
        editor: &'static str,
        index: usize,
        len: usize,
    },

    /// A save for this session is already in flight
    #[error("A save for strategy {0} is already in flight")]
    SaveInFlight(String),

    /// The editor session has been closed
    #[error("Editor session is closed")]
    SessionClosed,

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
