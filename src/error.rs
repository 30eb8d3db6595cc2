//! Error types for hikela

use thiserror::Error;

/// Main error type for hikela operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A locator, offline package or web map could not be loaded
    #[error("Failed to load {resource}: {reason}")]
    ResourceLoad { resource: String, reason: String },

    /// A single geocode request failed on the wire or at the service
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Map package error: {0}")]
    Package(String),
}

impl Error {
    /// Shorthand for a [`Error::ResourceLoad`]
    pub fn load_failed(resource: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::ResourceLoad {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for hikela operations
pub type Result<T> = std::result::Result<T, Error>;
