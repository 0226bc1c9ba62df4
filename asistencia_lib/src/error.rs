//! Error types for the library layer.

use std::fmt;

use crate::scrape::ScrapeError;

/// Errors produced by the library layer, wrapping scraper and API errors
/// and adding artifact I/O and input validation failures.
#[derive(Debug)]
pub enum SyncError {
    /// An error from the underlying API client.
    Api(asistencia_api::Error),
    /// The scrape failed before producing a result.
    Scrape(ScrapeError),
    /// Reading or writing a temp artifact failed.
    Io(std::io::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Scrape(e) => write!(f, "Scrape error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Scrape(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<asistencia_api::Error> for SyncError {
    fn from(e: asistencia_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<ScrapeError> for SyncError {
    fn from(e: ScrapeError) -> Self {
        Self::Scrape(e)
    }
}

impl From<std::io::Error> for SyncError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
