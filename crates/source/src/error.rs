//! Typed error enum for the source adapters.

use thiserror::Error;

/// Errors from upstream deal API operations.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },

    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
