//! Typed error enum for the notify crate.

use thiserror::Error;

/// Errors from Discord delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("Discord returned status {code}: {body}")]
    HttpStatus { code: u16, body: String },

    #[error("client initialization failed: {0}")]
    ClientInit(String),

    #[error("message is {len} chars, Discord caps messages at {limit}")]
    MessageTooLong { len: usize, limit: usize },
}
