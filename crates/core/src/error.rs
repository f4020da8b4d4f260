use std::io;
use std::result::Result as StdResult;

use thiserror::Error;

/// Errors that can occur in dealherald.
#[derive(Error, Debug)]
pub enum HeraldError {
    /// A candidate deal is missing the fields needed to derive its
    /// identity key. Silently including it would corrupt the key space,
    /// so this surfaces to the caller as a fatal input error.
    #[error("invalid deal: {0}")]
    InvalidDeal(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = StdResult<T, HeraldError>;
