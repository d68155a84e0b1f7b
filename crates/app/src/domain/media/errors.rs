//! Media store errors.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaStoreError {
    #[error("media type {0:?} is not allowed")]
    InvalidMediaType(String),

    #[error("media is {size} bytes, above the {limit} byte limit")]
    MediaTooLarge { size: usize, limit: usize },

    #[error("invalid stored media path")]
    InvalidPath,

    #[error("media storage error")]
    Io(#[from] io::Error),
}
