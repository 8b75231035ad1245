//! Error types raised while rendering markup.

use std::io;

use thiserror::Error;

/// The error type returned by every generated builder method.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
