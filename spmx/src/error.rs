//! Error types for spmx collaborators
//!
//! Matrix operations report [`SpmxError`] directly. Loading and dumping add
//! I/O and parse failures on top of it.

use spmx_core::{ParseError, SpmxError};
use thiserror::Error;

/// Result type alias using spmx's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, dumping or operating on matrices
#[derive(Error, Debug)]
pub enum Error {
    /// A matrix contract was violated
    #[error("Matrix error: {0}")]
    Matrix(#[from] SpmxError),

    /// Underlying file operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Matrix Market input is not valid UTF-8
    #[error("Invalid text encoding: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// A Matrix Market line could not be parsed
    #[error("Parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: ParseError,
    },

    /// The input ended before the size line
    #[error("Missing size line")]
    MissingSizeLine,
}
