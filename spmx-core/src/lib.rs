#![no_std]

//! SPMX Core - Sparse Matrix Definitions
//!
//! This crate provides the element domain, storage orderings, error kinds and
//! validation rules shared by sparse matrix implementations. It performs no
//! I/O and only allocates when the `alloc` feature is enabled.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use traits::*;
pub use validation::{
    parse_entry_line, parse_size_line, validate_compressed_form, validate_coordinate,
    validate_dimensions, validate_range, ParseError,
};
