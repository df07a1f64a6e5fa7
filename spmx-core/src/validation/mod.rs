//! Validation utilities for SPMX matrices
//!
//! This module contains pure validation functions with no I/O dependencies.
//! All functions check data layout and index constraints.

pub mod bounds;
pub mod compressed;
pub mod parsing;

pub use bounds::{validate_coordinate, validate_dimensions, validate_range};
pub use compressed::validate_compressed_form;
pub use parsing::{parse_entry_line, parse_size_line, ParseError};
