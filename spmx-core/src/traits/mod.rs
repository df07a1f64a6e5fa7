//! Abstract interfaces for SPMX matrices
//!
//! This module defines the trait abstractions used across the workspace.
//! Traits are pure interfaces - no concrete matrix implementations.

pub mod element;
pub mod matrix;

pub use element::{DataType, MatrixElement};
#[cfg(feature = "alloc")]
pub use matrix::MatrixOperations;
pub use matrix::SparseMatrix;
