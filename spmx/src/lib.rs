//! SPMX - Dual-Representation Sparse Matrices
//!
//! This library provides sparse matrices that live either as an ordered
//! coordinate map (cheap random insertion) or as compressed line storage
//! (CSR / CSC, fast products), switching between the two on demand.
//!
//! ## Architecture
//!
//! - **spmx-core**: Element domain, orderings, error kinds and validation (no I/O)
//! - **spmx**: The matrix type, its products and norms, and Matrix Market I/O
//!
//! ## Quick Start
//!
//! ```rust
//! use spmx::{Matrix, Norm, RowMajor};
//!
//! fn example() -> Result<(), spmx::SpmxError> {
//!     // [4 0]
//!     // [0 3]
//!     let mut matrix: Matrix<f64, RowMajor> = Matrix::new(2, 2)?;
//!     matrix.insert(0, 0, 4.0)?;
//!     matrix.insert(1, 1, 3.0)?;
//!
//!     // Freeze for fast products
//!     matrix.compress();
//!     assert_eq!(matrix.mul_vector(&[1.0, 1.0])?, vec![4.0, 3.0]);
//!     assert_eq!(matrix.norm(Norm::Frobenius), 5.0);
//!
//!     // Mutation requires coordinate storage again
//!     matrix.uncompress();
//!     matrix.insert(0, 1, 1.0)?;
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Two storage bodies**: Ordered coordinate map or compressed lines, one at a time
//! - **Products**: Scalar, matrix-vector, vector-matrix and sparse-sparse in any storage mode
//! - **Norms**: One, infinity and Frobenius
//! - **Matrix Market**: Load (memory-mapped with `mmap`) and dump coordinate text
//! - **Serde**: Configuration and storage types behind the `serde` feature

pub use spmx_core::{
    // Core traits
    MatrixElement, MatrixOperations, SparseMatrix,
    // Layout definitions
    ColumnMajor, DataType, MatrixFormat, Norm, Order, RowMajor, StorageOrder, DEFAULT_TOLERANCE,
    // Error handling
    SpmxError,
};

pub mod config;
pub mod error;
pub mod market;
pub mod matrix;

pub use config::MatrixConfig;
pub use error::{Error, Result};
pub use matrix::{CompressedStorage, CoordinateMap, Entries, Matrix, RowVector};
