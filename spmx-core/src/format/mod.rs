//! Storage layout definitions for sparse matrices
//!
//! Pure data definitions: orderings, storage formats, norm kinds and the
//! constants shared by every implementation.

pub mod constants;
pub mod layout;
pub mod norm;
pub mod order;

pub use constants::DEFAULT_TOLERANCE;
pub use layout::MatrixFormat;
pub use norm::Norm;
pub use order::{ColumnMajor, Order, RowMajor, StorageOrder};
