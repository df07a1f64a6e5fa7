//! Core matrix abstraction traits
//!
//! Format-agnostic access in logical (row, column) coordinates, whatever the
//! storage ordering or compression state of the implementation.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use super::element::MatrixElement;

/// Core sparse matrix trait for format-agnostic access
pub trait SparseMatrix {
    /// The element type stored in this matrix
    type Element: MatrixElement;

    /// Get an element at the specified position
    ///
    /// Returns `None` if the element is not stored or if the position is out
    /// of bounds.
    fn get_element(&self, row: usize, col: usize) -> Option<Self::Element>;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Get number of stored elements
    fn nnz(&self) -> usize;
}

/// Extension trait for row/column operations (requires alloc feature)
#[cfg(feature = "alloc")]
pub trait MatrixOperations: SparseMatrix {
    /// Get all stored elements in a row, in column order
    fn get_row(&self, row_index: usize) -> Vec<Self::Element>;

    /// Get all stored elements in a column, in row order
    fn get_col(&self, col_index: usize) -> Vec<Self::Element>;
}
