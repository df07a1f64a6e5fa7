//! Storage orderings for sparse matrices
//!
//! A matrix stores its entries along a *primary* axis (the lines of the
//! compressed form) and a *secondary* axis. The ordering decides which
//! logical axis plays which role: row-major makes rows primary, column-major
//! makes columns primary.

use super::layout::MatrixFormat;

/// Runtime representation of a storage ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// Rows are primary lines
    Row = 0,
    /// Columns are primary lines
    Column = 1,
}

impl Order {
    /// Compressed format produced by this ordering
    pub const fn compressed_format(self) -> MatrixFormat {
        match self {
            Order::Row => MatrixFormat::Csr,
            Order::Column => MatrixFormat::Csc,
        }
    }

    /// Map logical (row, column) to storage (primary, secondary)
    ///
    /// The mapping is an involution, so the same function maps storage
    /// coordinates back to logical ones.
    #[inline]
    pub const fn to_storage(self, row: usize, column: usize) -> (usize, usize) {
        match self {
            Order::Row => (row, column),
            Order::Column => (column, row),
        }
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Order::Row => write!(f, "row-major"),
            Order::Column => write!(f, "column-major"),
        }
    }
}

/// Compile-time storage ordering marker
pub trait StorageOrder:
    Copy + Clone + core::fmt::Debug + Default + PartialEq + Send + Sync + 'static
{
    /// The ordering this marker stands for
    const ORDER: Order;

    /// Map logical (row, column) to storage (primary, secondary)
    #[inline]
    fn to_storage(row: usize, column: usize) -> (usize, usize) {
        Self::ORDER.to_storage(row, column)
    }

    /// Map storage (primary, secondary) to logical (row, column)
    #[inline]
    fn to_logical(primary: usize, secondary: usize) -> (usize, usize) {
        Self::ORDER.to_storage(primary, secondary)
    }
}

/// Row-major ordering: primary = row, secondary = column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RowMajor;

impl StorageOrder for RowMajor {
    const ORDER: Order = Order::Row;
}

/// Column-major ordering: primary = column, secondary = row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColumnMajor;

impl StorageOrder for ColumnMajor {
    const ORDER: Order = Order::Column;
}
