//! Dual-representation sparse matrix
//!
//! A [`Matrix`] holds its entries either in an ordered coordinate map or in
//! compressed line storage (CSR under row-major ordering, CSC under
//! column-major ordering). Exactly one body exists at a time; `compress` and
//! `uncompress` move between them.
//!
//! Coordinates passed to the storage-level methods (`get`, `insert`, ...) are
//! `(primary, secondary)` pairs. Methods taking `(row, column)` say so.

use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;

use spmx_core::{
    validate_compressed_form, validate_coordinate, validate_dimensions, MatrixElement,
    MatrixFormat, MatrixOperations, Order, Result, RowMajor, SparseMatrix, SpmxError,
    StorageOrder,
};

use crate::config::MatrixConfig;

mod access;
mod compression;
mod lines;
mod norms;
mod products;

pub use products::RowVector;

/// Ordered coordinate map keyed by `(primary, secondary)`
pub type CoordinateMap<T> = BTreeMap<(usize, usize), T>;

/// Compressed line storage
///
/// Line `p` owns positions `offsets[p]..offsets[p + 1]` of `indices` and
/// `values`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressedStorage<T> {
    /// Start of each line, length `first + 1`
    pub offsets: Vec<usize>,
    /// Secondary index of each stored value, increasing within a line
    pub indices: Vec<usize>,
    /// Stored values, parallel to `indices`
    pub values: Vec<T>,
}

impl<T> CompressedStorage<T> {
    /// Positions of line `primary` in `indices` / `values`
    #[inline]
    pub fn line(&self, primary: usize) -> Range<usize> {
        self.offsets[primary]..self.offsets[primary + 1]
    }

    /// Number of stored values
    pub fn nnz(&self) -> usize {
        self.values.len()
    }
}

impl<T> Default for CompressedStorage<T> {
    fn default() -> Self {
        Self {
            offsets: Vec::new(),
            indices: Vec::new(),
            values: Vec::new(),
        }
    }
}

/// The two mutually exclusive storage bodies
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Storage<T> {
    Coordinate(CoordinateMap<T>),
    Compressed(CompressedStorage<T>),
}

/// Sparse matrix over `T` with storage ordering `O`
///
/// `first` and `second` are the storage dimensions: rows x columns under
/// [`RowMajor`], columns x rows under [`ColumnMajor`](spmx_core::ColumnMajor).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: MatrixElement, O: StorageOrder = RowMajor> {
    first: usize,
    second: usize,
    storage: Storage<T>,
    config: MatrixConfig,
    _order: PhantomData<O>,
}

impl<T: MatrixElement, O: StorageOrder> Matrix<T, O> {
    /// Create an empty, uncompressed matrix
    pub fn new(first: usize, second: usize) -> Result<Self> {
        Self::with_config(first, second, MatrixConfig::default())
    }

    /// Create an empty, uncompressed matrix with a specific configuration
    pub fn with_config(first: usize, second: usize, config: MatrixConfig) -> Result<Self> {
        validate_dimensions(first, second)?;
        Ok(Self::from_storage(
            first,
            second,
            Storage::Coordinate(BTreeMap::new()),
            config,
        ))
    }

    /// Create an uncompressed matrix from a coordinate map
    pub fn from_map(first: usize, second: usize, elements: CoordinateMap<T>) -> Result<Self> {
        Self::from_map_with_config(first, second, elements, MatrixConfig::default())
    }

    /// Create an uncompressed matrix from a coordinate map with a specific
    /// configuration
    pub fn from_map_with_config(
        first: usize,
        second: usize,
        elements: CoordinateMap<T>,
        config: MatrixConfig,
    ) -> Result<Self> {
        validate_dimensions(first, second)?;

        if config.should_validate() {
            for &(primary, secondary) in elements.keys() {
                validate_coordinate(primary, secondary, first, second)?;
            }
        }

        Ok(Self::from_storage(
            first,
            second,
            Storage::Coordinate(elements),
            config,
        ))
    }

    /// Create a compressed matrix from offsets, indices and values
    pub fn from_compressed(
        first: usize,
        second: usize,
        offsets: Vec<usize>,
        indices: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        Self::from_compressed_with_config(
            first,
            second,
            offsets,
            indices,
            values,
            MatrixConfig::default(),
        )
    }

    /// Create a compressed matrix with a specific configuration
    pub fn from_compressed_with_config(
        first: usize,
        second: usize,
        offsets: Vec<usize>,
        indices: Vec<usize>,
        values: Vec<T>,
        config: MatrixConfig,
    ) -> Result<Self> {
        validate_dimensions(first, second)?;

        if config.should_validate() {
            validate_compressed_form(first, second, &offsets, &indices, &values)?;
        }

        let storage = CompressedStorage {
            offsets,
            indices,
            values,
        };
        Ok(Self::from_storage(
            first,
            second,
            Storage::Compressed(storage),
            config,
        ))
    }

    /// Create an uncompressed matrix from `(primary, secondary, value)`
    /// triplets
    ///
    /// Later duplicates overwrite earlier ones.
    pub fn from_triplets(
        first: usize,
        second: usize,
        triplets: &[(usize, usize, T)],
    ) -> Result<Self> {
        validate_dimensions(first, second)?;

        let mut elements = BTreeMap::new();
        for &(primary, secondary, value) in triplets {
            validate_coordinate(primary, secondary, first, second)?;
            elements.insert((primary, secondary), value);
        }

        Ok(Self::from_storage(
            first,
            second,
            Storage::Coordinate(elements),
            MatrixConfig::default(),
        ))
    }

    pub(crate) fn from_storage(
        first: usize,
        second: usize,
        storage: Storage<T>,
        config: MatrixConfig,
    ) -> Self {
        Self {
            first,
            second,
            storage,
            config,
            _order: PhantomData,
        }
    }

    // SHAPE.

    /// Number of logical rows
    #[inline]
    pub fn rows(&self) -> usize {
        match O::ORDER {
            Order::Row => self.first,
            Order::Column => self.second,
        }
    }

    /// Number of logical columns
    #[inline]
    pub fn columns(&self) -> usize {
        match O::ORDER {
            Order::Row => self.second,
            Order::Column => self.first,
        }
    }

    /// Logical shape as (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.columns())
    }

    /// Storage shape as (first, second)
    pub fn storage_shape(&self) -> (usize, usize) {
        (self.first, self.second)
    }

    pub fn is_square(&self) -> bool {
        self.first == self.second
    }

    /// Storage ordering of this matrix
    pub fn order(&self) -> Order {
        O::ORDER
    }

    /// Whether the compressed body is active
    #[inline]
    pub fn is_compressed(&self) -> bool {
        matches!(self.storage, Storage::Compressed(_))
    }

    /// Current storage format
    pub fn format(&self) -> MatrixFormat {
        if self.is_compressed() {
            O::ORDER.compressed_format()
        } else {
            MatrixFormat::Coo
        }
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    /// Number of stored values
    pub fn nnz(&self) -> usize {
        match &self.storage {
            Storage::Coordinate(elements) => elements.len(),
            Storage::Compressed(compressed) => compressed.nnz(),
        }
    }

    /// Fraction of positions that hold a stored value
    pub fn sparsity(&self) -> f64 {
        self.nnz() as f64 / (self.first as f64 * self.second as f64)
    }

    /// Complement of [`sparsity`](Self::sparsity)
    pub fn density(&self) -> f64 {
        1.0 - self.sparsity()
    }

    /// Returns a reshaped matrix holding the same entries in storage order
    ///
    /// Entry `(p, s)` moves to the position with the same linear offset
    /// `p * second + s` in the new `first x second` shape, so every entry
    /// fits. The area must be unchanged, otherwise `DimensionMismatch`.
    /// The result is compressed iff `compress` is set, whatever the mode of
    /// `self`.
    pub fn reshape(&self, first: usize, second: usize, compress: bool) -> Result<Self> {
        validate_dimensions(first, second)?;
        match (first.checked_mul(second), self.first.checked_mul(self.second)) {
            (Some(area), Some(current)) if area == current => {}
            _ => return Err(SpmxError::DimensionMismatch),
        }

        let elements = self
            .entries()
            .map(|(primary, secondary, value)| {
                let offset = primary * self.second + secondary;
                ((offset / second, offset % second), value)
            })
            .collect();

        let mut matrix =
            Self::from_storage(first, second, Storage::Coordinate(elements), self.config);
        if compress {
            matrix.compress();
        }

        Ok(matrix)
    }

    // STORAGE ACCESS.

    /// Borrow the compressed body as (offsets, indices, values)
    pub fn compressed_parts(&self) -> Option<(&[usize], &[usize], &[T])> {
        match &self.storage {
            Storage::Compressed(compressed) => Some((
                &compressed.offsets,
                &compressed.indices,
                &compressed.values,
            )),
            Storage::Coordinate(_) => None,
        }
    }

    /// Borrow the coordinate body
    pub fn coordinates(&self) -> Option<&CoordinateMap<T>> {
        match &self.storage {
            Storage::Coordinate(elements) => Some(elements),
            Storage::Compressed(_) => None,
        }
    }

    /// Iterate stored `(primary, secondary, value)` entries in storage order
    pub fn entries(&self) -> Entries<'_, T> {
        let inner = match &self.storage {
            Storage::Coordinate(elements) => EntriesInner::Coordinate(elements.iter()),
            Storage::Compressed(compressed) => EntriesInner::Compressed {
                storage: compressed,
                line: 0,
                position: 0,
            },
        };

        Entries { inner }
    }
}

/// Iterator over stored entries of a [`Matrix`], in storage order
pub struct Entries<'a, T> {
    inner: EntriesInner<'a, T>,
}

enum EntriesInner<'a, T> {
    Coordinate(btree_map::Iter<'a, (usize, usize), T>),
    Compressed {
        storage: &'a CompressedStorage<T>,
        line: usize,
        position: usize,
    },
}

impl<'a, T: Copy> Iterator for Entries<'a, T> {
    type Item = (usize, usize, T);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            EntriesInner::Coordinate(iter) => iter
                .next()
                .map(|(&(primary, secondary), &value)| (primary, secondary, value)),
            EntriesInner::Compressed {
                storage,
                line,
                position,
            } => {
                if *position >= storage.values.len() {
                    return None;
                }

                // Skip empty lines
                while storage.offsets[*line + 1] <= *position {
                    *line += 1;
                }

                let item = (*line, storage.indices[*position], storage.values[*position]);
                *position += 1;
                Some(item)
            }
        }
    }
}

impl<T: MatrixElement, O: StorageOrder> fmt::Display for Matrix<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.storage {
            Storage::Coordinate(elements) => {
                for (position, ((primary, secondary), value)) in elements.iter().enumerate() {
                    if position > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "({primary}, {secondary}): {value}")?;
                }
                Ok(())
            }
            Storage::Compressed(compressed) => {
                write!(f, "Offsets:")?;
                for offset in &compressed.offsets {
                    write!(f, " {offset}")?;
                }
                write!(f, "\nIndices:")?;
                for index in &compressed.indices {
                    write!(f, " {index}")?;
                }
                write!(f, "\nValues:")?;
                for value in &compressed.values {
                    write!(f, " {value}")?;
                }
                Ok(())
            }
        }
    }
}

impl<T: MatrixElement, O: StorageOrder> SparseMatrix for Matrix<T, O> {
    type Element = T;

    fn get_element(&self, row: usize, col: usize) -> Option<T> {
        let (primary, secondary) = O::to_storage(row, col);
        validate_coordinate(primary, secondary, self.first, self.second).ok()?;

        match &self.storage {
            Storage::Coordinate(elements) => elements.get(&(primary, secondary)).copied(),
            Storage::Compressed(compressed) => compressed
                .line(primary)
                .find(|&position| compressed.indices[position] == secondary)
                .map(|position| compressed.values[position]),
        }
    }

    fn dimensions(&self) -> (usize, usize) {
        self.shape()
    }

    fn nnz(&self) -> usize {
        Matrix::nnz(self)
    }
}

impl<T: MatrixElement, O: StorageOrder> MatrixOperations for Matrix<T, O> {
    fn get_row(&self, row_index: usize) -> Vec<T> {
        self.stored_in_logical_line(row_index, Order::Row)
    }

    fn get_col(&self, col_index: usize) -> Vec<T> {
        self.stored_in_logical_line(col_index, Order::Column)
    }
}

impl<T: MatrixElement, O: StorageOrder> Matrix<T, O> {
    /// Stored values of a logical row or column, in order along it
    fn stored_in_logical_line(&self, index: usize, axis: Order) -> Vec<T> {
        if axis == O::ORDER {
            // The requested line is a primary line
            if index >= self.first {
                return Vec::new();
            }
            match &self.storage {
                Storage::Coordinate(elements) => elements
                    .range((index, 0)..(index + 1, 0))
                    .map(|(_, &value)| value)
                    .collect(),
                Storage::Compressed(compressed) => {
                    compressed.values[compressed.line(index)].to_vec()
                }
            }
        } else {
            // Entries come in primary order, which runs along the requested line
            self.entries()
                .filter(|&(_, secondary, _)| secondary == index)
                .map(|(_, _, value)| value)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spmx_core::ColumnMajor;

    fn sample() -> Matrix<f64> {
        // [1 0 2]
        // [0 0 0]
        // [0 3 0]
        Matrix::from_triplets(3, 3, &[(0, 0, 1.0), (0, 2, 2.0), (2, 1, 3.0)]).unwrap()
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            Matrix::<f64>::new(0, 3).unwrap_err(),
            SpmxError::InvalidDimension
        );

        let mut elements = BTreeMap::new();
        elements.insert((3, 0), 1.0);
        assert_eq!(
            Matrix::<f64>::from_map(3, 3, elements).unwrap_err(),
            SpmxError::OutOfBounds
        );

        assert_eq!(
            Matrix::<f64>::from_compressed(2, 2, vec![0, 1], vec![0], vec![1.0]).unwrap_err(),
            SpmxError::MalformedCompressedForm
        );

        assert_eq!(
            Matrix::<f64>::from_triplets(2, 2, &[(0, 2, 1.0)]).unwrap_err(),
            SpmxError::OutOfBounds
        );
    }

    #[test]
    fn test_shape() {
        let row: Matrix<f64> = Matrix::new(2, 5).unwrap();
        assert_eq!(row.shape(), (2, 5));
        assert!(!row.is_square());

        let column: Matrix<f64, ColumnMajor> = Matrix::new(2, 5).unwrap();
        assert_eq!(column.rows(), 5);
        assert_eq!(column.columns(), 2);
        assert_eq!(column.storage_shape(), (2, 5));
        assert_eq!(column.order(), Order::Column);
    }

    #[test]
    fn test_shape_invariant_under_compression() {
        let mut matrix: Matrix<f64, ColumnMajor> =
            Matrix::from_triplets(4, 2, &[(3, 1, 1.0)]).unwrap();
        let shape = matrix.shape();

        matrix.compress();
        assert_eq!(matrix.shape(), shape);
        assert_eq!(matrix.format(), MatrixFormat::Csc);

        matrix.uncompress();
        assert_eq!(matrix.shape(), shape);
        assert_eq!(matrix.format(), MatrixFormat::Coo);
    }

    #[test]
    fn test_from_compressed() {
        let matrix: Matrix<f64> =
            Matrix::from_compressed(3, 3, vec![0, 2, 2, 3], vec![0, 2, 1], vec![1.0, 2.0, 3.0])
                .unwrap();

        assert!(matrix.is_compressed());
        assert_eq!(matrix.nnz(), 3);
        assert_eq!(matrix, {
            let mut expected = sample();
            expected.compress();
            expected
        });
    }

    #[test]
    fn test_entries_in_storage_order() {
        let mut matrix = sample();
        let expected = vec![(0, 0, 1.0), (0, 2, 2.0), (2, 1, 3.0)];
        assert_eq!(matrix.entries().collect::<Vec<_>>(), expected);

        // Compressed iteration skips the empty middle line
        matrix.compress();
        assert_eq!(matrix.entries().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_sparsity() {
        let matrix = sample();
        assert!((matrix.sparsity() - 3.0 / 9.0).abs() < 1e-12);
        assert!((matrix.density() - 6.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_reshape() {
        let matrix = sample();

        let reshaped = matrix.reshape(1, 9, true).unwrap();
        assert!(reshaped.is_compressed());
        assert_eq!(reshaped.storage_shape(), (1, 9));
        assert_eq!(
            reshaped.entries().collect::<Vec<_>>(),
            vec![(0, 0, 1.0), (0, 2, 2.0), (0, 7, 3.0)]
        );

        // Original is untouched
        assert_eq!(matrix.storage_shape(), (3, 3));
        assert!(!matrix.is_compressed());

        assert_eq!(
            matrix.reshape(2, 4, false).unwrap_err(),
            SpmxError::DimensionMismatch
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_large_dimensions() {
        let mut matrix: Matrix<f64> = Matrix::new(1 << 33, 1 << 33).unwrap();
        assert_eq!(matrix.sparsity(), 0.0);
        assert_eq!(matrix.density(), 1.0);

        matrix.insert(1 << 32, 7, 2.0).unwrap();
        assert_eq!(matrix.sparsity(), 1.0 / (2f64.powi(66)));

        // Area overflows usize on both sides
        assert_eq!(
            matrix.reshape(1 << 32, 1 << 34, false).unwrap_err(),
            SpmxError::DimensionMismatch
        );
        assert_eq!(
            matrix.reshape(1, usize::MAX, false).unwrap_err(),
            SpmxError::DimensionMismatch
        );
    }

    #[test]
    fn test_reshape_mode_follows_flag() {
        let mut matrix = sample();
        matrix.compress();

        let reshaped = matrix.reshape(9, 1, false).unwrap();
        assert!(!reshaped.is_compressed());
        assert_eq!(reshaped.get(7, 0), Ok(3.0));

        let reshaped = matrix.reshape(9, 1, true).unwrap();
        assert!(reshaped.is_compressed());
        assert_eq!(reshaped.nnz(), 3);
    }

    #[test]
    fn test_display() {
        let mut matrix: Matrix<f64> =
            Matrix::from_triplets(2, 2, &[(0, 0, 4.0), (1, 1, 3.0)]).unwrap();
        assert_eq!(matrix.to_string(), "(0, 0): 4\n(1, 1): 3");

        matrix.compress();
        assert_eq!(
            matrix.to_string(),
            "Offsets: 0 1 2\nIndices: 0 1\nValues: 4 3"
        );
    }

    #[test]
    fn test_sparse_matrix_traits() {
        let mut matrix: Matrix<f64, ColumnMajor> =
            Matrix::from_triplets(3, 2, &[(0, 1, 5.0), (2, 1, 6.0), (1, 0, 7.0)]).unwrap();

        // Logical (row, column) = (secondary, primary)
        assert_eq!(matrix.get_element(1, 0), Some(5.0));
        assert_eq!(matrix.get_element(0, 0), None);
        assert_eq!(matrix.get_element(5, 0), None);
        assert_eq!(SparseMatrix::dimensions(&matrix), (2, 3));

        assert_eq!(matrix.get_row(1), vec![5.0, 6.0]);
        assert_eq!(matrix.get_col(2), vec![6.0]);

        matrix.compress();
        assert_eq!(matrix.get_element(1, 2), Some(6.0));
        assert_eq!(matrix.get_row(1), vec![5.0, 6.0]);
        assert_eq!(matrix.get_col(1), vec![7.0]);
        assert_eq!(matrix.get_col(9), Vec::<f64>::new());
    }
}
