//! Element access, insertion and line extraction

use std::ops::Range;

use spmx_core::{
    validate_coordinate, validate_range, MatrixElement, Order, Result, SpmxError, StorageOrder,
};

use super::lines::LineSource;
use super::{CoordinateMap, Matrix, Storage};

impl<T: MatrixElement, O: StorageOrder> Matrix<T, O> {
    /// Value at storage coordinate `(primary, secondary)`
    ///
    /// Absent entries read as zero. Legal in both storage modes; the
    /// compressed lookup scans the line linearly.
    pub fn get(&self, primary: usize, secondary: usize) -> Result<T> {
        validate_coordinate(primary, secondary, self.first, self.second)?;

        let value = match &self.storage {
            Storage::Coordinate(elements) => elements.get(&(primary, secondary)).copied(),
            Storage::Compressed(compressed) => compressed
                .line(primary)
                .find(|&position| compressed.indices[position] == secondary)
                .map(|position| compressed.values[position]),
        };

        Ok(value.unwrap_or(T::ZERO))
    }

    /// Value at logical coordinate `(row, column)`
    pub fn value(&self, row: usize, column: usize) -> Result<T> {
        let (primary, secondary) = O::to_storage(row, column);
        self.get(primary, secondary)
    }

    /// Mutable reference to the entry at `(primary, secondary)`
    ///
    /// Inserts a zero entry when absent. Only legal while uncompressed. The
    /// written value is not filtered; compression re-applies the tolerance.
    pub fn get_mut(&mut self, primary: usize, secondary: usize) -> Result<&mut T> {
        let (first, second) = (self.first, self.second);
        let elements = self.coordinates_mut()?;
        validate_coordinate(primary, secondary, first, second)?;

        Ok(elements.entry((primary, secondary)).or_insert(T::ZERO))
    }

    /// Store `value` at `(primary, secondary)`
    ///
    /// Values at or below the tolerance are not stored, and remove any
    /// entry already at that coordinate. Only legal while uncompressed.
    pub fn insert(&mut self, primary: usize, secondary: usize, value: T) -> Result<()> {
        let (first, second) = (self.first, self.second);
        let negligible = self.config.is_negligible(value);
        let elements = self.coordinates_mut()?;
        validate_coordinate(primary, secondary, first, second)?;

        if negligible {
            elements.remove(&(primary, secondary));
        } else {
            elements.insert((primary, secondary), value);
        }

        Ok(())
    }

    /// Insert a batch of `((primary, secondary), value)` pairs
    ///
    /// All coordinates are validated before anything is written, so a
    /// failing batch leaves the matrix unchanged.
    pub fn insert_many<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = ((usize, usize), T)>,
    {
        let entries: Vec<_> = entries.into_iter().collect();
        self.coordinates_mut()?;

        for &((primary, secondary), _) in &entries {
            validate_coordinate(primary, secondary, self.first, self.second)?;
        }

        for ((primary, secondary), value) in entries {
            self.insert(primary, secondary, value)?;
        }

        Ok(())
    }

    /// Insert a dense block covering `primary x secondary`
    ///
    /// `values` is flattened line by line and must hold exactly
    /// `primary.len() * secondary.len()` values.
    pub fn insert_block(
        &mut self,
        primary: Range<usize>,
        secondary: Range<usize>,
        values: &[T],
    ) -> Result<()> {
        self.coordinates_mut()?;
        validate_range(&primary, self.first)?;
        validate_range(&secondary, self.second)?;

        if values.len() != primary.len() * secondary.len() {
            return Err(SpmxError::DimensionMismatch);
        }

        let coordinates = primary.flat_map(|p| secondary.clone().map(move |s| (p, s)));
        for ((p, s), &value) in coordinates.zip(values) {
            self.insert(p, s, value)?;
        }

        Ok(())
    }

    /// Dense copy of logical row `row`, of length `columns()`
    pub fn row(&self, row: usize) -> Result<Vec<T>> {
        if row >= self.rows() {
            return Err(SpmxError::OutOfBounds);
        }

        let mut dense = vec![T::ZERO; self.columns()];
        match O::ORDER {
            Order::Row => self.scatter_line(row, &mut dense),
            Order::Column => self.gather_secondary(row, &mut dense),
        }

        Ok(dense)
    }

    /// Dense copy of logical column `column`, of length `rows()`
    pub fn column(&self, column: usize) -> Result<Vec<T>> {
        if column >= self.columns() {
            return Err(SpmxError::OutOfBounds);
        }

        let mut dense = vec![T::ZERO; self.rows()];
        match O::ORDER {
            Order::Row => self.gather_secondary(column, &mut dense),
            Order::Column => self.scatter_line(column, &mut dense),
        }

        Ok(dense)
    }

    /// Scatter primary line `primary` into `dense` (length `second`)
    pub(crate) fn scatter_line(&self, primary: usize, dense: &mut [T]) {
        match &self.storage {
            Storage::Coordinate(elements) => elements.scatter(primary, dense),
            Storage::Compressed(compressed) => compressed.scatter(primary, dense),
        }
    }

    /// Collect every entry with the given secondary index into `dense`
    /// (length `first`), indexed by primary
    fn gather_secondary(&self, secondary: usize, dense: &mut [T]) {
        match &self.storage {
            Storage::Coordinate(elements) => {
                for (&(primary, index), &value) in elements {
                    if index == secondary {
                        dense[primary] = value;
                    }
                }
            }
            Storage::Compressed(compressed) => {
                for (primary, slot) in dense.iter_mut().enumerate() {
                    let line = compressed.line(primary);
                    if let Ok(offset) = compressed.indices[line.clone()].binary_search(&secondary) {
                        *slot = compressed.values[line.start + offset];
                    }
                }
            }
        }
    }

    fn coordinates_mut(&mut self) -> Result<&mut CoordinateMap<T>> {
        match &mut self.storage {
            Storage::Coordinate(elements) => Ok(elements),
            Storage::Compressed(_) => Err(SpmxError::CompressedMutation),
        }
    }
}
