//! Scalar, vector and matrix products

use std::collections::BTreeMap;
use std::ops::{DivAssign, Mul, MulAssign};

use rayon::prelude::*;
use spmx_core::{MatrixElement, Order, Result, SpmxError, StorageOrder};
use tracing::debug;

use super::lines::{LineCombiner, LineSource};
use super::{CoordinateMap, Matrix, Storage};

impl<T: MatrixElement, O: StorageOrder> Matrix<T, O> {
    // SCALAR.

    /// Returns a copy with every stored value multiplied by `factor`
    pub fn scale(&self, factor: T) -> Self {
        let mut matrix = self.clone();
        matrix.scale_in_place(factor);
        matrix
    }

    /// Multiply every stored value by `factor`
    ///
    /// The storage mode is kept. Products at or below the tolerance are
    /// removed.
    pub fn scale_in_place(&mut self, factor: T) {
        self.map_values(move |value| *value *= factor);
    }

    /// Returns a copy with every stored value divided by `divisor`
    pub fn divide(&self, divisor: T) -> Self {
        let mut matrix = self.clone();
        matrix.divide_in_place(divisor);
        matrix
    }

    /// Divide every stored value by `divisor`
    ///
    /// Integer element types panic on a zero divisor, as `/=` does.
    pub fn divide_in_place(&mut self, divisor: T) {
        self.map_values(move |value| *value /= divisor);
    }

    fn map_values<F>(&mut self, map: F)
    where
        F: Fn(&mut T) + Send + Sync,
    {
        let tolerance = self.config.tolerance;
        let parallel = self.config.parallel;

        match &mut self.storage {
            Storage::Coordinate(elements) => {
                elements.values_mut().for_each(&map);
                elements.retain(|_, value| value.magnitude() > tolerance);
            }
            Storage::Compressed(compressed) => {
                if parallel {
                    compressed.values.par_iter_mut().for_each(&map);
                } else {
                    compressed.values.iter_mut().for_each(&map);
                }
                compressed.prune(tolerance);
            }
        }
    }

    // VECTOR.

    /// Matrix times column vector, `A * x`
    ///
    /// `x` must have `columns()` entries; the result has `rows()`.
    pub fn mul_vector(&self, x: &[T]) -> Result<Vec<T>> {
        if x.len() != self.columns() {
            return Err(SpmxError::DimensionMismatch);
        }

        let mut result = vec![T::ZERO; self.rows()];
        match O::ORDER {
            Order::Row => self.dot_lines(x, &mut result),
            Order::Column => self.combine_lines(x, &mut result),
        }

        Ok(result)
    }

    /// Row vector times matrix, `x^T * A`
    ///
    /// `x` must have `rows()` entries; the result has `columns()`.
    pub fn vector_mul(&self, x: &[T]) -> Result<Vec<T>> {
        if x.len() != self.rows() {
            return Err(SpmxError::DimensionMismatch);
        }

        let mut result = vec![T::ZERO; self.columns()];
        match O::ORDER {
            Order::Row => self.combine_lines(x, &mut result),
            Order::Column => self.dot_lines(x, &mut result),
        }

        Ok(result)
    }

    /// `result[p] += value(p, s) * x[s]`: one dot product per primary line
    fn dot_lines(&self, x: &[T], result: &mut [T]) {
        match &self.storage {
            Storage::Compressed(compressed) => {
                for (primary, slot) in result.iter_mut().enumerate() {
                    for position in compressed.line(primary) {
                        *slot += compressed.values[position] * x[compressed.indices[position]];
                    }
                }
            }
            Storage::Coordinate(elements) => {
                for (&(primary, secondary), &value) in elements {
                    result[primary] += value * x[secondary];
                }
            }
        }
    }

    /// `result[s] += x[p] * value(p, s)`: linear combination of primary lines
    fn combine_lines(&self, x: &[T], result: &mut [T]) {
        match &self.storage {
            Storage::Compressed(compressed) => compressed.combine(x, result),
            Storage::Coordinate(elements) => elements.combine(x, result),
        }
    }

    // MATRIX.

    /// Matrix product `self * other`
    ///
    /// Requires `self.columns() == other.rows()`. The result is a fresh
    /// uncompressed matrix with `self`'s configuration. Any combination of
    /// storage modes is accepted.
    pub fn mul_matrix(&self, other: &Self) -> Result<Self> {
        if self.columns() != other.rows() {
            return Err(SpmxError::DimensionMismatch);
        }

        // Each result line is one line of `lines` combined against `against`.
        // Row-major result rows come from the left operand's rows, column-major
        // result columns from the right operand's columns.
        let (lines, against) = match O::ORDER {
            Order::Row => (self, other),
            Order::Column => (other, self),
        };

        let shape = Sweep {
            first: lines.first,
            inner: lines.second,
            width: against.second,
            tolerance: self.config.tolerance,
        };

        let elements = match (&lines.storage, &against.storage) {
            (Storage::Compressed(source), Storage::Compressed(target)) => shape.run(source, target),
            (Storage::Compressed(source), Storage::Coordinate(target)) => shape.run(source, target),
            (Storage::Coordinate(source), Storage::Compressed(target)) => shape.run(source, target),
            (Storage::Coordinate(source), Storage::Coordinate(target)) => shape.run(source, target),
        };

        let (order, left, right) = (O::ORDER, self.format(), other.format());
        debug!(
            %order,
            %left,
            %right,
            rows = self.rows(),
            inner = self.columns(),
            columns = other.columns(),
            nnz = elements.len(),
            "matrix product"
        );

        Ok(Self::from_storage(
            shape.first,
            shape.width,
            Storage::Coordinate(elements),
            self.config,
        ))
    }
}

/// Dimensions of one line-by-line product sweep
#[derive(Debug, Clone, Copy)]
struct Sweep {
    /// Lines in the source, and in the result
    first: usize,
    /// Source line length, equal to the target's line count
    inner: usize,
    /// Target line length, and result line length
    width: usize,
    tolerance: f64,
}

impl Sweep {
    fn run<T, S, C>(&self, source: &S, target: &C) -> CoordinateMap<T>
    where
        T: MatrixElement,
        S: LineSource<T>,
        C: LineCombiner<T>,
    {
        let mut elements = BTreeMap::new();
        let mut line = vec![T::ZERO; self.inner];
        let mut product = vec![T::ZERO; self.width];

        for primary in 0..self.first {
            line.fill(T::ZERO);
            source.scatter(primary, &mut line);

            product.fill(T::ZERO);
            target.combine(&line, &mut product);

            for (secondary, &value) in product.iter().enumerate() {
                if value.magnitude() > self.tolerance {
                    elements.insert((primary, secondary), value);
                }
            }
        }

        elements
    }
}

/// A borrowed row vector, for writing `x^T * A` as `RowVector(&x) * &a`
#[derive(Debug, Clone, Copy)]
pub struct RowVector<'a, T>(pub &'a [T]);

impl<T: MatrixElement, O: StorageOrder> Mul<&[T]> for &Matrix<T, O> {
    type Output = Result<Vec<T>>;

    fn mul(self, x: &[T]) -> Self::Output {
        self.mul_vector(x)
    }
}

impl<T: MatrixElement, O: StorageOrder> Mul<&Matrix<T, O>> for RowVector<'_, T> {
    type Output = Result<Vec<T>>;

    fn mul(self, matrix: &Matrix<T, O>) -> Self::Output {
        matrix.vector_mul(self.0)
    }
}

impl<T: MatrixElement, O: StorageOrder> Mul<&Matrix<T, O>> for &Matrix<T, O> {
    type Output = Result<Matrix<T, O>>;

    fn mul(self, other: &Matrix<T, O>) -> Self::Output {
        self.mul_matrix(other)
    }
}

impl<T: MatrixElement, O: StorageOrder> Mul<T> for Matrix<T, O> {
    type Output = Matrix<T, O>;

    fn mul(mut self, factor: T) -> Self::Output {
        self.scale_in_place(factor);
        self
    }
}

impl<T: MatrixElement, O: StorageOrder> MulAssign<T> for Matrix<T, O> {
    fn mul_assign(&mut self, factor: T) {
        self.scale_in_place(factor);
    }
}

impl<T: MatrixElement, O: StorageOrder> DivAssign<T> for Matrix<T, O> {
    fn div_assign(&mut self, divisor: T) {
        self.divide_in_place(divisor);
    }
}
