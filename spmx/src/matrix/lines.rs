//! Line-level kernels shared by extraction and the matrix product
//!
//! Both storage bodies can scatter one of their primary lines into a dense
//! buffer ([`LineSource`]) and can accumulate a dense weight vector against
//! all of their lines ([`LineCombiner`]). The matrix product composes the
//! two, giving one monomorphized kernel per compression-state pair.

use spmx_core::MatrixElement;

use super::{CompressedStorage, CoordinateMap};

/// Storage that can materialize a primary line densely
pub(crate) trait LineSource<T> {
    /// Write line `primary` into `dense`, indexed by secondary index
    ///
    /// Positions not stored in the line are left untouched.
    fn scatter(&self, primary: usize, dense: &mut [T]);
}

/// Storage that can be combined linearly against a dense weight vector
pub(crate) trait LineCombiner<T> {
    /// `product[s] += weights[p] * value(p, s)` over every stored entry
    fn combine(&self, weights: &[T], product: &mut [T]);
}

impl<T: MatrixElement> LineSource<T> for CompressedStorage<T> {
    fn scatter(&self, primary: usize, dense: &mut [T]) {
        for position in self.line(primary) {
            dense[self.indices[position]] = self.values[position];
        }
    }
}

impl<T: MatrixElement> LineSource<T> for CoordinateMap<T> {
    fn scatter(&self, primary: usize, dense: &mut [T]) {
        for (&(_, secondary), &value) in self.range((primary, 0)..(primary + 1, 0)) {
            dense[secondary] = value;
        }
    }
}

impl<T: MatrixElement> LineCombiner<T> for CompressedStorage<T> {
    fn combine(&self, weights: &[T], product: &mut [T]) {
        for (primary, &weight) in weights.iter().enumerate() {
            if weight == T::ZERO {
                continue;
            }
            for position in self.line(primary) {
                product[self.indices[position]] += weight * self.values[position];
            }
        }
    }
}

impl<T: MatrixElement> LineCombiner<T> for CoordinateMap<T> {
    fn combine(&self, weights: &[T], product: &mut [T]) {
        for (&(primary, secondary), &value) in self {
            product[secondary] += weights[primary] * value;
        }
    }
}
