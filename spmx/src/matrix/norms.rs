//! Matrix norms
//!
//! All norms accumulate magnitudes in `f64`. The One and Infinity norms sum
//! along the storage axes: One takes the largest secondary bucket, Infinity
//! the largest primary line. Under column-major ordering they therefore
//! report the logical row and column sums respectively.

use rayon::prelude::*;
use spmx_core::{MatrixElement, Norm, StorageOrder};

use super::{Matrix, Storage};

impl<T: MatrixElement, O: StorageOrder> Matrix<T, O> {
    /// Compute the requested norm
    pub fn norm(&self, norm: Norm) -> f64 {
        match norm {
            Norm::One => self.one_norm(),
            Norm::Infinity => self.infinity_norm(),
            Norm::Frobenius => self.frobenius_norm(),
        }
    }

    /// Largest summed magnitude over secondary indices
    pub fn one_norm(&self) -> f64 {
        let mut sums = vec![0.0; self.second];
        for (_, secondary, value) in self.entries() {
            sums[secondary] += value.magnitude();
        }

        sums.into_iter().fold(0.0, f64::max)
    }

    /// Largest summed magnitude over primary lines
    pub fn infinity_norm(&self) -> f64 {
        match &self.storage {
            Storage::Compressed(compressed) => (0..self.first)
                .map(|primary| {
                    compressed.values[compressed.line(primary)]
                        .iter()
                        .map(|value| value.magnitude())
                        .sum::<f64>()
                })
                .fold(0.0, f64::max),
            Storage::Coordinate(elements) => {
                let mut sums = vec![0.0; self.first];
                for (&(primary, _), value) in elements {
                    sums[primary] += value.magnitude();
                }

                sums.into_iter().fold(0.0, f64::max)
            }
        }
    }

    /// Square root of the summed squared magnitudes
    pub fn frobenius_norm(&self) -> f64 {
        let squared = |value: &T| {
            let magnitude = value.magnitude();
            magnitude * magnitude
        };

        let sum: f64 = match &self.storage {
            Storage::Compressed(compressed) if self.config.parallel => {
                compressed.values.par_iter().map(squared).sum()
            }
            Storage::Compressed(compressed) => compressed.values.iter().map(squared).sum(),
            Storage::Coordinate(elements) => elements.values().map(squared).sum(),
        };

        sum.sqrt()
    }
}
