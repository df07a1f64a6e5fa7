//! Compression and decompression between the two storage bodies

use std::collections::BTreeMap;

use spmx_core::{MatrixElement, StorageOrder};
use tracing::trace;

use super::{CompressedStorage, CoordinateMap, Matrix, Storage};

impl<T: MatrixElement, O: StorageOrder> Matrix<T, O> {
    /// Move from coordinate storage to compressed storage
    ///
    /// Values whose magnitude does not exceed the tolerance are dropped.
    /// No-op when already compressed.
    pub fn compress(&mut self) {
        let Storage::Coordinate(elements) = &mut self.storage else {
            return;
        };

        let elements = std::mem::take(elements);
        let stored = elements.len();
        let compressed = compress_lines(self.first, elements, self.config.tolerance);

        trace!(
            first = self.first,
            second = self.second,
            nnz = compressed.nnz(),
            dropped = stored - compressed.nnz(),
            "compressed coordinate storage"
        );

        self.storage = Storage::Compressed(compressed);
    }

    /// Move from compressed storage back to coordinate storage
    ///
    /// No-op when already uncompressed.
    pub fn uncompress(&mut self) {
        let Storage::Compressed(compressed) = &mut self.storage else {
            return;
        };

        let compressed = std::mem::take(compressed);
        let elements = expand_lines(compressed, self.config.tolerance);

        trace!(
            first = self.first,
            second = self.second,
            nnz = elements.len(),
            "uncompressed to coordinate storage"
        );

        self.storage = Storage::Coordinate(elements);
    }
}

/// Build compressed storage in one pass over the ordered map
///
/// The map's lexicographic order is already line-then-secondary order, so
/// no sorting is needed.
pub(crate) fn compress_lines<T: MatrixElement>(
    first: usize,
    elements: CoordinateMap<T>,
    tolerance: f64,
) -> CompressedStorage<T> {
    let mut offsets = Vec::with_capacity(first + 1);
    let mut indices = Vec::with_capacity(elements.len());
    let mut values = Vec::with_capacity(elements.len());

    offsets.push(0);
    let mut line = 0;

    for ((primary, secondary), value) in elements {
        // Close every line before this entry's
        while line < primary {
            offsets.push(indices.len());
            line += 1;
        }

        if value.magnitude() > tolerance {
            indices.push(secondary);
            values.push(value);
        }
    }

    while line < first {
        offsets.push(indices.len());
        line += 1;
    }

    CompressedStorage {
        offsets,
        indices,
        values,
    }
}

/// Rebuild the coordinate map from compressed storage
pub(crate) fn expand_lines<T: MatrixElement>(
    compressed: CompressedStorage<T>,
    tolerance: f64,
) -> CoordinateMap<T> {
    let mut elements = BTreeMap::new();

    for (primary, bounds) in compressed.offsets.windows(2).enumerate() {
        for position in bounds[0]..bounds[1] {
            let value = compressed.values[position];
            if value.magnitude() > tolerance {
                elements.insert((primary, compressed.indices[position]), value);
            }
        }
    }

    elements
}

impl<T: MatrixElement> CompressedStorage<T> {
    /// Remove stored values at or below `tolerance`, keeping the layout valid
    pub(crate) fn prune(&mut self, tolerance: f64) {
        let mut write = 0;
        let mut start = 0;

        for line in 0..self.offsets.len().saturating_sub(1) {
            let end = self.offsets[line + 1];

            for read in start..end {
                if self.values[read].magnitude() > tolerance {
                    self.indices[write] = self.indices[read];
                    self.values[write] = self.values[read];
                    write += 1;
                }
            }

            start = end;
            self.offsets[line + 1] = write;
        }

        self.indices.truncate(write);
        self.values.truncate(write);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixConfig;
    use spmx_core::{validate_compressed_form, ColumnMajor, RowMajor};

    fn sample() -> CoordinateMap<f64> {
        [((0, 1), 1.0), ((0, 3), 2.0), ((2, 0), 3.0), ((3, 3), 4.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_compress_layout() {
        let mut matrix: Matrix<f64, RowMajor> = Matrix::from_map(4, 4, sample()).unwrap();
        matrix.compress();

        let (offsets, indices, values) = matrix.compressed_parts().unwrap();
        assert_eq!(offsets, &[0, 2, 2, 3, 4]);
        assert_eq!(indices, &[1, 3, 0, 3]);
        assert_eq!(values, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(validate_compressed_form(4, 4, offsets, indices, values), Ok(()));
        assert!(matrix.coordinates().is_none());
    }

    #[test]
    fn test_trailing_empty_lines() {
        let elements = [((0, 0), 1.0)].into_iter().collect();
        let compressed = compress_lines(4, elements, 1e-8);
        assert_eq!(compressed.offsets, vec![0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_round_trip() {
        let mut matrix: Matrix<f64, ColumnMajor> = Matrix::from_map(4, 4, sample()).unwrap();
        matrix.compress();
        matrix.uncompress();

        assert_eq!(matrix.coordinates(), Some(&sample()));
    }

    #[test]
    fn test_idempotence() {
        let mut once: Matrix<f64> = Matrix::from_map(4, 4, sample()).unwrap();
        once.compress();
        let mut twice = once.clone();
        twice.compress();
        assert_eq!(once, twice);

        once.uncompress();
        let mut again = once.clone();
        again.uncompress();
        assert_eq!(once, again);
    }

    #[test]
    fn test_tolerance_filtering() {
        let mut matrix: Matrix<f64> = Matrix::new(2, 2).unwrap();
        *matrix.get_mut(1, 1).unwrap() = 1e-12;
        *matrix.get_mut(0, 0).unwrap() = 1.0;
        assert_eq!(matrix.nnz(), 2);

        matrix.compress();
        let (offsets, _, _) = matrix.compressed_parts().unwrap();
        assert_eq!(offsets, &[0, 1, 1]);
        assert_eq!(matrix.nnz(), 1);
    }

    #[test]
    fn test_configured_tolerance() {
        let config = MatrixConfig::default().with_tolerance(0.5);
        let mut matrix: Matrix<f64> = Matrix::from_map_with_config(4, 4, sample(), config).unwrap();
        matrix.scale_in_place(0.2);
        // 0.2, 0.4 are dropped; 0.6 and 0.8 survive
        assert_eq!(matrix.nnz(), 2);

        matrix.compress();
        assert_eq!(matrix.compressed_parts().unwrap().1, &[0, 3]);
    }

    #[test]
    fn test_prune() {
        let mut compressed = CompressedStorage {
            offsets: vec![0, 2, 3, 5],
            indices: vec![0, 1, 2, 0, 2],
            values: vec![1.0, 0.0, 0.0, 2.0, 0.0],
        };
        compressed.prune(1e-8);

        assert_eq!(compressed.offsets, vec![0, 1, 1, 2]);
        assert_eq!(compressed.indices, vec![0, 0]);
        assert_eq!(compressed.values, vec![1.0, 2.0]);
    }
}
