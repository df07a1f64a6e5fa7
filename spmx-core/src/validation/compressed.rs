//! Structural validation of compressed (CSR/CSC) storage

use crate::SpmxError;

/// Validate an offsets / indices / values triple for a `first x second`
/// storage shape
///
/// Requirements:
/// - `offsets.len() == first + 1`, starting at 0 and non-decreasing
/// - `offsets[first] == indices.len() == values.len()`
/// - within each line, indices strictly increase and stay below `second`
pub fn validate_compressed_form<T>(
    first: usize,
    second: usize,
    offsets: &[usize],
    indices: &[usize],
    values: &[T],
) -> Result<(), SpmxError> {
    if offsets.len() != first + 1 || offsets[0] != 0 {
        return Err(SpmxError::MalformedCompressedForm);
    }

    let nnz = offsets[first];
    if nnz != indices.len() || nnz != values.len() {
        return Err(SpmxError::MalformedCompressedForm);
    }

    for bounds in offsets.windows(2) {
        let (start, end) = (bounds[0], bounds[1]);
        if start > end || end > nnz {
            return Err(SpmxError::MalformedCompressedForm);
        }

        let line = &indices[start..end];
        if line.iter().any(|&index| index >= second) {
            return Err(SpmxError::MalformedCompressedForm);
        }
        if line.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(SpmxError::MalformedCompressedForm);
        }
    }

    Ok(())
}
