//! Error types for SPMX operations

/// Contract violations reported by sparse matrix operations
///
/// Every variant is detected synchronously at the offending call. The matrix
/// involved is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpmxError {
    /// A dimension was zero at construction
    InvalidDimension,
    /// A coordinate lies outside `[0, first) x [0, second)`
    OutOfBounds,
    /// Offsets, indices or values violate the compressed layout
    MalformedCompressedForm,
    /// Element-level write attempted while the matrix is compressed
    CompressedMutation,
    /// Operand shapes are incompatible
    DimensionMismatch,
}

impl core::fmt::Display for SpmxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            SpmxError::InvalidDimension => "Matrix dimensions must be positive",
            SpmxError::OutOfBounds => "Index out of bounds",
            SpmxError::MalformedCompressedForm => "Malformed compressed storage",
            SpmxError::CompressedMutation => "Cannot mutate elements of a compressed matrix",
            SpmxError::DimensionMismatch => "Operand dimensions do not match",
        };
        write!(f, "{msg}")
    }
}

impl core::error::Error for SpmxError {}

/// Result type for SPMX operations
pub type Result<T> = core::result::Result<T, SpmxError>;
