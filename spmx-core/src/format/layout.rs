//! Storage format tags

/// Storage formats a matrix can be held in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixFormat {
    /// Coordinate (COO) format - ordered (primary, secondary) -> value map
    Coo = 0,
    /// Compressed Sparse Row (CSR) format
    Csr = 1,
    /// Compressed Sparse Column (CSC) format
    Csc = 2,
}

impl MatrixFormat {
    /// Whether this is one of the compressed formats
    pub const fn is_compressed(self) -> bool {
        !matches!(self, MatrixFormat::Coo)
    }
}

impl core::fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixFormat::Coo => write!(f, "COO"),
            MatrixFormat::Csr => write!(f, "CSR"),
            MatrixFormat::Csc => write!(f, "CSC"),
        }
    }
}
