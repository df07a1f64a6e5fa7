//! Matrix norm kinds

/// Norms a sparse matrix can compute
///
/// `One` and `Infinity` are storage-relative: `One` takes the largest sum
/// over secondary indices, `Infinity` the largest sum over primary lines.
/// Under row-major storage these are the usual column-sum and row-sum norms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Norm {
    /// Maximum absolute sum over secondary indices
    One,
    /// Maximum absolute sum over primary lines
    Infinity,
    /// Square root of the sum of squared magnitudes
    #[default]
    Frobenius,
}

impl Norm {
    /// Every norm kind, in declaration order
    pub const ALL: [Norm; 3] = [Norm::One, Norm::Infinity, Norm::Frobenius];
}

impl core::fmt::Display for Norm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Norm::One => write!(f, "one"),
            Norm::Infinity => write!(f, "infinity"),
            Norm::Frobenius => write!(f, "frobenius"),
        }
    }
}
