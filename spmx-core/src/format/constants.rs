//! Format constants for SPMX matrices

/// Magnitude at or below which a value is treated as structurally zero
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Matrix Market text format constants
pub mod market {
    /// Leading token of the banner line
    pub const BANNER_PREFIX: &str = "%%MatrixMarket";

    /// Object field of the banner
    pub const OBJECT: &str = "matrix";

    /// Format field of the banner, only coordinate text is supported
    pub const FORMAT: &str = "coordinate";

    /// Symmetry field of the banner, entries are always listed in full
    pub const SYMMETRY: &str = "general";

    /// Comment marker
    pub const COMMENT: char = '%';
}
