//! Per-matrix configuration
//!
//! Every matrix carries a [`MatrixConfig`]. Products inherit the
//! configuration of their left operand.

use spmx_core::{MatrixElement, DEFAULT_TOLERANCE};

/// Configuration for tolerance filtering, validation and parallel maps
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixConfig {
    /// Magnitude at or below which values are not stored
    pub tolerance: f64,
    /// Run structural validation on map and compressed construction
    pub validate: bool,
    /// Use rayon for element-wise scalar maps and the Frobenius reduction
    pub parallel: bool,
}

impl MatrixConfig {
    /// Set the zero tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enable or disable structural validation
    ///
    /// Debug builds always validate. Dimension checks are never skipped.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Enable or disable data-parallel element-wise maps
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Get the zero tolerance
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Whether structural validation runs in this build
    pub fn should_validate(&self) -> bool {
        self.validate || cfg!(debug_assertions)
    }

    /// Whether a value is small enough to be treated as structurally zero
    #[inline]
    pub fn is_negligible<T: MatrixElement>(&self, value: T) -> bool {
        value.magnitude() <= self.tolerance
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            validate: true,
            parallel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = MatrixConfig::default()
            .with_tolerance(1e-3)
            .with_validation(false)
            .with_parallel(true);

        assert_eq!(config.tolerance(), 1e-3);
        assert!(!config.validate);
        assert!(config.parallel);
    }

    #[test]
    fn test_negligible() {
        let config = MatrixConfig::default();
        assert_eq!(config.tolerance(), DEFAULT_TOLERANCE);

        assert!(config.is_negligible(0.0f64));
        assert!(config.is_negligible(-1e-9f64));
        assert!(config.is_negligible(DEFAULT_TOLERANCE));
        assert!(!config.is_negligible(2e-8f64));
        assert!(!config.is_negligible(-3i32));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let config = MatrixConfig::default().with_tolerance(0.5);
        let json = serde_json::to_string(&config).unwrap();
        let restored: MatrixConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
