//! Dimension and coordinate validation
//!
//! All coordinates here are storage coordinates: `primary` indexes the
//! lines, `secondary` the positions within a line.

use crate::SpmxError;
use core::ops::Range;

/// Validate that both storage dimensions are positive
pub const fn validate_dimensions(first: usize, second: usize) -> Result<(), SpmxError> {
    if first == 0 || second == 0 {
        return Err(SpmxError::InvalidDimension);
    }
    Ok(())
}

/// Validate that a coordinate lies in `[0, first) x [0, second)`
pub const fn validate_coordinate(
    primary: usize,
    secondary: usize,
    first: usize,
    second: usize,
) -> Result<(), SpmxError> {
    if primary >= first || secondary >= second {
        return Err(SpmxError::OutOfBounds);
    }
    Ok(())
}

/// Validate a half-open index range against an exclusive bound
pub const fn validate_range(range: &Range<usize>, bound: usize) -> Result<(), SpmxError> {
    if range.start > range.end || range.end > bound {
        return Err(SpmxError::OutOfBounds);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimensions() {
        assert_eq!(validate_dimensions(1, 1), Ok(()));
        assert_eq!(validate_dimensions(300, 2), Ok(()));

        assert_eq!(validate_dimensions(0, 4), Err(SpmxError::InvalidDimension));
        assert_eq!(validate_dimensions(4, 0), Err(SpmxError::InvalidDimension));
    }

    #[test]
    fn test_validate_coordinate() {
        assert_eq!(validate_coordinate(0, 0, 3, 4), Ok(()));
        assert_eq!(validate_coordinate(2, 3, 3, 4), Ok(()));

        // The first index past either edge is rejected
        assert_eq!(validate_coordinate(3, 0, 3, 4), Err(SpmxError::OutOfBounds));
        assert_eq!(validate_coordinate(0, 4, 3, 4), Err(SpmxError::OutOfBounds));
    }

    #[test]
    fn test_validate_range() {
        assert_eq!(validate_range(&(0..3), 3), Ok(()));
        assert_eq!(validate_range(&(2..2), 3), Ok(()));

        assert_eq!(validate_range(&(1..4), 3), Err(SpmxError::OutOfBounds));
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = 2..1;
        assert_eq!(validate_range(&reversed, 3), Err(SpmxError::OutOfBounds));
    }
}
