//! Error types for unmess-core operations.
//!
//! Every failure in the engine is a deterministic input-contract violation
//! detected up front by [`crate::validate`]. Nothing is retried, so the
//! taxonomy is small and flat.
//!
//! # Usage
//!
//! ```rust
//! use unmess_core::{Error, Result};
//!
//! fn check_factor(factor: f64) -> Result<f64> {
//!     if !(-1.0..=1.0).contains(&factor) {
//!         return Err(Error::out_of_range("factor", -1.0, 1.0, factor));
//!     }
//!     Ok(factor)
//! }
//!
//! assert!(check_factor(1.5).is_err());
//! ```
//!
//! # Used By
//!
//! - `unmess-ops` - parameter and buffer validation
//! - `unmess-history` - state construction and history capacity

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the editing engine.
///
/// # Categories
///
/// - **Argument errors**: [`NullArgument`](Error::NullArgument), [`OutOfRange`](Error::OutOfRange)
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions), [`DimensionsTooLarge`](Error::DimensionsTooLarge)
/// - **Format errors**: [`UnsupportedFormat`](Error::UnsupportedFormat)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A required argument was absent.
    #[error("argument `{name}` is required but was not provided")]
    NullArgument {
        /// Argument name
        name: String,
    },

    /// A numeric argument fell outside its inclusive range.
    ///
    /// Integer-valued arguments are reported in the same variant with their
    /// bounds widened to `f64`.
    ///
    /// ```rust
    /// use unmess_core::Error;
    ///
    /// let err = Error::out_of_range("brightness", -1.0, 1.0, 1.5);
    /// assert!(err.to_string().contains("1.5"));
    /// ```
    #[error("`{name}` must be between {min} and {max}, got {actual}")]
    OutOfRange {
        /// Argument name
        name: String,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
        /// Rejected value
        actual: f64,
    },

    /// Width or height is zero, or the pixel data does not match them.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// Width or height exceeds the configured maximum.
    #[error("image dimensions ({width}x{height}) exceed maximum allowed ({max_width}x{max_height})")]
    DimensionsTooLarge {
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
        /// Configured maximum width
        max_width: u32,
        /// Configured maximum height
        max_height: u32,
    },

    /// File format tag is not in the supported set.
    #[error("unsupported image format: {format}")]
    UnsupportedFormat {
        /// Format tag or extension as given
        format: String,
    },
}

impl Error {
    /// Creates an [`Error::NullArgument`] error.
    #[inline]
    pub fn null_argument(name: impl Into<String>) -> Self {
        Self::NullArgument { name: name.into() }
    }

    /// Creates an [`Error::OutOfRange`] error.
    #[inline]
    pub fn out_of_range(name: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        Self::OutOfRange {
            name: name.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionsTooLarge`] error.
    #[inline]
    pub fn dimensions_too_large(width: u32, height: u32, max_width: u32, max_height: u32) -> Self {
        Self::DimensionsTooLarge {
            width,
            height,
            max_width,
            max_height,
        }
    }

    /// Creates an [`Error::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Returns `true` for [`Error::OutOfRange`].
    #[inline]
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Returns `true` for either dimension error.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::DimensionsTooLarge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = Error::out_of_range("brightness", -1.0, 1.0, 1.5);
        let msg = err.to_string();
        assert!(msg.contains("brightness"));
        assert!(msg.contains("-1"));
        assert!(msg.contains("1.5"));
        assert!(err.is_range_error());
        assert!(!err.is_dimension_error());
    }

    #[test]
    fn test_dimension_errors() {
        let err = Error::invalid_dimensions(0, 10, "width is zero");
        assert!(err.to_string().contains("0x10"));
        assert!(err.is_dimension_error());

        let err = Error::dimensions_too_large(9000, 100, 8192, 8192);
        let msg = err.to_string();
        assert!(msg.contains("9000x100"));
        assert!(msg.contains("8192x8192"));
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_null_and_format() {
        assert!(Error::null_argument("image").to_string().contains("image"));
        assert!(Error::unsupported_format("tga").to_string().contains("tga"));
    }
}
