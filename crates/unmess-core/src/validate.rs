//! Argument validation shared by every public entry point.
//!
//! Each check either returns the validated value or a typed [`Error`]; none
//! of them log or mutate anything. Callers run all checks before touching a
//! pixel so that a failure never leaves partial output behind.
//!
//! ```rust
//! use unmess_core::validate::{require_in_range, require_positive};
//!
//! assert_eq!(require_in_range(0.5f32, -1.0, 1.0, "factor").unwrap(), 0.5);
//! assert!(require_in_range(11u32, 0, 10, "radius").is_err());
//! assert!(require_positive(0usize, "capacity").is_err());
//! ```

use crate::buffer::PixelBuffer;
use crate::config::Limits;
use crate::{Error, Result};

/// Numeric types accepted by the range checks.
pub trait Bounded: Copy + PartialOrd {
    /// The additive identity.
    const ZERO: Self;

    /// Lossy widening used for error reporting.
    fn to_f64(self) -> f64;
}

macro_rules! impl_bounded {
    ($($t:ty => $zero:expr),* $(,)?) => {
        $(
            impl Bounded for $t {
                const ZERO: Self = $zero;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_bounded!(
    f32 => 0.0,
    f64 => 0.0,
    i32 => 0,
    i64 => 0,
    u32 => 0,
    u64 => 0,
    usize => 0,
);

/// Unwraps a required argument.
///
/// # Errors
///
/// [`Error::NullArgument`] if `value` is `None`.
#[inline]
pub fn require_non_null<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| Error::null_argument(name))
}

/// Checks that `value` lies in `[min, max]` (inclusive).
///
/// NaN is always out of range.
///
/// # Errors
///
/// [`Error::OutOfRange`] carrying the bounds and the rejected value.
#[inline]
pub fn require_in_range<T: Bounded>(value: T, min: T, max: T, name: &str) -> Result<T> {
    if value >= min && value <= max {
        Ok(value)
    } else {
        Err(Error::out_of_range(
            name,
            min.to_f64(),
            max.to_f64(),
            value.to_f64(),
        ))
    }
}

/// Checks that `value` is strictly greater than zero.
///
/// # Errors
///
/// [`Error::OutOfRange`] with `min = 0` and `max = +inf`.
#[inline]
pub fn require_positive<T: Bounded>(value: T, name: &str) -> Result<T> {
    if value > T::ZERO {
        Ok(value)
    } else {
        Err(Error::out_of_range(
            name,
            0.0,
            f64::INFINITY,
            value.to_f64(),
        ))
    }
}

/// Checks that a buffer has at least one pixel.
///
/// # Errors
///
/// [`Error::InvalidDimensions`] if width or height is zero.
#[inline]
pub fn require_non_empty<B: PixelBuffer + ?Sized>(buffer: &B) -> Result<()> {
    let (w, h) = buffer.dimensions();
    if w == 0 || h == 0 {
        return Err(Error::invalid_dimensions(w, h, "width and height must be > 0"));
    }
    Ok(())
}

/// Checks a buffer against load-time limits.
///
/// # Errors
///
/// - [`Error::InvalidDimensions`] if width or height is zero
/// - [`Error::DimensionsTooLarge`] if either exceeds `limits`
pub fn validate_buffer_dimensions<B: PixelBuffer + ?Sized>(
    buffer: &B,
    limits: &Limits,
) -> Result<()> {
    let (w, h) = buffer.dimensions();
    validate_dimensions(w, h, limits)
}

/// Checks raw dimensions against load-time limits.
///
/// Lets a decoder reject an image from its header, before any pixels are
/// allocated. Same errors as [`validate_buffer_dimensions`].
pub fn validate_dimensions(width: u32, height: u32, limits: &Limits) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    if width > limits.max_width || height > limits.max_height {
        return Err(Error::dimensions_too_large(
            width,
            height,
            limits.max_width,
            limits.max_height,
        ));
    }
    Ok(())
}

/// Checks a file extension against an allowed set, case-insensitively.
///
/// Returns the lower-cased extension.
///
/// # Errors
///
/// [`Error::UnsupportedFormat`] if the extension is not allowed.
pub fn validate_file_extension(extension: &str, allowed: &[&str]) -> Result<String> {
    let lower = extension.to_ascii_lowercase();
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(&lower)) {
        Ok(lower)
    } else {
        Err(Error::unsupported_format(extension))
    }
}
