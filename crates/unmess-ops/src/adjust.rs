//! Per-pixel tone and color adjustments.
//!
//! All functions here are point operations: each output pixel depends only
//! on the input pixel at the same coordinate. Color channels are clamped to
//! `[0, 1]`; alpha passes through untouched.
//!
//! # Operations
//!
//! - [`brightness`] - additive offset
//! - [`contrast`] - scale around mid-gray (0.5)
//! - [`saturation`] - scale away from Rec.709 luminance
//! - [`grayscale`] - luminosity method
//! - [`sepia`] - classic sepia matrix
//! - [`invert`] - channel complement
//!
//! A factor of exactly 0 returns an unmodified copy of the input.
//!
//! # Example
//!
//! ```rust
//! use unmess_core::{PixelBuffer, RgbaBuffer};
//! use unmess_ops::adjust::brightness;
//!
//! let src = RgbaBuffer::filled(2, 2, [0.5, 0.5, 0.5, 1.0]);
//! let out = brightness(&src, 0.25).unwrap();
//! assert_eq!(out.pixel(0, 0), [0.75, 0.75, 0.75, 1.0]);
//! ```

use crate::parallel::map_pixels;
use tracing::trace;
use unmess_core::config::{BRIGHTNESS_RANGE, CONTRAST_RANGE, SATURATION_RANGE};
use unmess_core::validate::{require_in_range, require_non_empty};
use unmess_core::{clamp01, luminance_rec709, PixelBuffer, Result, RgbaBuffer};

/// Contrast pivot (mid-gray).
pub const CONTRAST_PIVOT: f32 = 0.5;

/// Sepia transformation matrix, row per output channel.
pub const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Adds `factor` to each color channel.
///
/// # Arguments
///
/// * `factor` - Offset in `[-1, 1]`; -1 drives every pixel to black, 1 to white
///
/// # Errors
///
/// [`unmess_core::Error::OutOfRange`] if `factor` is outside `[-1, 1]`,
/// [`unmess_core::Error::InvalidDimensions`] for an empty buffer.
pub fn brightness<B: PixelBuffer + ?Sized>(src: &B, factor: f32) -> Result<RgbaBuffer> {
    let factor = require_in_range(
        factor,
        *BRIGHTNESS_RANGE.start(),
        *BRIGHTNESS_RANGE.end(),
        "brightness",
    )?;
    require_non_empty(src)?;
    trace!(width = src.width(), height = src.height(), factor, "brightness");

    if factor == 0.0 {
        return Ok(RgbaBuffer::from_buffer(src));
    }
    map_pixels(src, |[r, g, b, a]| {
        [clamp01(r + factor), clamp01(g + factor), clamp01(b + factor), a]
    })
}

/// Scales each color channel's distance from mid-gray by `1 + factor`.
///
/// Mid-gray itself is a fixed point for every factor.
///
/// # Arguments
///
/// * `factor` - In `[-1, 1]`; -1 flattens to gray, 1 doubles contrast
pub fn contrast<B: PixelBuffer + ?Sized>(src: &B, factor: f32) -> Result<RgbaBuffer> {
    let factor = require_in_range(
        factor,
        *CONTRAST_RANGE.start(),
        *CONTRAST_RANGE.end(),
        "contrast",
    )?;
    require_non_empty(src)?;
    trace!(width = src.width(), height = src.height(), factor, "contrast");

    if factor == 0.0 {
        return Ok(RgbaBuffer::from_buffer(src));
    }
    let scale = 1.0 + factor;
    let apply = move |c: f32| clamp01((c - CONTRAST_PIVOT) * scale + CONTRAST_PIVOT);
    map_pixels(src, |[r, g, b, a]| [apply(r), apply(g), apply(b), a])
}

/// Interpolates each color channel away from (or toward) its luminance.
///
/// # Arguments
///
/// * `factor` - In `[-1, 1]`; -1 yields grayscale, 1 doubles chroma
pub fn saturation<B: PixelBuffer + ?Sized>(src: &B, factor: f32) -> Result<RgbaBuffer> {
    let factor = require_in_range(
        factor,
        *SATURATION_RANGE.start(),
        *SATURATION_RANGE.end(),
        "saturation",
    )?;
    require_non_empty(src)?;
    trace!(width = src.width(), height = src.height(), factor, "saturation");

    if factor == 0.0 {
        return Ok(RgbaBuffer::from_buffer(src));
    }
    let scale = 1.0 + factor;
    map_pixels(src, |[r, g, b, a]| {
        let gray = luminance_rec709(r, g, b);
        [
            clamp01(gray + (r - gray) * scale),
            clamp01(gray + (g - gray) * scale),
            clamp01(gray + (b - gray) * scale),
            a,
        ]
    })
}

/// Converts to grayscale with the Rec.709 luminosity weights.
///
/// Idempotent: a gray pixel maps onto itself.
pub fn grayscale<B: PixelBuffer + ?Sized>(src: &B) -> Result<RgbaBuffer> {
    require_non_empty(src)?;
    trace!(width = src.width(), height = src.height(), "grayscale");

    map_pixels(src, |[r, g, b, a]| {
        let y = clamp01(luminance_rec709(r, g, b));
        [y, y, y, a]
    })
}

/// Applies the sepia tone matrix ([`SEPIA_MATRIX`]).
pub fn sepia<B: PixelBuffer + ?Sized>(src: &B) -> Result<RgbaBuffer> {
    require_non_empty(src)?;
    trace!(width = src.width(), height = src.height(), "sepia");

    map_pixels(src, |[r, g, b, a]| {
        let row = |m: [f32; 3]| clamp01(m[0] * r + m[1] * g + m[2] * b);
        [
            row(SEPIA_MATRIX[0]),
            row(SEPIA_MATRIX[1]),
            row(SEPIA_MATRIX[2]),
            a,
        ]
    })
}

/// Replaces each color channel `c` with `1 - c`.
///
/// Inverting twice restores the input only to `f32` precision: `1 - c`
/// rounds for most values, including many 8-bit levels (`0.1` comes back
/// as `0.100000024`). Channels on a power-of-two grid round-trip exactly.
pub fn invert<B: PixelBuffer + ?Sized>(src: &B) -> Result<RgbaBuffer> {
    require_non_empty(src)?;
    trace!(width = src.width(), height = src.height(), "invert");

    map_pixels(src, |[r, g, b, a]| [1.0 - r, 1.0 - g, 1.0 - b, a])
}
