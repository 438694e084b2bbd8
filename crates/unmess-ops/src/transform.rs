//! Geometric transformation operations.
//!
//! # Operations
//!
//! - [`rotate_90`] - quarter turn, either direction (swaps width and height)
//! - [`flip`] - mirror on either axis
//!
//! [`rotate_90_cw`], [`rotate_90_ccw`], [`flip_h`] and [`flip_v`] are the
//! fixed-direction forms.
//!
//! # Example
//!
//! ```rust
//! use unmess_core::{PixelBuffer, RgbaBuffer};
//! use unmess_ops::transform::{flip_h, rotate_90_cw};
//!
//! let src = RgbaBuffer::new(4, 2);
//! let rotated = rotate_90_cw(&src).unwrap();
//! assert_eq!(rotated.dimensions(), (2, 4));
//!
//! let flipped = flip_h(&src).unwrap();
//! assert_eq!(flipped.dimensions(), (4, 2));
//! ```

use crate::parallel::render;
use tracing::trace;
use unmess_core::validate::require_non_empty;
use unmess_core::{PixelBuffer, Result, RgbaBuffer};

/// Rotates 90 degrees.
///
/// Output is `height x width`. Clockwise maps source `(x, y)` to
/// `(H-1-y, x)`; counter-clockwise maps it to `(y, W-1-x)`.
pub fn rotate_90<B: PixelBuffer + ?Sized>(src: &B, clockwise: bool) -> Result<RgbaBuffer> {
    require_non_empty(src)?;
    let (width, height) = src.dimensions();
    trace!(width, height, clockwise, "rotate_90");

    // Iterate the output and pull from the inverse mapping
    if clockwise {
        render(height, width, |ox, oy| src.pixel(oy, height - 1 - ox))
    } else {
        render(height, width, |ox, oy| src.pixel(width - 1 - oy, ox))
    }
}

/// Rotates 90 degrees clockwise.
pub fn rotate_90_cw<B: PixelBuffer + ?Sized>(src: &B) -> Result<RgbaBuffer> {
    rotate_90(src, true)
}

/// Rotates 90 degrees counter-clockwise.
pub fn rotate_90_ccw<B: PixelBuffer + ?Sized>(src: &B) -> Result<RgbaBuffer> {
    rotate_90(src, false)
}

/// Mirrors the image.
///
/// Horizontal maps `(x, y)` to `(W-1-x, y)`; vertical maps it to
/// `(x, H-1-y)`. Dimensions are unchanged.
pub fn flip<B: PixelBuffer + ?Sized>(src: &B, horizontal: bool) -> Result<RgbaBuffer> {
    require_non_empty(src)?;
    let (width, height) = src.dimensions();
    trace!(width, height, horizontal, "flip");

    if horizontal {
        render(width, height, |x, y| src.pixel(width - 1 - x, y))
    } else {
        render(width, height, |x, y| src.pixel(x, height - 1 - y))
    }
}

/// Flips image horizontally (left-right mirror).
pub fn flip_h<B: PixelBuffer + ?Sized>(src: &B) -> Result<RgbaBuffer> {
    flip(src, true)
}

/// Flips image vertically (top-bottom mirror).
pub fn flip_v<B: PixelBuffer + ?Sized>(src: &B) -> Result<RgbaBuffer> {
    flip(src, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Red and green channels hold the source coordinate.
    fn tagged(width: u32, height: u32) -> RgbaBuffer {
        RgbaBuffer::from_fn(width, height, |x, y| [x as f32, y as f32, 0.0, 1.0])
    }

    fn source_of(buf: &RgbaBuffer, x: u32, y: u32) -> (u32, u32) {
        let [sx, sy, _, _] = buf.pixel(x, y);
        (sx as u32, sy as u32)
    }

    #[test]
    fn test_rotate_cw_mapping() {
        let src = tagged(3, 2);
        let out = rotate_90_cw(&src).unwrap();
        assert_eq!(out.dimensions(), (2, 3));

        // Source (x, y) lands at (H-1-y, x)
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(source_of(&out, 2 - 1 - y, x), (x, y));
            }
        }
    }

    #[test]
    fn test_rotate_ccw_mapping() {
        let src = tagged(3, 2);
        let out = rotate_90_ccw(&src).unwrap();
        assert_eq!(out.dimensions(), (2, 3));

        // Source (x, y) lands at (y, W-1-x)
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(source_of(&out, y, 3 - 1 - x), (x, y));
            }
        }
    }

    #[test]
    fn test_rotate_cw_then_ccw() {
        let src = tagged(5, 3);
        let back = rotate_90_ccw(&rotate_90_cw(&src).unwrap()).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn test_four_rotations_identity() {
        let src = tagged(4, 7);
        let mut cur = src.clone();
        for _ in 0..4 {
            cur = rotate_90(&cur, true).unwrap();
        }
        assert_eq!(cur, src);
    }

    #[test]
    fn test_flip_h_mapping() {
        let src = tagged(3, 2);
        let out = flip_h(&src).unwrap();
        assert_eq!(source_of(&out, 0, 0), (2, 0));
        assert_eq!(source_of(&out, 2, 1), (0, 1));
        assert_eq!(source_of(&out, 1, 1), (1, 1));
    }

    #[test]
    fn test_flip_v_mapping() {
        let src = tagged(3, 2);
        let out = flip_v(&src).unwrap();
        assert_eq!(source_of(&out, 0, 0), (0, 1));
        assert_eq!(source_of(&out, 2, 1), (2, 0));
    }

    #[test]
    fn test_double_flip_identity() {
        let src = tagged(4, 3);
        assert_eq!(flip_h(&flip_h(&src).unwrap()).unwrap(), src);
        assert_eq!(flip_v(&flip_v(&src).unwrap()).unwrap(), src);
    }

    #[test]
    fn test_single_pixel() {
        let src = RgbaBuffer::filled(1, 1, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(rotate_90_cw(&src).unwrap(), src);
        assert_eq!(flip_v(&src).unwrap(), src);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(rotate_90_cw(&RgbaBuffer::new(0, 3)).is_err());
        assert!(flip_h(&RgbaBuffer::new(3, 0)).is_err());
    }
}
