//! Pixel buffer capability and the engine's owned RGBA buffer.
//!
//! The engine only needs point reads, point writes, and the dimensions of a
//! grid of normalized RGBA pixels. That capability is expressed as two
//! traits so that any backing store (packed bytes from a decoder, a GPU
//! readback, a test fixture) can feed the algorithms:
//!
//! - [`PixelBuffer`] - read access, consumed by every algorithm
//! - [`PixelBufferMut`] - write access
//!
//! [`RgbaBuffer`] is the concrete buffer the algorithms produce.
//!
//! # Memory Layout
//!
//! Row-major, top-to-bottom, interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//! ```
//!
//! # Sharing
//!
//! Pixel data sits behind an [`Arc`], so cloning a buffer is cheap. Writes go
//! through [`Arc::make_mut`], which copies the data first if anyone else
//! still holds it. Two clones therefore never observe each other's writes,
//! which is the immutability guarantee image states rely on.
//!
//! ```rust
//! use unmess_core::{PixelBuffer, PixelBufferMut, RgbaBuffer};
//!
//! let a = RgbaBuffer::filled(2, 2, [0.5, 0.5, 0.5, 1.0]);
//! let mut b = a.clone();
//! b.set_pixel(0, 0, [1.0, 0.0, 0.0, 1.0]);
//! assert_eq!(a.pixel(0, 0), [0.5, 0.5, 0.5, 1.0]);
//! assert_eq!(b.pixel(0, 0), [1.0, 0.0, 0.0, 1.0]);
//! ```

use crate::pixel::Rgba;
use crate::{Error, Result};
use std::sync::Arc;

/// Channels per pixel.
pub const CHANNELS: usize = 4;

/// Read access to a rectangular grid of normalized RGBA pixels.
///
/// Implementors must be `Sync`: algorithms may read one input from several
/// threads at once.
pub trait PixelBuffer: Sync {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Reads the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// May panic if the coordinate is out of bounds.
    fn pixel(&self, x: u32, y: u32) -> Rgba;

    /// Returns `(width, height)`.
    #[inline]
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Write access to a pixel grid.
pub trait PixelBufferMut: PixelBuffer {
    /// Writes the pixel at `(x, y)`.
    fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba);
}

/// Owned, copy-on-write RGBA `f32` buffer.
#[derive(Clone, PartialEq)]
pub struct RgbaBuffer {
    data: Arc<Vec<f32>>,
    width: u32,
    height: u32,
}

impl RgbaBuffer {
    /// Creates a buffer of transparent black pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0.0; 4])
    }

    /// Creates a buffer with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Wraps interleaved RGBA data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 4`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Builds a buffer by evaluating `f` at every coordinate.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Copies any pixel buffer into an owned [`RgbaBuffer`].
    pub fn from_buffer<B: PixelBuffer + ?Sized>(src: &B) -> Self {
        Self::from_fn(src.width(), src.height(), |x, y| src.pixel(x, y))
    }

    /// Interleaved pixel data.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable pixel data, detaching from other clones first.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Consumes the buffer and returns its data, copying only if shared.
    pub fn into_data(self) -> Vec<f32> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if both buffers share the same allocation.
    #[inline]
    pub fn shares_data_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

impl PixelBuffer for RgbaBuffer {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = self.index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

impl PixelBufferMut for RgbaBuffer {
    #[inline]
    fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba) {
        let i = self.index(x, y);
        Arc::make_mut(&mut self.data)[i..i + CHANNELS].copy_from_slice(&pixel);
    }
}

impl std::fmt::Debug for RgbaBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbaBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("shared", &(Arc::strong_count(&self.data) > 1))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data_length_mismatch() {
        let err = RgbaBuffer::from_data(2, 2, vec![0.0; 15]).unwrap_err();
        assert!(err.is_dimension_error());
        assert!(RgbaBuffer::from_data(2, 2, vec![0.0; 16]).is_ok());
    }

    #[test]
    fn test_row_major_layout() {
        let buf = RgbaBuffer::from_fn(3, 2, |x, y| [x as f32, y as f32, 0.0, 1.0]);
        assert_eq!(buf.data().len(), 3 * 2 * 4);
        // (2, 1) is the last pixel
        assert_eq!(&buf.data()[20..24], &[2.0, 1.0, 0.0, 1.0]);
        assert_eq!(buf.pixel(1, 1), [1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_copy_on_write() {
        let a = RgbaBuffer::filled(4, 4, [0.25; 4]);
        let mut b = a.clone();
        assert!(a.shares_data_with(&b));

        b.set_pixel(3, 3, [1.0; 4]);
        assert!(!a.shares_data_with(&b));
        assert_eq!(a.pixel(3, 3), [0.25; 4]);
        assert_eq!(b.pixel(3, 3), [1.0; 4]);
    }

    #[test]
    fn test_data_mut_detaches() {
        let a = RgbaBuffer::filled(2, 1, [0.5; 4]);
        let mut b = a.clone();
        b.data_mut()[0] = 0.0;
        assert_eq!(b.data()[0], 0.0);
        assert_eq!(a.data()[0], 0.5);
        assert!(!a.shares_data_with(&b));
    }

    #[test]
    fn test_into_data_shared() {
        let a = RgbaBuffer::filled(1, 1, [0.5; 4]);
        let b = a.clone();
        assert_eq!(b.into_data(), vec![0.5; 4]);
        assert_eq!(a.pixel(0, 0), [0.5; 4]);
    }

    #[test]
    fn test_empty() {
        assert!(RgbaBuffer::new(0, 3).is_empty());
        assert!(!RgbaBuffer::new(1, 1).is_empty());
    }
}
