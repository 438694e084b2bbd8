//! Convolution filters: Gaussian blur and sharpen.
//!
//! # Kernels
//!
//! - [`Kernel::gaussian`] - normalized Gaussian, sigma = radius / 3
//! - [`Kernel::sharpen`] - Laplacian-style 3x3 sharpen
//!
//! Out-of-bounds taps are clamped to the nearest edge pixel.
//!
//! # Example
//!
//! ```rust
//! use unmess_core::{PixelBuffer, RgbaBuffer};
//! use unmess_ops::filter::{gaussian_blur, Kernel};
//!
//! let k = Kernel::gaussian(2);
//! assert_eq!((k.width, k.height), (5, 5));
//!
//! let src = RgbaBuffer::filled(16, 16, [0.5, 0.5, 0.5, 1.0]);
//! let blurred = gaussian_blur(&src, 3).unwrap();
//! assert_eq!(blurred.dimensions(), (16, 16));
//! ```

use crate::parallel::render;
use tracing::{debug, trace};
use unmess_core::config::{BLUR_RADIUS_RANGE, SHARPEN_RANGE};
use unmess_core::pixel::clamp_coord;
use unmess_core::validate::{require_in_range, require_non_empty};
use unmess_core::{clamp01, PixelBuffer, Result, RgbaBuffer};

/// Convolution kernel for image filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Kernel weights, row-major.
    pub data: Vec<f32>,
    /// Kernel width (odd).
    pub width: usize,
    /// Kernel height (odd).
    pub height: usize,
}

/// How a convolution treats the alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaMode {
    /// Alpha is convolved and clamped like the color channels.
    Convolve,
    /// Alpha is copied from the source pixel.
    Preserve,
}

impl Kernel {
    /// Normalized 1D Gaussian weights of length `2 * radius + 1`.
    ///
    /// Sigma is `radius / 3`. Radius 0 yields the single weight `[1.0]`.
    pub fn gaussian_1d(radius: u32) -> Vec<f64> {
        if radius == 0 {
            return vec![1.0];
        }
        let sigma = radius as f64 / 3.0;
        let two_sigma2 = 2.0 * sigma * sigma;
        let r = radius as i64;

        let mut weights: Vec<f64> = (-r..=r)
            .map(|x| (-((x * x) as f64) / two_sigma2).exp())
            .collect();

        // Normalize
        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }
        weights
    }

    /// Square Gaussian kernel of side `2 * radius + 1`.
    ///
    /// Each weight is the product of two 1D weights, so the kernel is
    /// separable by construction and sums to 1.
    pub fn gaussian(radius: u32) -> Self {
        let k = Self::gaussian_1d(radius);
        let size = k.len();
        let mut data = Vec::with_capacity(size * size);
        for wy in &k {
            for wx in &k {
                data.push((wy * wx) as f32);
            }
        }
        Self {
            data,
            width: size,
            height: size,
        }
    }

    /// Creates a sharpening kernel.
    ///
    /// ```text
    /// [  0  -k   0 ]
    /// [ -k 1+4k -k ]
    /// [  0  -k   0 ]
    /// ```
    ///
    /// Weights sum to 1, so flat regions are preserved.
    pub fn sharpen(amount: f32) -> Self {
        let center = 1.0 + 4.0 * amount;
        Self {
            data: vec![
                0.0, -amount, 0.0,
                -amount, center, -amount,
                0.0, -amount, 0.0,
            ],
            width: 3,
            height: 3,
        }
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

/// Convolves `src` with `kernel` using clamp-to-edge addressing.
///
/// Color channels are clamped to `[0, 1]`; alpha follows `alpha`.
///
/// # Errors
///
/// [`unmess_core::Error::InvalidDimensions`] for an empty buffer.
pub fn convolve<B: PixelBuffer + ?Sized>(
    src: &B,
    kernel: &Kernel,
    alpha: AlphaMode,
) -> Result<RgbaBuffer> {
    require_non_empty(src)?;
    let (width, height) = src.dimensions();
    trace!(width, height, kernel_w = kernel.width, kernel_h = kernel.height, ?alpha, "convolve");

    let (rx, ry) = kernel.radius();
    let (rx, ry) = (rx as i64, ry as i64);

    render(width, height, |x, y| {
        let mut sums = [0.0f32; 4];

        for ky in 0..kernel.height {
            let sy = clamp_coord(y as i64 + ky as i64 - ry, height);
            for kx in 0..kernel.width {
                let sx = clamp_coord(x as i64 + kx as i64 - rx, width);
                let kw = kernel.data[ky * kernel.width + kx];
                let px = src.pixel(sx, sy);
                for c in 0..4 {
                    sums[c] += px[c] * kw;
                }
            }
        }

        let a = match alpha {
            AlphaMode::Convolve => clamp01(sums[3]),
            AlphaMode::Preserve => src.pixel(x, y)[3],
        };
        [clamp01(sums[0]), clamp01(sums[1]), clamp01(sums[2]), a]
    })
}

/// Gaussian blur of integer `radius` in `[0, 10]`.
///
/// All four channels, alpha included, are blurred. Radius 0 returns an
/// unmodified copy.
///
/// # Errors
///
/// [`unmess_core::Error::OutOfRange`] if `radius > 10`.
pub fn gaussian_blur<B: PixelBuffer + ?Sized>(src: &B, radius: u32) -> Result<RgbaBuffer> {
    let radius = require_in_range(
        radius,
        *BLUR_RADIUS_RANGE.start(),
        *BLUR_RADIUS_RANGE.end(),
        "blur radius",
    )?;
    require_non_empty(src)?;

    if radius == 0 {
        return Ok(RgbaBuffer::from_buffer(src));
    }
    debug!(width = src.width(), height = src.height(), radius, "Applying gaussian blur");
    convolve(src, &Kernel::gaussian(radius), AlphaMode::Convolve)
}

/// Sharpens color channels with [`Kernel::sharpen`].
///
/// Alpha is copied from the source. Intensity 0 returns an unmodified copy.
///
/// # Errors
///
/// [`unmess_core::Error::OutOfRange`] if `intensity` is outside `[0, 3]`.
pub fn sharpen<B: PixelBuffer + ?Sized>(src: &B, intensity: f32) -> Result<RgbaBuffer> {
    let intensity = require_in_range(
        intensity,
        *SHARPEN_RANGE.start(),
        *SHARPEN_RANGE.end(),
        "sharpen intensity",
    )?;
    require_non_empty(src)?;

    if intensity == 0.0 {
        return Ok(RgbaBuffer::from_buffer(src));
    }
    debug!(width = src.width(), height = src.height(), intensity, "Applying sharpen");
    convolve(src, &Kernel::sharpen(intensity), AlphaMode::Preserve)
}
