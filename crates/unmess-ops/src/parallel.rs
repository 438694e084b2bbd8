//! Row-parallel output rendering.
//!
//! Every algorithm in this crate is expressed as "compute output pixel
//! `(x, y)` from the input". [`render`] evaluates such a function over the
//! whole output. With the `parallel` feature (default) rows are filled
//! concurrently with Rayon; otherwise sequentially. Each output pixel depends
//! only on the read-only input, so both paths produce identical buffers.
//!
//! # Example
//!
//! ```rust
//! use unmess_core::PixelBuffer;
//! use unmess_ops::parallel::render;
//!
//! let out = render(4, 2, |x, y| [x as f32 / 4.0, y as f32, 0.0, 1.0]).unwrap();
//! assert_eq!(out.dimensions(), (4, 2));
//! assert_eq!(out.pixel(2, 1), [0.5, 1.0, 0.0, 1.0]);
//! ```

use unmess_core::{PixelBuffer, Result, Rgba, RgbaBuffer, CHANNELS};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Returns `true` when rows are rendered in parallel.
pub const fn is_parallel() -> bool {
    cfg!(feature = "parallel")
}

/// Builds a `width x height` buffer from a per-pixel function.
///
/// # Errors
///
/// Only fails if the buffer size overflows, which the callers rule out by
/// validating dimensions first.
pub fn render<F>(width: u32, height: u32, f: F) -> Result<RgbaBuffer>
where
    F: Fn(u32, u32) -> Rgba + Sync + Send,
{
    let row_len = width as usize * CHANNELS;
    let mut data = vec![0.0f32; row_len * height as usize];

    if row_len > 0 {
        #[cfg(feature = "parallel")]
        data.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| fill_row(row, y as u32, &f));

        #[cfg(not(feature = "parallel"))]
        data.chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| fill_row(row, y as u32, &f));
    }

    RgbaBuffer::from_data(width, height, data)
}

/// Builds an output of the same size by mapping every input pixel.
pub fn map_pixels<B, F>(src: &B, f: F) -> Result<RgbaBuffer>
where
    B: PixelBuffer + ?Sized,
    F: Fn(Rgba) -> Rgba + Sync + Send,
{
    render(src.width(), src.height(), |x, y| f(src.pixel(x, y)))
}

#[inline]
fn fill_row<F>(row: &mut [f32], y: u32, f: &F)
where
    F: Fn(u32, u32) -> Rgba,
{
    for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
        px.copy_from_slice(&f(x as u32, y));
    }
}
