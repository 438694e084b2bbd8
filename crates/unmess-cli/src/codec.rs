//! File load/save via the `image` crate.
//!
//! Decoded images are normalized to RGBA `f32` in `[0, 1]`. On save the
//! channels are quantized to 8 bits; JPEG drops alpha.

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;
use unmess_core::format::{check_readable, check_writable};
use unmess_core::validate::validate_dimensions;
use unmess_core::{Limits, PixelBuffer, RgbaBuffer};

/// Decodes `path` into an RGBA buffer.
///
/// The header is checked against `limits` first, so an oversized image is
/// rejected without decoding its pixels.
pub fn load(path: &Path, limits: &Limits) -> Result<RgbaBuffer> {
    check_readable(path).with_context(|| format!("Cannot read {}", path.display()))?;

    let (width, height) = reader(path)?
        .into_dimensions()
        .with_context(|| format!("Failed to read header: {}", path.display()))?;
    validate_dimensions(width, height, limits)
        .with_context(|| format!("Cannot edit {}", path.display()))?;

    let img = reader(path)?
        .decode()
        .with_context(|| format!("Failed to decode: {}", path.display()))?;

    let (width, height) = (img.width(), img.height());
    debug!(path = %path.display(), width, height, color = ?img.color(), "Decoded image");

    let data = img.to_rgba32f().into_raw();
    Ok(RgbaBuffer::from_data(width, height, data)?)
}

fn reader(path: &Path) -> Result<ImageReader<BufReader<File>>> {
    ImageReader::open(path)
        .with_context(|| format!("Failed to open: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to detect format: {}", path.display()))
}

/// Encodes `buffer` to `path`, choosing the format from the extension.
pub fn save(path: &Path, buffer: &RgbaBuffer) -> Result<()> {
    let ext = check_writable(path).with_context(|| format!("Cannot write {}", path.display()))?;
    let format = match ext.as_str() {
        "jpg" | "jpeg" => ImageFormat::Jpeg,
        _ => ImageFormat::Png,
    };

    let (width, height) = buffer.dimensions();
    let bytes: Vec<u8> = buffer.data().iter().map(|&c| quantize(c)).collect();
    let rgba = RgbaImage::from_raw(width, height, bytes)
        .context("Pixel data does not match image dimensions")?;

    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8()),
        _ => DynamicImage::ImageRgba8(rgba),
    };
    img.save_with_format(path, format)
        .with_context(|| format!("Failed to save: {}", path.display()))?;

    debug!(path = %path.display(), width, height, ?format, "Encoded image");
    Ok(())
}

fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}
