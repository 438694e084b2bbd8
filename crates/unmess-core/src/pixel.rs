//! Per-pixel helpers shared by the algorithms.
//!
//! Pixels are `[f32; 4]` in `[R, G, B, A]` order with every channel
//! normalized to `[0.0, 1.0]`.

/// Rec.709 luminance coefficient for red channel.
pub const REC709_LUMA_R: f64 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f64 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f64 = 0.0722;

/// Rec.709 luminance coefficients as an array [R, G, B].
pub const REC709_LUMA: [f64; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// An RGBA pixel with normalized channels.
pub type Rgba = [f32; 4];

/// Calculate Rec.709 luminance (luminosity method).
///
/// Accumulates in `f64` so that a pixel with equal channels maps exactly
/// back onto that channel value.
///
/// ```
/// use unmess_core::pixel::luminance_rec709;
///
/// let y = luminance_rec709(1.0, 1.0, 1.0);
/// assert!((y - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn luminance_rec709(r: f32, g: f32, b: f32) -> f32 {
    (r as f64 * REC709_LUMA_R + g as f64 * REC709_LUMA_G + b as f64 * REC709_LUMA_B) as f32
}

/// Clamp a channel value to `[0.0, 1.0]`.
#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.min(1.0).max(0.0)
}

/// Clamp a signed coordinate to `[0, len - 1]` (clamp-to-edge addressing).
#[inline]
pub fn clamp_coord(v: i64, len: u32) -> u32 {
    v.clamp(0, len as i64 - 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(1.5), 1.0);
    }

    #[test]
    fn test_clamp_coord() {
        assert_eq!(clamp_coord(-3, 5), 0);
        assert_eq!(clamp_coord(2, 5), 2);
        assert_eq!(clamp_coord(9, 5), 4);
    }

    #[test]
    fn test_luma_weights_sum_to_one() {
        let sum: f64 = REC709_LUMA.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_luma_of_gray_is_exact() {
        for v in [0.0f32, 0.1, 0.333, 0.5, 0.77, 1.0] {
            assert_eq!(luminance_rec709(v, v, v), v);
        }
    }
}
