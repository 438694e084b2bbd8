//! Engine limits and configuration.
//!
//! All tunables of the engine live here as plain values with defaults.
//! Callers override them by constructing the structs directly or, for
//! [`EngineConfig`], by deserializing a partial document (missing fields
//! fall back to defaults).
//!
//! ```rust
//! use unmess_core::config::{EngineConfig, MAX_DIMENSION};
//!
//! let cfg = EngineConfig::default();
//! assert_eq!(cfg.limits.max_width, MAX_DIMENSION);
//! assert_eq!(cfg.history_capacity, 20);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Default maximum width and height accepted at load time.
pub const MAX_DIMENSION: u32 = 8192;

/// Default number of states retained by the history manager.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Bytes accounted per pixel (four 8-bit channels).
pub const BYTES_PER_PIXEL: u64 = 4;

/// Brightness factor range.
pub const BRIGHTNESS_RANGE: RangeInclusive<f32> = -1.0..=1.0;

/// Contrast factor range.
pub const CONTRAST_RANGE: RangeInclusive<f32> = -1.0..=1.0;

/// Saturation factor range.
pub const SATURATION_RANGE: RangeInclusive<f32> = -1.0..=1.0;

/// Gaussian blur radius range.
pub const BLUR_RADIUS_RANGE: RangeInclusive<u32> = 0..=10;

/// Sharpen intensity range.
pub const SHARPEN_RANGE: RangeInclusive<f32> = 0.0..=3.0;

/// Dimension limits enforced when an image enters the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum width in pixels.
    pub max_width: u32,
    /// Maximum height in pixels.
    pub max_height: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_width: MAX_DIMENSION,
            max_height: MAX_DIMENSION,
        }
    }
}

impl Limits {
    /// Square limits with the same maximum on both axes.
    pub fn square(max: u32) -> Self {
        Self {
            max_width: max,
            max_height: max,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Load-time dimension limits.
    pub limits: Limits,
    /// Undo history capacity (must be positive).
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}
