//! # unmess-core
//!
//! Core types for the unmess photo-editing engine.
//!
//! - [`Error`], [`Result`] - the engine's error taxonomy
//! - [`validate`] - fail-fast argument checks used by every entry point
//! - [`PixelBuffer`], [`PixelBufferMut`], [`RgbaBuffer`] - the pixel-buffer capability
//! - [`config`] - limits, ranges and defaults
//! - [`observer`] - injected event reporting
//! - [`format`] - file format tags accepted at the codec boundary
//!
//! ## Crate Structure
//!
//! ```text
//! unmess-core (this crate)
//!    ^
//!    +-- unmess-ops (pixel algorithms)
//!    +-- unmess-history (image state, undo/redo)
//!    +-- unmess-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod format;
pub mod observer;
pub mod pixel;
pub mod validate;

pub use buffer::{PixelBuffer, PixelBufferMut, RgbaBuffer, CHANNELS};
pub use config::{EngineConfig, Limits};
pub use error::{Error, Result};
pub use observer::{EventKind, NoopObserver, Observer, TracingObserver};
pub use pixel::{clamp01, luminance_rec709, Rgba};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::buffer::{PixelBuffer, PixelBufferMut, RgbaBuffer};
    pub use crate::config::{EngineConfig, Limits};
    pub use crate::error::{Error, Result};
    pub use crate::observer::{EventKind, NoopObserver, Observer, TracingObserver};
    pub use crate::pixel::{clamp01, luminance_rec709, Rgba};
}
