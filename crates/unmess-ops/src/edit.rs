//! Typed edits: one value per algorithm invocation.
//!
//! [`Edit`] bundles an algorithm with its parameters so that callers can
//! validate, apply, log, and later replay it without matching on loose
//! strings. Edits parse from the compact `name` / `name=value` syntax used
//! on the command line.
//!
//! ```rust
//! use unmess_core::{NoopObserver, RgbaBuffer};
//! use unmess_ops::Edit;
//!
//! let edit: Edit = "brightness=0.25".parse().unwrap();
//! assert_eq!(edit, Edit::Brightness(0.25));
//!
//! let src = RgbaBuffer::filled(2, 2, [0.5, 0.5, 0.5, 1.0]);
//! let out = edit.apply(&src, &NoopObserver).unwrap();
//! ```

use crate::{adjust, filter, transform};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;
use unmess_core::config::{
    BLUR_RADIUS_RANGE, BRIGHTNESS_RANGE, CONTRAST_RANGE, SATURATION_RANGE, SHARPEN_RANGE,
};
use unmess_core::validate::{require_in_range, require_non_empty};
use unmess_core::{EventKind, Observer, PixelBuffer, Result, RgbaBuffer};

/// A single pixel transform with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    /// [`adjust::brightness`] with the given factor.
    Brightness(f32),
    /// [`adjust::contrast`] with the given factor.
    Contrast(f32),
    /// [`adjust::saturation`] with the given factor.
    Saturation(f32),
    /// [`filter::gaussian_blur`] with the given radius.
    GaussianBlur(u32),
    /// [`filter::sharpen`] with the given intensity.
    Sharpen(f32),
    /// [`adjust::grayscale`].
    Grayscale,
    /// [`adjust::sepia`].
    Sepia,
    /// [`adjust::invert`].
    Invert,
    /// [`transform::rotate_90`].
    Rotate90 {
        /// Direction of the quarter turn.
        clockwise: bool,
    },
    /// [`transform::flip`].
    Flip {
        /// Mirror axis: `true` for left-right.
        horizontal: bool,
    },
}

impl Edit {
    /// Stable kebab-case name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Brightness(_) => "brightness",
            Self::Contrast(_) => "contrast",
            Self::Saturation(_) => "saturation",
            Self::GaussianBlur(_) => "blur",
            Self::Sharpen(_) => "sharpen",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Invert => "invert",
            Self::Rotate90 { clockwise: true } => "rotate-cw",
            Self::Rotate90 { clockwise: false } => "rotate-ccw",
            Self::Flip { horizontal: true } => "flip-h",
            Self::Flip { horizontal: false } => "flip-v",
        }
    }

    /// Returns `true` if the output may differ in size from the input.
    pub fn changes_dimensions(&self) -> bool {
        matches!(self, Self::Rotate90 { .. })
    }

    /// Checks parameters without touching pixels.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Brightness(f) => {
                require_in_range(f, *BRIGHTNESS_RANGE.start(), *BRIGHTNESS_RANGE.end(), "brightness")?;
            }
            Self::Contrast(f) => {
                require_in_range(f, *CONTRAST_RANGE.start(), *CONTRAST_RANGE.end(), "contrast")?;
            }
            Self::Saturation(f) => {
                require_in_range(f, *SATURATION_RANGE.start(), *SATURATION_RANGE.end(), "saturation")?;
            }
            Self::GaussianBlur(r) => {
                require_in_range(r, *BLUR_RADIUS_RANGE.start(), *BLUR_RADIUS_RANGE.end(), "blur radius")?;
            }
            Self::Sharpen(k) => {
                require_in_range(k, *SHARPEN_RANGE.start(), *SHARPEN_RANGE.end(), "sharpen intensity")?;
            }
            Self::Grayscale
            | Self::Sepia
            | Self::Invert
            | Self::Rotate90 { .. }
            | Self::Flip { .. } => {}
        }
        Ok(())
    }

    /// Runs the edit on `src`, reporting start and completion to `observer`.
    pub fn apply<B: PixelBuffer + ?Sized>(
        &self,
        src: &B,
        observer: &dyn Observer,
    ) -> Result<RgbaBuffer> {
        self.apply_timed(src, observer).map(|(out, _)| out)
    }

    /// Like [`apply`](Self::apply), also returning the elapsed time.
    ///
    /// Parameters and the source size are checked before any event fires,
    /// so a rejected edit reports nothing.
    pub fn apply_timed<B: PixelBuffer + ?Sized>(
        &self,
        src: &B,
        observer: &dyn Observer,
    ) -> Result<(RgbaBuffer, Duration)> {
        self.validate()?;
        require_non_empty(src)?;
        observer.on_event(
            EventKind::OperationStarted,
            &format!("{} on {}x{}", self, src.width(), src.height()),
        );
        let start = Instant::now();

        let out = match *self {
            Self::Brightness(f) => adjust::brightness(src, f),
            Self::Contrast(f) => adjust::contrast(src, f),
            Self::Saturation(f) => adjust::saturation(src, f),
            Self::GaussianBlur(r) => filter::gaussian_blur(src, r),
            Self::Sharpen(k) => filter::sharpen(src, k),
            Self::Grayscale => adjust::grayscale(src),
            Self::Sepia => adjust::sepia(src),
            Self::Invert => adjust::invert(src),
            Self::Rotate90 { clockwise } => transform::rotate_90(src, clockwise),
            Self::Flip { horizontal } => transform::flip(src, horizontal),
        }?;

        let elapsed = start.elapsed();
        observer.on_event(
            EventKind::OperationCompleted,
            &format!("{} completed in {}ms", self, elapsed.as_millis()),
        );
        Ok((out, elapsed))
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brightness(v) | Self::Contrast(v) | Self::Saturation(v) | Self::Sharpen(v) => {
                write!(f, "{}={}", self.name(), v)
            }
            Self::GaussianBlur(r) => write!(f, "{}={}", self.name(), r),
            _ => f.write_str(self.name()),
        }
    }
}

/// Failure to parse an [`Edit`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEditError {
    /// The name is not a known edit.
    #[error("unknown edit `{0}`")]
    Unknown(String),
    /// The edit needs `=value`.
    #[error("edit `{0}` requires a value (e.g. `{0}=0.5`)")]
    MissingValue(String),
    /// The edit takes no value.
    #[error("edit `{0}` does not take a value")]
    UnexpectedValue(String),
    /// The value is not a number of the right kind.
    #[error("invalid value `{value}` for edit `{edit}`")]
    InvalidValue {
        /// Edit name
        edit: String,
        /// Offending text
        value: String,
    },
}

impl FromStr for Edit {
    type Err = ParseEditError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (name, value) = match s.split_once('=') {
            Some((n, v)) => (n.trim(), Some(v.trim())),
            None => (s, None),
        };
        let name = name.to_ascii_lowercase().replace('_', "-");

        let float = |v: Option<&str>| -> std::result::Result<f32, ParseEditError> {
            let v = v.ok_or_else(|| ParseEditError::MissingValue(name.clone()))?;
            v.parse::<f32>().map_err(|_| ParseEditError::InvalidValue {
                edit: name.clone(),
                value: v.to_string(),
            })
        };
        let bare = |edit: Edit| match value {
            Some(_) => Err(ParseEditError::UnexpectedValue(name.clone())),
            None => Ok(edit),
        };

        match name.as_str() {
            "brightness" => Ok(Edit::Brightness(float(value)?)),
            "contrast" => Ok(Edit::Contrast(float(value)?)),
            "saturation" => Ok(Edit::Saturation(float(value)?)),
            "sharpen" => Ok(Edit::Sharpen(float(value)?)),
            "blur" | "gaussian-blur" => {
                let v = value.ok_or_else(|| ParseEditError::MissingValue(name.clone()))?;
                let r = v.parse::<u32>().map_err(|_| ParseEditError::InvalidValue {
                    edit: name.clone(),
                    value: v.to_string(),
                })?;
                Ok(Edit::GaussianBlur(r))
            }
            "grayscale" | "greyscale" => bare(Edit::Grayscale),
            "sepia" => bare(Edit::Sepia),
            "invert" => bare(Edit::Invert),
            "rotate-cw" => bare(Edit::Rotate90 { clockwise: true }),
            "rotate-ccw" => bare(Edit::Rotate90 { clockwise: false }),
            "flip-h" => bare(Edit::Flip { horizontal: true }),
            "flip-v" => bare(Edit::Flip { horizontal: false }),
            _ => Err(ParseEditError::Unknown(name.clone())),
        }
    }
}
