//! Operation log entries.
//!
//! Every committed edit leaves an [`Operation`] behind: what ran, with
//! which parameters, when, and how long it took. Entries are immutable and
//! serialize to JSON for audit export:
//!
//! ```json
//! {"kind":"blur","parameters":{"radius":3.0},"timestamp":"2026-01-01T12:00:00Z","duration_ms":14}
//! ```
//!
//! [`Operation::to_edit`] turns an entry back into a runnable
//! [`Edit`], which is what history replay is built on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use unmess_core::validate::require_non_null;
use unmess_core::{Error, Result};
use unmess_ops::Edit;

/// Parameter name for brightness, contrast and saturation.
pub const PARAM_FACTOR: &str = "factor";
/// Parameter name for the blur radius.
pub const PARAM_RADIUS: &str = "radius";
/// Parameter name for the sharpen intensity.
pub const PARAM_INTENSITY: &str = "intensity";

/// What an operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    /// Additive brightness.
    Brightness,
    /// Contrast around mid-gray.
    Contrast,
    /// Saturation around luminance.
    Saturation,
    /// Gaussian blur.
    Blur,
    /// Sharpen convolution.
    Sharpen,
    /// Luminosity grayscale.
    Grayscale,
    /// Sepia tone.
    Sepia,
    /// Channel inversion.
    Invert,
    /// Quarter turn clockwise.
    RotateCw,
    /// Quarter turn counter-clockwise.
    RotateCcw,
    /// Left-right mirror.
    FlipH,
    /// Top-bottom mirror.
    FlipV,
}

impl OperationKind {
    /// Kebab-case name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Invert => "invert",
            Self::RotateCw => "rotate-cw",
            Self::RotateCcw => "rotate-ccw",
            Self::FlipH => "flip-h",
            Self::FlipV => "flip-v",
        }
    }

    /// Kind recorded for `edit`.
    pub fn of(edit: &Edit) -> Self {
        match edit {
            Edit::Brightness(_) => Self::Brightness,
            Edit::Contrast(_) => Self::Contrast,
            Edit::Saturation(_) => Self::Saturation,
            Edit::GaussianBlur(_) => Self::Blur,
            Edit::Sharpen(_) => Self::Sharpen,
            Edit::Grayscale => Self::Grayscale,
            Edit::Sepia => Self::Sepia,
            Edit::Invert => Self::Invert,
            Edit::Rotate90 { clockwise: true } => Self::RotateCw,
            Edit::Rotate90 { clockwise: false } => Self::RotateCcw,
            Edit::Flip { horizontal: true } => Self::FlipH,
            Edit::Flip { horizontal: false } => Self::FlipV,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable log entry for one executed edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    kind: OperationKind,
    #[serde(default)]
    parameters: BTreeMap<String, f64>,
    timestamp: DateTime<Utc>,
    #[serde(rename = "duration_ms", with = "duration_ms")]
    duration: Duration,
}

impl Operation {
    /// Creates an entry stamped with the current time.
    pub fn new(kind: OperationKind, parameters: BTreeMap<String, f64>, duration: Duration) -> Self {
        Self {
            kind,
            parameters,
            timestamp: Utc::now(),
            duration,
        }
    }

    /// Replaces the timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Records `edit` with the time it took.
    pub fn from_edit(edit: &Edit, duration: Duration) -> Self {
        let mut parameters = BTreeMap::new();
        match *edit {
            Edit::Brightness(f) | Edit::Contrast(f) | Edit::Saturation(f) => {
                parameters.insert(PARAM_FACTOR.to_string(), f as f64);
            }
            Edit::GaussianBlur(r) => {
                parameters.insert(PARAM_RADIUS.to_string(), r as f64);
            }
            Edit::Sharpen(k) => {
                parameters.insert(PARAM_INTENSITY.to_string(), k as f64);
            }
            _ => {}
        }
        Self::new(OperationKind::of(edit), parameters, duration)
    }

    /// Rebuilds the edit this entry records.
    ///
    /// # Errors
    ///
    /// - [`Error::NullArgument`] if a required parameter is missing
    /// - [`Error::OutOfRange`] if a parameter is out of range, or the blur
    ///   radius is not a whole number
    pub fn to_edit(&self) -> Result<Edit> {
        let edit = match self.kind {
            OperationKind::Brightness => Edit::Brightness(self.required(PARAM_FACTOR)? as f32),
            OperationKind::Contrast => Edit::Contrast(self.required(PARAM_FACTOR)? as f32),
            OperationKind::Saturation => Edit::Saturation(self.required(PARAM_FACTOR)? as f32),
            OperationKind::Sharpen => Edit::Sharpen(self.required(PARAM_INTENSITY)? as f32),
            OperationKind::Blur => {
                let r = self.required(PARAM_RADIUS)?;
                if r.fract() != 0.0 || !(0.0..=u32::MAX as f64).contains(&r) {
                    return Err(Error::out_of_range("blur radius", 0.0, 10.0, r));
                }
                Edit::GaussianBlur(r as u32)
            }
            OperationKind::Grayscale => Edit::Grayscale,
            OperationKind::Sepia => Edit::Sepia,
            OperationKind::Invert => Edit::Invert,
            OperationKind::RotateCw => Edit::Rotate90 { clockwise: true },
            OperationKind::RotateCcw => Edit::Rotate90 { clockwise: false },
            OperationKind::FlipH => Edit::Flip { horizontal: true },
            OperationKind::FlipV => Edit::Flip { horizontal: false },
        };
        edit.validate()?;
        Ok(edit)
    }

    /// Operation kind.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// All parameters, ordered by name.
    pub fn parameters(&self) -> &BTreeMap<String, f64> {
        &self.parameters
    }

    /// A single parameter.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).copied()
    }

    /// A single parameter, or `default` when absent.
    pub fn parameter_or(&self, name: &str, default: f64) -> f64 {
        self.parameter(name).unwrap_or(default)
    }

    /// When the edit ran.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// How long the edit took.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn required(&self, name: &str) -> Result<f64> {
        require_non_null(self.parameter(name), name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operation[{}, params={{", self.kind)?;
        for (i, (k, v)) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        write!(f, "}}, time={}ms]", self.duration.as_millis())
    }
}

/// Serializes a [`Duration`] as whole milliseconds.
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
