//! Descriptive metadata carried alongside each image state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use unmess_core::config::BYTES_PER_PIXEL;
use unmess_core::format::format_tag;

/// Image metadata snapshot.
///
/// Equality and hashing consider only width, height and source path, so
/// two states of the same image compare equal regardless of how many
/// edits separate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageMetadata {
    width: u32,
    height: u32,
    format: String,
    size_bytes: u64,
    loaded_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    source_path: String,
    modification_count: u32,
}

impl ImageMetadata {
    /// Metadata for a freshly loaded image.
    ///
    /// The format tag comes from the path's extension.
    pub fn new(width: u32, height: u32, source_path: impl Into<String>) -> Self {
        let source_path = source_path.into();
        let now = Utc::now();
        Self {
            width,
            height,
            format: format_tag(&source_path),
            size_bytes: estimate_size(width, height),
            loaded_at: now,
            last_modified: now,
            source_path,
            modification_count: 0,
        }
    }

    /// Copy with `last_modified = now` and the count bumped by one.
    pub fn with_modification(&self) -> Self {
        Self {
            last_modified: Utc::now(),
            modification_count: self.modification_count + 1,
            ..self.clone()
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Lower-cased extension of the source path, or `"unknown"`.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Accounted size, `width * height * 4`.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// When the image was loaded.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// When the last edit was applied.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Where the image came from.
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Number of edits applied since loading.
    pub fn modification_count(&self) -> u32 {
        self.modification_count
    }
}

fn estimate_size(width: u32, height: u32) -> u64 {
    width as u64 * height as u64 * BYTES_PER_PIXEL
}

impl PartialEq for ImageMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.source_path == other.source_path
    }
}

impl Eq for ImageMetadata {}

impl Hash for ImageMetadata {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
        self.source_path.hash(state);
    }
}

impl fmt::Display for ImageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ImageMetadata[{}x{}, {}, {} bytes, mods={}]",
            self.width, self.height, self.format, self.size_bytes, self.modification_count
        )
    }
}
