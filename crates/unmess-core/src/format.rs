//! File format tags understood at the load/save boundary.
//!
//! The engine never encodes or decodes files. It only needs to know which
//! tags the external codec accepts so it can reject the rest early.

use crate::validate::validate_file_extension;
use crate::Result;
use std::path::Path;

/// Extensions accepted on load.
pub const SUPPORTED_READ_FORMATS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// Extensions accepted on save.
pub const SUPPORTED_WRITE_FORMATS: &[&str] = &["png", "jpg", "jpeg"];

/// Tag used when a source path has no extension.
pub const UNKNOWN_FORMAT: &str = "unknown";

/// Lower-cased extension of `path`, or [`UNKNOWN_FORMAT`].
pub fn format_tag(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| UNKNOWN_FORMAT.to_string())
}

/// Validates that `path` can be loaded.
pub fn check_readable(path: &Path) -> Result<String> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    validate_file_extension(ext, SUPPORTED_READ_FORMATS)
}

/// Validates that `path` can be written.
pub fn check_writable(path: &Path) -> Result<String> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    validate_file_extension(ext, SUPPORTED_WRITE_FORMATS)
}
