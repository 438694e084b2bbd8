//! CLI command implementations

pub mod adjust;
pub mod apply;
pub mod info;

use crate::{codec, GlobalOpts};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use unmess_core::TracingObserver;
use unmess_history::{EditSession, ImageMetadata, ImageState, Operation};

/// Creates a session configured from the global flags and loads `input`.
pub fn open_session(input: &Path, opts: &GlobalOpts) -> Result<EditSession> {
    let config = opts.engine_config();
    let buffer = codec::load(input, &config.limits)?;
    let mut session = EditSession::new(config, Arc::new(TracingObserver))
        .context("Invalid engine configuration")?;
    session
        .load(&buffer, &input.to_string_lossy())
        .with_context(|| format!("Cannot edit {}", input.display()))?;
    Ok(session)
}

/// Current state of a session that has an image loaded.
pub fn current(session: &EditSession) -> Result<&ImageState> {
    session.current().context("No image loaded")
}

/// Audit record written by `--log`.
#[derive(Serialize)]
struct OperationLog<'a> {
    source: &'a str,
    output: String,
    metadata: &'a ImageMetadata,
    operations: &'a [Operation],
}

/// Writes the state's operation log as pretty JSON.
pub fn write_log(path: &Path, state: &ImageState, output: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let log = OperationLog {
        source: state.metadata().source_path(),
        output: output.display().to_string(),
        metadata: state.metadata(),
        operations: state.operations(),
    };
    serde_json::to_writer_pretty(BufWriter::new(file), &log)
        .with_context(|| format!("Failed to write log: {}", path.display()))
}

/// Saves the current image and, if requested, its log.
pub fn finish(
    session: &EditSession,
    output: &Path,
    log: Option<&Path>,
    opts: &GlobalOpts,
) -> Result<()> {
    let state = current(session)?;
    codec::save(output, state.current())?;
    if let Some(log) = log {
        write_log(log, state, output)?;
    }

    if opts.verbose > 0 {
        println!("{state}");
        for op in state.operations() {
            println!("  {op}");
        }
        println!("{}", session.history().stats());
    }
    println!("Wrote {}", output.display());
    Ok(())
}

/// Format byte count for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024 / 2), "1.50 MB");
    }
}
