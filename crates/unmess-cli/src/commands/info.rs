//! Image info command.
//!
//! Displays dimensions, format tag, accounted size and source path.

use crate::{codec, GlobalOpts, InfoArgs};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use unmess_core::PixelBuffer;
use unmess_history::ImageMetadata;

/// Runs the info command for every input.
pub fn run(args: InfoArgs, opts: &GlobalOpts) -> Result<()> {
    let limits = opts.engine_config().limits;

    for path in &args.input {
        let file_size = fs::metadata(path)
            .with_context(|| format!("Cannot stat {}", path.display()))?
            .len();
        let buffer = codec::load(path, &limits)?;
        let metadata = ImageMetadata::new(buffer.width(), buffer.height(), path.to_string_lossy());

        if args.json {
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        } else {
            print_text(path, &metadata, file_size, opts.verbose > 0);
        }

        if args.input.len() > 1 {
            println!();
        }
    }
    Ok(())
}

fn print_text(path: &Path, metadata: &ImageMetadata, file_size: u64, verbose: bool) {
    println!("{}", path.display());
    println!("  Resolution: {}x{}", metadata.width(), metadata.height());
    println!("  Format:     {}", metadata.format());
    println!("  Pixels:     {}", metadata.width() as u64 * metadata.height() as u64);
    println!("  In memory:  {}", super::format_size(metadata.size_bytes()));
    println!("  File size:  {}", super::format_size(file_size));
    if verbose {
        println!("  Source:     {}", metadata.source_path());
        println!("  Loaded at:  {}", metadata.loaded_at().to_rfc3339());
    }
}
