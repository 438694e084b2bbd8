//! Adjust command
//!
//! Applies the slider pipeline (brightness, contrast, saturation, blur,
//! sharpen) with each active stage logged as its own edit.

use crate::{AdjustArgs, GlobalOpts};
use anyhow::{Context, Result};
use tracing::{trace, warn};
use unmess_core::format::check_writable;
use unmess_ops::Adjustments;

pub fn run(args: AdjustArgs, opts: &GlobalOpts) -> Result<()> {
    trace!(input = %args.input.display(), "adjust::run");

    let adjustments = Adjustments {
        brightness: args.brightness,
        contrast: args.contrast,
        saturation: args.saturation,
        blur: args.blur,
        sharpen: args.sharpen,
    };
    adjustments.validate().context("Invalid adjustment")?;
    check_writable(&args.output)
        .with_context(|| format!("Cannot write {}", args.output.display()))?;

    if adjustments.is_identity() {
        warn!("All adjustments are zero; output is a re-encoded copy");
    }

    let mut session = super::open_session(&args.input, opts)?;
    session
        .commit_adjustments(&adjustments)
        .context("Failed to apply adjustments")?;

    super::finish(&session, &args.output, args.log.as_deref(), opts)
}
