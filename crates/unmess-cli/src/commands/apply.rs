//! Apply command
//!
//! Runs a list of edits in order through an editing session, optionally
//! undoes the last few, and saves the result.

use crate::{ApplyArgs, GlobalOpts};
use anyhow::{Context, Result};
use tracing::{info, trace, warn};
use unmess_core::format::check_writable;

pub fn run(args: ApplyArgs, opts: &GlobalOpts) -> Result<()> {
    trace!(input = %args.input.display(), edits = args.edits.len(), undo = args.undo, "apply::run");

    check_writable(&args.output)
        .with_context(|| format!("Cannot write {}", args.output.display()))?;
    for edit in &args.edits {
        edit.validate().with_context(|| format!("Invalid edit `{edit}`"))?;
    }

    let mut session = super::open_session(&args.input, opts)?;
    for edit in &args.edits {
        session
            .apply(edit)
            .with_context(|| format!("Failed to apply `{edit}`"))?;
        info!(%edit, "Applied");
    }

    for step in 0..args.undo {
        if session.undo().is_none() {
            warn!(requested = args.undo, undone = step, "Nothing left to undo");
            break;
        }
    }

    super::finish(&session, &args.output, args.log.as_deref(), opts)
}
