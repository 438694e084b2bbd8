//! unmess - command-line photo editor
//!
//! Loads an image, runs edits through an editing session with undo
//! history, and writes the result.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use unmess_core::config::{DEFAULT_HISTORY_CAPACITY, MAX_DIMENSION};
use unmess_core::{EngineConfig, Limits};
use unmess_ops::Edit;

mod codec;
mod commands;

#[derive(Parser)]
#[command(name = "unmess")]
#[command(author, version, about = "Command-line photo editor with undo history")]
#[command(long_about = "
Applies tone, color, blur/sharpen and geometric edits to PNG, JPEG, GIF and
BMP images. Edits run through an editing session, so the last N can be
undone before saving and the full operation log can be exported.

Edits:
  brightness=F  contrast=F  saturation=F   (F in -1..1)
  blur=N        (N in 0..10)
  sharpen=F     (F in 0..3)
  grayscale  sepia  invert  rotate-cw  rotate-ccw  flip-h  flip-v

Examples:
  unmess info photo.jpg
  unmess apply photo.jpg -o out.png -e contrast=0.3 -e sharpen=1
  unmess apply photo.jpg -o out.png -e sepia -e rotate-cw --undo 1 --log ops.json
  unmess adjust photo.jpg -o out.jpg --brightness 0.1 --blur 2
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Undo history capacity
    #[arg(long = "history", global = true, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    pub history: usize,

    /// Largest accepted width or height
    #[arg(long, global = true, default_value_t = MAX_DIMENSION)]
    pub max_dimension: u32,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    pub threads: usize,
}

impl GlobalOpts {
    /// Engine configuration with these flags applied.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            limits: Limits::square(self.max_dimension),
            history_capacity: self.history,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a sequence of edits
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Apply stacked slider adjustments
    Adjust(AdjustArgs),

    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Input image
    pub input: PathBuf,

    /// Output image (png, jpg)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Edit to apply, in order (e.g. `contrast=0.3`, `rotate-cw`)
    #[arg(short, long = "edit", required = true)]
    pub edits: Vec<Edit>,

    /// Undo this many edits before saving
    #[arg(long, default_value_t = 0)]
    pub undo: usize,

    /// Write the operation log as JSON
    #[arg(long)]
    pub log: Option<PathBuf>,
}

#[derive(Args)]
pub struct AdjustArgs {
    /// Input image
    pub input: PathBuf,

    /// Output image (png, jpg)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Brightness offset (-1..1)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub brightness: f32,

    /// Contrast factor (-1..1)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub contrast: f32,

    /// Saturation factor (-1..1)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub saturation: f32,

    /// Gaussian blur radius (0..10)
    #[arg(long, default_value_t = 0)]
    pub blur: u32,

    /// Sharpen intensity (0..3)
    #[arg(long, default_value_t = 0.0)]
    pub sharpen: f32,

    /// Write the operation log as JSON
    #[arg(long)]
    pub log: Option<PathBuf>,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    // Configure thread pool
    if cli.global.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.global.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args, &cli.global),
        Commands::Adjust(args) => commands::adjust::run(args, &cli.global),
        Commands::Info(args) => commands::info::run(args, &cli.global),
    }
}
