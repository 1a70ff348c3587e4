//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Trim and stitch ordered video clips into one output file
#[derive(Parser, Debug)]
#[command(name = "clipstitch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export an ordered clip sequence to a single file
    Export(ExportArgs),
    /// Probe a media file and print its stream facts
    Inspect(InspectArgs),
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Ordered input clips: PATH or PATH=START..END (times as HH:MM:SS,
    /// MM:SS, or seconds)
    #[arg(required = true)]
    pub clips: Vec<String>,

    /// Output file path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Export strategy
    #[arg(long, default_value = "lossless")]
    pub strategy: String,

    /// Resolution preset (original, 1080p, 720p, 480p, 360p, 240p)
    #[arg(long, default_value = "original")]
    pub preset: String,

    /// Path to a TOML file with encoder tuning
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input media file path
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
