//! Clipstitch CLI
//!
//! Assemble an ordered sequence of trimmed video clips and export them as a
//! single file.
//!
//! ```bash
//! clipstitch export a.mp4=2..5 b.mp4 --strategy lossless -o out.mp4
//! clipstitch export a.mp4 b.mkv --strategy scaled --preset 720p -o out.mp4
//! clipstitch inspect a.mp4 --json
//! ```

use anyhow::Result;
use clap::Parser;

use clipstitch::cli::{execute_export, execute_inspect, Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Export(args) => execute_export(args)?,
        Commands::Inspect(args) => execute_inspect(args)?,
    }
    Ok(())
}
