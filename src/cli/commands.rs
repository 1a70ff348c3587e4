//! Command execution

use std::path::Path;

use tracing::info;

use crate::cli::args::{ExportArgs, InspectArgs};
use crate::config::EncodeConfig;
use crate::domain::{Clip, ClipSequence, ResolutionPreset};
use crate::engine::{ExportPlan, ExportStrategy, Exporter};
use crate::error::{ClipstitchError, ClipstitchResult};
use crate::ffmpeg::probe::probe_media;
use crate::ffmpeg::Toolchain;
use crate::utils::time::{format_seconds, parse_seconds};

/// A clip spec from the command line: `PATH` or `PATH=START..END`.
pub fn parse_clip_spec(spec: &str) -> ClipstitchResult<(String, Option<(f64, f64)>)> {
    match spec.rsplit_once('=') {
        Some((path, range)) if range.contains("..") && !path.is_empty() => {
            let (start_str, end_str) =
                range
                    .split_once("..")
                    .ok_or_else(|| ClipstitchError::ConfigurationError {
                        message: format!("malformed trim range in '{}'", spec),
                    })?;
            let start = parse_seconds(start_str)?;
            let end = parse_seconds(end_str)?;
            Ok((path.to_string(), Some((start, end))))
        }
        _ => Ok((spec.to_string(), None)),
    }
}

/// Execute the export command.
pub fn execute_export(args: ExportArgs) -> ClipstitchResult<()> {
    let strategy = ExportStrategy::parse(&args.strategy)?;
    let preset = ResolutionPreset::parse(&args.preset)?;
    // Derive the plan up front so strategy/preset mismatches are reported
    // before any probing or subprocess work
    let plan = ExportPlan::new(strategy, preset, args.output)?;
    let encode = match &args.config {
        Some(path) => EncodeConfig::load(path)?,
        None => EncodeConfig::default(),
    };

    // Resolve the toolchain before touching any source file, so a missing
    // encoder is reported before any work starts.
    let toolchain = Toolchain::discover()?;

    let mut sequence = ClipSequence::new();
    for spec in &args.clips {
        let (path, trim) = parse_clip_spec(spec)?;
        let mut clip = Clip::load(&toolchain, path)?;
        if let Some((start, end)) = trim {
            clip.set_trim(start, end)?;
        }
        info!(clip = %clip.label(), "added clip");
        sequence.push(clip);
    }

    let exporter = Exporter::new(toolchain, encode);
    let report = exporter.export(&sequence, &plan)?;

    println!(
        "Exported {} clip(s) to {} ({} expected)",
        report.clip_count,
        report.output_path.display(),
        format_seconds(report.expected_duration)
    );
    Ok(())
}

/// Execute the inspect command.
pub fn execute_inspect(args: InspectArgs) -> ClipstitchResult<()> {
    let toolchain = Toolchain::discover()?;
    let info = probe_media(&toolchain, Path::new(&args.input))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("File:       {}", args.input.display());
        println!("Duration:   {}", format_seconds(info.duration));
        println!("Resolution: {}x{}", info.width, info.height);
        println!("Frame rate: {:.3} fps", info.frame_rate);
        println!("Codec:      {}", info.codec);
        println!("Audio:      {}", if info.has_audio { "yes" } else { "no" });
    }
    Ok(())
}
