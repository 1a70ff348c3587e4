//! Clip-sequence export engine
//!
//! Three strategies produce one output file from an ordered, trimmed clip
//! sequence:
//!
//! - `Lossless`: per-clip stream-copy segments, then a copy-mode concat.
//!   Valid only when all sources share codec, resolution, and framerate.
//! - `Scaled`: per-clip scale/letterbox re-encode to a preset resolution,
//!   then a copy-mode concat of the now-uniform segments.
//! - `Reencode`: one in-memory composition over all clips rendered by a
//!   single encode pass; normalizes differing resolutions without
//!   distortion.

pub mod compose;
pub mod concat;
pub mod export;
pub mod extract;

use std::path::PathBuf;

use crate::domain::ResolutionPreset;
use crate::error::{ClipstitchError, ClipstitchResult};

pub use compose::ComposedSequence;
pub use concat::Concatenator;
pub use export::{ExportPhase, ExportReport, Exporter};
pub use extract::SegmentExtractor;

/// How the export pipeline cuts and stitches the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStrategy {
    /// Stream-copy segments + copy concat, zero re-encoding
    Lossless,
    /// Single normalizing re-encode pass over the whole sequence
    Reencode,
    /// Scale/letterbox re-encoded segments + lossless concat
    Scaled,
}

impl ExportStrategy {
    /// Parse a strategy label.
    pub fn parse(input: &str) -> ClipstitchResult<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "lossless" => Ok(Self::Lossless),
            "reencode" => Ok(Self::Reencode),
            "scaled" => Ok(Self::Scaled),
            other => Err(ClipstitchError::ConfigurationError {
                message: format!(
                    "unknown export strategy '{}'; expected lossless, reencode, or scaled",
                    other
                ),
            }),
        }
    }
}

/// One export invocation's derived parameters. Constructed per export and
/// discarded afterwards.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub strategy: ExportStrategy,
    /// Target dimensions; `None` means keep original sizes
    pub target: Option<(u32, u32)>,
    pub output_path: PathBuf,
}

impl ExportPlan {
    /// Derive a plan from the user's strategy and preset choice.
    ///
    /// `Scaled` requires a real target resolution; selecting it with the
    /// `Original` preset is a configuration error. `Lossless` never resizes,
    /// so the preset is ignored. `Reencode` runs with or without a target
    /// (absence means keep original sizes, still re-encode).
    pub fn new(
        strategy: ExportStrategy,
        preset: ResolutionPreset,
        output_path: impl Into<PathBuf>,
    ) -> ClipstitchResult<Self> {
        let target = match strategy {
            ExportStrategy::Lossless => None,
            ExportStrategy::Reencode => preset.dimensions(),
            ExportStrategy::Scaled => match preset.dimensions() {
                Some(dims) => Some(dims),
                None => {
                    return Err(ClipstitchError::ConfigurationError {
                        message: "scaled export requires a resolution preset other than 'original'"
                            .to_string(),
                    })
                }
            },
        };

        Ok(Self {
            strategy,
            target,
            output_path: output_path.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_labels_parse() {
        assert_eq!(
            ExportStrategy::parse("lossless").unwrap(),
            ExportStrategy::Lossless
        );
        assert_eq!(
            ExportStrategy::parse("Reencode").unwrap(),
            ExportStrategy::Reencode
        );
        assert_eq!(
            ExportStrategy::parse("scaled").unwrap(),
            ExportStrategy::Scaled
        );
        assert!(ExportStrategy::parse("hybrid").is_err());
    }

    #[test]
    fn scaled_plan_rejects_original_preset() {
        let err = ExportPlan::new(
            ExportStrategy::Scaled,
            ResolutionPreset::Original,
            "out.mp4",
        )
        .unwrap_err();
        assert!(matches!(err, ClipstitchError::ConfigurationError { .. }));
    }

    #[test]
    fn scaled_plan_carries_preset_dimensions() {
        let plan =
            ExportPlan::new(ExportStrategy::Scaled, ResolutionPreset::P720, "out.mp4").unwrap();
        assert_eq!(plan.target, Some((1280, 720)));
    }

    #[test]
    fn reencode_plan_allows_original_preset() {
        let plan = ExportPlan::new(
            ExportStrategy::Reencode,
            ResolutionPreset::Original,
            "out.mp4",
        )
        .unwrap();
        assert_eq!(plan.target, None);
    }

    #[test]
    fn lossless_plan_ignores_preset() {
        let plan =
            ExportPlan::new(ExportStrategy::Lossless, ResolutionPreset::P480, "out.mp4").unwrap();
        assert_eq!(plan.target, None);
    }
}
