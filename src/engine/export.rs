//! Export orchestration
//!
//! Drives one export from validation through extraction and concatenation:
//! `Idle -> Validating -> Extracting -> Concatenating -> Done`, with `Failed`
//! reachable from any active phase. The working directory for segment files
//! is a [`tempfile::TempDir`] created on entering `Extracting` and dropped on
//! every exit path, so temporary storage is always released whether the
//! export succeeds or fails.
//!
//! Exports are synchronous and serialized by the caller; each encoder
//! invocation blocks until the subprocess finishes.

use std::fmt;

use tempfile::TempDir;
use tracing::{debug, error, info};

use crate::config::EncodeConfig;
use crate::domain::{validate_sequence, ClipSequence};
use crate::engine::compose::ComposedSequence;
use crate::engine::concat::Concatenator;
use crate::engine::extract::{SegmentExtractor, SegmentMode};
use crate::engine::{ExportPlan, ExportStrategy};
use crate::error::{ClipstitchError, ClipstitchResult};
use crate::ffmpeg::Toolchain;

/// Phases of one export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Validating,
    Extracting,
    Concatenating,
    Done,
    Failed,
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Extracting => "extracting",
            Self::Concatenating => "concatenating",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub strategy: ExportStrategy,
    pub output_path: std::path::PathBuf,
    /// Sum of the trimmed clip durations, i.e. the expected output length
    pub expected_duration: f64,
    pub clip_count: usize,
}

/// Runs one export at a time over a validated clip sequence.
pub struct Exporter {
    toolchain: Toolchain,
    encode: EncodeConfig,
}

impl Exporter {
    pub fn new(toolchain: Toolchain, encode: EncodeConfig) -> Self {
        Self { toolchain, encode }
    }

    /// Execute an export plan against a sequence. All errors are recovered
    /// here and returned as a single terminal report; no partial segments
    /// survive a failure.
    pub fn export(
        &self,
        sequence: &ClipSequence,
        plan: &ExportPlan,
    ) -> ClipstitchResult<ExportReport> {
        let result = self.run(sequence, plan);
        match &result {
            Ok(report) => {
                self.transition(ExportPhase::Done);
                info!(
                    output = %report.output_path.display(),
                    expected_duration = report.expected_duration,
                    "export finished"
                );
            }
            Err(e) => {
                self.transition(ExportPhase::Failed);
                error!(error = %e, "export failed");
            }
        }
        result
    }

    fn run(&self, sequence: &ClipSequence, plan: &ExportPlan) -> ClipstitchResult<ExportReport> {
        self.transition(ExportPhase::Validating);
        validate_sequence(sequence)?;

        match plan.strategy {
            ExportStrategy::Lossless => {
                self.export_via_segments(sequence, plan, SegmentMode::Copy)?
            }
            ExportStrategy::Scaled => {
                let target = plan.target.ok_or_else(|| ClipstitchError::ConfigurationError {
                    message: "scaled export requires a target resolution".to_string(),
                })?;
                self.export_via_segments(
                    sequence,
                    plan,
                    SegmentMode::Scale {
                        target,
                        encode: self.encode.clone(),
                    },
                )?
            }
            ExportStrategy::Reencode => self.export_composed(sequence, plan)?,
        }

        Ok(ExportReport {
            strategy: plan.strategy,
            output_path: plan.output_path.clone(),
            expected_duration: sequence.total_trim_duration(),
            clip_count: sequence.len(),
        })
    }

    /// Shared path for the lossless and scaled strategies: one temp segment
    /// per clip, then a stream-copy concat. The first extraction failure
    /// aborts the remaining clips.
    fn export_via_segments(
        &self,
        sequence: &ClipSequence,
        plan: &ExportPlan,
        mode: SegmentMode,
    ) -> ClipstitchResult<()> {
        self.transition(ExportPhase::Extracting);
        // Dropped on every exit path, releasing all segment files
        let work_dir = TempDir::new()?;

        let extractor = SegmentExtractor::new(&self.toolchain, mode);
        let mut segments = Vec::with_capacity(sequence.len());
        for (index, clip) in sequence.iter().enumerate() {
            segments.push(extractor.extract(clip, index, work_dir.path())?);
        }

        self.transition(ExportPhase::Concatenating);
        Concatenator::new(&self.toolchain).concat(&segments, work_dir.path(), &plan.output_path)
    }

    /// Full re-encode path: plan the in-memory composition, then render it
    /// in one encoder pass. No segment files are produced.
    fn export_composed(&self, sequence: &ClipSequence, plan: &ExportPlan) -> ClipstitchResult<()> {
        self.transition(ExportPhase::Extracting);
        let composed = ComposedSequence::plan(sequence, plan.target);

        self.transition(ExportPhase::Concatenating);
        composed.render(&self.toolchain, &self.encode, &plan.output_path)
    }

    fn transition(&self, phase: ExportPhase) {
        debug!(%phase, "export phase");
    }
}
