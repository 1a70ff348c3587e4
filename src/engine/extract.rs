//! Per-clip segment extraction
//!
//! For each clip, one encoder invocation writes a temporary segment file
//! covering exactly the trimmed range. Copy mode re-containerizes without
//! re-encoding; scale mode re-encodes video to a uniform target size while
//! stream-copying audio. Argument vectors are built by pure functions so the
//! exact invocations are testable without running the encoder.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::EncodeConfig;
use crate::domain::Clip;
use crate::error::{ClipstitchError, ClipstitchResult};
use crate::ffmpeg::Toolchain;

/// How a segment is produced.
#[derive(Debug, Clone)]
pub enum SegmentMode {
    /// `-c copy` on both streams, no re-encoding artifacts
    Copy,
    /// Scale to the target width, letterbox to exact target dimensions
    Scale {
        target: (u32, u32),
        encode: EncodeConfig,
    },
}

/// Build the copy-mode invocation:
/// `-y -ss <start> -to <end> -i <source> -c copy -avoid_negative_ts 1 <segment>`
pub fn copy_segment_args(clip: &Clip, segment_path: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-ss".to_string(),
        clip.start().to_string(),
        "-to".to_string(),
        clip.end().to_string(),
        "-i".to_string(),
        clip.path().to_string_lossy().into_owned(),
        "-c".to_string(),
        "copy".to_string(),
        "-avoid_negative_ts".to_string(),
        "1".to_string(),
        segment_path.to_string_lossy().into_owned(),
    ]
}

/// Filter chain for scale mode: scale so width matches the target (height
/// follows the aspect ratio, rounded to the nearest even value), then pad to
/// the exact target size, centering the frame on a black background.
pub fn scale_pad_filter(target: (u32, u32)) -> String {
    let (w, h) = target;
    format!(
        "scale={w}:-2,pad={w}:{h}:(iw-{w})/2:(ih-{h})/2:black",
        w = w,
        h = h
    )
}

/// Build the scale-mode invocation. Video is re-encoded with the configured
/// quality settings; audio is stream-copied.
pub fn scaled_segment_args(
    clip: &Clip,
    target: (u32, u32),
    encode: &EncodeConfig,
    segment_path: &Path,
) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-ss".to_string(),
        clip.start().to_string(),
        "-to".to_string(),
        clip.end().to_string(),
        "-i".to_string(),
        clip.path().to_string_lossy().into_owned(),
        "-vf".to_string(),
        scale_pad_filter(target),
        "-c:v".to_string(),
        encode.video_codec.clone(),
        "-preset".to_string(),
        encode.preset.clone(),
        "-crf".to_string(),
        encode.crf.to_string(),
        "-c:a".to_string(),
        "copy".to_string(),
        segment_path.to_string_lossy().into_owned(),
    ]
}

/// Produces one temporary segment file per clip, in sequence order.
pub struct SegmentExtractor<'a> {
    toolchain: &'a Toolchain,
    mode: SegmentMode,
}

impl<'a> SegmentExtractor<'a> {
    pub fn new(toolchain: &'a Toolchain, mode: SegmentMode) -> Self {
        Self { toolchain, mode }
    }

    /// Extract the segment for one clip into `work_dir`, returning the
    /// segment path. A non-zero encoder exit surfaces as an extraction error
    /// carrying the clip index and the captured diagnostics.
    pub fn extract(
        &self,
        clip: &Clip,
        clip_index: usize,
        work_dir: &Path,
    ) -> ClipstitchResult<PathBuf> {
        let segment_path = work_dir.join(format!("part{}.mp4", clip_index));
        let args = match &self.mode {
            SegmentMode::Copy => copy_segment_args(clip, &segment_path),
            SegmentMode::Scale { target, encode } => {
                scaled_segment_args(clip, *target, encode, &segment_path)
            }
        };

        info!(clip = %clip.label(), index = clip_index, "extracting segment");
        debug!(?args, "encoder invocation");

        self.toolchain
            .run_ffmpeg(&args)
            .map_err(|stderr| ClipstitchError::ExtractionError { clip_index, stderr })?;

        Ok(segment_path)
    }
}
