//! Segment concatenation via the concat demuxer
//!
//! Writes an ordered manifest over the segment files and merges them with a
//! single stream-copy pass. Valid only because every segment fed in here is
//! mutually compatible by construction (uniform sources for the lossless
//! path, freshly re-encoded to one target for the scaled path).

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ClipstitchError, ClipstitchResult};
use crate::ffmpeg::Toolchain;

/// Render the concat-demuxer manifest: one `file '<path>'` line per segment,
/// in playback order. Backslashes are normalized for the demuxer's sake.
pub fn manifest_contents(segments: &[PathBuf]) -> String {
    segments
        .iter()
        .map(|p| format!("file '{}'", p.to_string_lossy().replace('\\', "/")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the merge invocation:
/// `-y -f concat -safe 0 -i <manifest> -c copy <output>`
pub fn concat_args(manifest_path: &Path, output_path: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        manifest_path.to_string_lossy().into_owned(),
        "-c".to_string(),
        "copy".to_string(),
        output_path.to_string_lossy().into_owned(),
    ]
}

/// Merges ordered segment files into the final output.
pub struct Concatenator<'a> {
    toolchain: &'a Toolchain,
}

impl<'a> Concatenator<'a> {
    pub fn new(toolchain: &'a Toolchain) -> Self {
        Self { toolchain }
    }

    /// Write the manifest into `work_dir` and run the stream-copy merge.
    pub fn concat(
        &self,
        segments: &[PathBuf],
        work_dir: &Path,
        output_path: &Path,
    ) -> ClipstitchResult<()> {
        let manifest_path = work_dir.join("concat.txt");
        std::fs::write(&manifest_path, manifest_contents(segments))?;

        info!(
            segments = segments.len(),
            output = %output_path.display(),
            "concatenating segments"
        );

        let args = concat_args(&manifest_path, output_path);
        debug!(?args, "encoder invocation");

        self.toolchain
            .run_ffmpeg(&args)
            .map_err(|stderr| ClipstitchError::ConcatenationError { stderr })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_preserves_segment_order() {
        let segments = vec![
            PathBuf::from("/tmp/work/part0.mp4"),
            PathBuf::from("/tmp/work/part1.mp4"),
            PathBuf::from("/tmp/work/part2.mp4"),
        ];
        assert_eq!(
            manifest_contents(&segments),
            "file '/tmp/work/part0.mp4'\nfile '/tmp/work/part1.mp4'\nfile '/tmp/work/part2.mp4'"
        );
    }

    #[test]
    fn manifest_normalizes_backslashes() {
        let segments = vec![PathBuf::from(r"C:\work\part0.mp4")];
        assert_eq!(manifest_contents(&segments), "file 'C:/work/part0.mp4'");
    }

    #[test]
    fn concat_invocation_is_pure_stream_copy() {
        let args = concat_args(Path::new("/tmp/concat.txt"), Path::new("/out/final.mp4"));
        let expected: Vec<&str> = vec![
            "-y", "-f", "concat", "-safe", "0", "-i", "/tmp/concat.txt", "-c", "copy",
            "/out/final.mp4",
        ];
        assert_eq!(args.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }
}
