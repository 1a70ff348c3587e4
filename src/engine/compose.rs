//! Full re-encode composition
//!
//! The re-encode strategy never writes intermediate segment files. Each
//! clip's trim, fit-inside resize, and centered letterbox are planned as an
//! in-memory composition, then the whole sequence is rendered by a single
//! encoder invocation with a `filter_complex` graph and a fixed video/audio
//! codec pair.
//!
//! With a target resolution, every frame is scaled by
//! `min(target_w/src_w, target_h/src_h)` and composited centered over a
//! black canvas of the target size, so mismatched aspect ratios are
//! letterboxed or pillarboxed, never cropped or distorted. Without a target,
//! sources keep their size and clips smaller than the largest one are padded
//! up to the common canvas.

use std::path::Path;

use tracing::{debug, info};

use crate::config::EncodeConfig;
use crate::domain::ClipSequence;
use crate::error::{ClipstitchError, ClipstitchResult};
use crate::ffmpeg::Toolchain;

/// One clip's planned contribution to the composition.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedClip {
    pub source: String,
    pub start: f64,
    pub end: f64,
    /// Resize dimensions, when the clip is scaled at all
    pub scale: Option<(u32, u32)>,
    /// Black canvas and centered offset, when the frame does not fill it:
    /// (canvas_w, canvas_h, x, y)
    pub pad: Option<(u32, u32, u32, u32)>,
}

/// The planned composition over a whole sequence.
#[derive(Debug, Clone)]
pub struct ComposedSequence {
    entries: Vec<ComposedClip>,
    /// Common frame size every entry ends up with
    canvas: (u32, u32),
    /// Audio is carried only when every clip has an audio stream
    include_audio: bool,
}

/// Fit `src` inside `target` preserving aspect ratio, dimensions rounded to
/// the nearest even value and clamped to the target.
pub fn fit_inside(src: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = (src.0 as f64, src.1 as f64);
    let (tw, th) = (target.0 as f64, target.1 as f64);
    let scale = (tw / sw).min(th / sh);
    let w = (even_round(sw * scale)).min(target.0);
    let h = (even_round(sh * scale)).min(target.1);
    (w.max(2), h.max(2))
}

/// Round to the nearest even integer.
fn even_round(value: f64) -> u32 {
    (((value / 2.0).round() as u32) * 2).max(2)
}

/// Round up to the next even integer.
fn even_up(value: u32) -> u32 {
    (value + 1) & !1
}

impl ComposedSequence {
    /// Plan the composition for a validated sequence. With no target
    /// resolution the common canvas is the largest source width and height
    /// across the sequence (even-rounded up), and no clip is resized.
    pub fn plan(sequence: &ClipSequence, target: Option<(u32, u32)>) -> Self {
        let canvas = target.unwrap_or_else(|| {
            let w = sequence.iter().map(|c| c.media().width).max().unwrap_or(2);
            let h = sequence.iter().map(|c| c.media().height).max().unwrap_or(2);
            (even_up(w), even_up(h))
        });

        let entries = sequence
            .iter()
            .map(|clip| {
                let src = (clip.media().width, clip.media().height);
                let scaled = match target {
                    Some(t) => {
                        let fitted = fit_inside(src, t);
                        if fitted == src {
                            None
                        } else {
                            Some(fitted)
                        }
                    }
                    None => None,
                };

                let frame = scaled.unwrap_or(src);
                let pad = if frame == canvas {
                    None
                } else {
                    let x = (canvas.0 - frame.0) / 2;
                    let y = (canvas.1 - frame.1) / 2;
                    Some((canvas.0, canvas.1, x, y))
                };

                ComposedClip {
                    source: clip.path().to_string_lossy().into_owned(),
                    start: clip.start(),
                    end: clip.end(),
                    scale: scaled,
                    pad,
                }
            })
            .collect();

        let include_audio = sequence.iter().all(|c| c.media().has_audio);

        Self {
            entries,
            canvas,
            include_audio,
        }
    }

    pub fn entries(&self) -> &[ComposedClip] {
        &self.entries
    }

    pub fn canvas(&self) -> (u32, u32) {
        self.canvas
    }

    pub fn include_audio(&self) -> bool {
        self.include_audio
    }

    /// The `filter_complex` graph realizing this composition.
    pub fn filter_graph(&self) -> String {
        let mut chains = Vec::new();

        for (i, entry) in self.entries.iter().enumerate() {
            let mut ops = vec!["setpts=PTS-STARTPTS".to_string()];
            if let Some((w, h)) = entry.scale {
                ops.push(format!("scale={}:{}", w, h));
            }
            if let Some((cw, ch, x, y)) = entry.pad {
                ops.push(format!("pad={}:{}:{}:{}:black", cw, ch, x, y));
            }
            ops.push("setsar=1".to_string());
            chains.push(format!("[{}:v]{}[v{}]", i, ops.join(","), i));

            if self.include_audio {
                chains.push(format!("[{}:a]asetpts=PTS-STARTPTS[a{}]", i, i));
            }
        }

        let mut concat_inputs = String::new();
        for i in 0..self.entries.len() {
            concat_inputs.push_str(&format!("[v{}]", i));
            if self.include_audio {
                concat_inputs.push_str(&format!("[a{}]", i));
            }
        }

        let (audio_count, outputs) = if self.include_audio {
            (1, "[outv][outa]")
        } else {
            (0, "[outv]")
        };
        chains.push(format!(
            "{}concat=n={}:v=1:a={}{}",
            concat_inputs,
            self.entries.len(),
            audio_count,
            outputs
        ));

        chains.join(";")
    }

    /// The single encoder invocation rendering the composition.
    pub fn render_args(&self, encode: &EncodeConfig, output_path: &Path) -> Vec<String> {
        let mut args = vec!["-y".to_string()];

        for entry in &self.entries {
            args.push("-ss".to_string());
            args.push(entry.start.to_string());
            args.push("-to".to_string());
            args.push(entry.end.to_string());
            args.push("-i".to_string());
            args.push(entry.source.clone());
        }

        args.push("-filter_complex".to_string());
        args.push(self.filter_graph());

        args.push("-map".to_string());
        args.push("[outv]".to_string());
        if self.include_audio {
            args.push("-map".to_string());
            args.push("[outa]".to_string());
        }

        args.push("-c:v".to_string());
        args.push(encode.video_codec.clone());
        args.push("-preset".to_string());
        args.push(encode.preset.clone());
        args.push("-crf".to_string());
        args.push(encode.crf.to_string());
        if self.include_audio {
            args.push("-c:a".to_string());
            args.push(encode.audio_codec.clone());
        }

        args.push(output_path.to_string_lossy().into_owned());
        args
    }

    /// Render the composition to the output path.
    pub fn render(
        &self,
        toolchain: &Toolchain,
        encode: &EncodeConfig,
        output_path: &Path,
    ) -> ClipstitchResult<()> {
        info!(
            clips = self.entries.len(),
            canvas = ?self.canvas,
            audio = self.include_audio,
            output = %output_path.display(),
            "rendering composed sequence"
        );
        let args = self.render_args(encode, output_path);
        debug!(?args, "encoder invocation");

        toolchain
            .run_ffmpeg(&args)
            .map_err(|stderr| ClipstitchError::ConcatenationError { stderr })
    }
}
