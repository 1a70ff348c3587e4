//! Clip and clip sequence models

use std::path::{Path, PathBuf};

use crate::error::{ClipstitchError, ClipstitchResult};
use crate::ffmpeg::probe::{probe_media, MediaInfo};
use crate::ffmpeg::Toolchain;
use crate::utils::time::format_seconds;

/// One source file plus its trim range and cached stream facts.
///
/// `duration` is probed once at load time and never changes. The trim bounds
/// are only updated together through [`Clip::set_trim`], so the invariant
/// `0 <= start < end <= duration` holds at all times after construction.
#[derive(Debug, Clone)]
pub struct Clip {
    path: PathBuf,
    media: MediaInfo,
    start: f64,
    end: f64,
}

impl Clip {
    /// Probe a source file and build a clip spanning its full duration.
    pub fn load(toolchain: &Toolchain, path: impl Into<PathBuf>) -> ClipstitchResult<Self> {
        let path = path.into();
        let media = probe_media(toolchain, &path).map_err(|e| ClipstitchError::LoadError {
            path: path.to_string_lossy().into_owned(),
            message: e.to_string(),
        })?;
        let duration = media.duration;
        Ok(Self {
            path,
            media,
            start: 0.0,
            end: duration,
        })
    }

    /// Build a clip from already-known stream facts. Used by tests and by
    /// callers that probe separately.
    pub fn from_media(path: impl Into<PathBuf>, media: MediaInfo) -> Self {
        let duration = media.duration;
        Self {
            path: path.into(),
            media,
            start: 0.0,
            end: duration,
        }
    }

    /// Update both trim bounds atomically. Rejects the whole update if
    /// `0 <= start < end <= duration` does not hold, leaving the previous
    /// trim unchanged.
    pub fn set_trim(&mut self, start: f64, end: f64) -> ClipstitchResult<()> {
        if !(0.0 <= start && start < end && end <= self.media.duration) {
            return Err(ClipstitchError::TrimOutOfRange {
                path: self.path.to_string_lossy().into_owned(),
                start,
                end,
                duration: self.media.duration,
            });
        }
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Whether the current trim satisfies the clip invariant.
    pub fn trim_is_valid(&self) -> bool {
        0.0 <= self.start && self.start < self.end && self.end <= self.media.duration
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn media(&self) -> &MediaInfo {
        &self.media
    }

    /// Total decodable length in seconds.
    pub fn duration(&self) -> f64 {
        self.media.duration
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Length of the trimmed range.
    pub fn trim_duration(&self) -> f64 {
        self.end - self.start
    }

    /// Display label: `name [start -> end]`.
    pub fn label(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned());
        format!(
            "{} [{} -> {}]",
            name,
            format_seconds(self.start),
            format_seconds(self.end)
        )
    }
}

/// An ordered list of clips. Order is the output's playback order; the same
/// source file may appear more than once.
#[derive(Debug, Clone, Default)]
pub struct ClipSequence {
    clips: Vec<Clip>,
}

impl ClipSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clip at the end of the sequence.
    pub fn push(&mut self, clip: Clip) {
        self.clips.push(clip);
    }

    /// Remove the clip at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<Clip> {
        if index < self.clips.len() {
            Some(self.clips.remove(index))
        } else {
            None
        }
    }

    /// Swap the clip at `index` with its predecessor. Returns the new index.
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.clips.len() {
            return None;
        }
        self.clips.swap(index, index - 1);
        Some(index - 1)
    }

    /// Swap the clip at `index` with its successor. Returns the new index.
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        if index + 1 >= self.clips.len() {
            return None;
        }
        self.clips.swap(index, index + 1);
        Some(index + 1)
    }

    pub fn get(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Clip> {
        self.clips.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clip> {
        self.clips.iter()
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Sum of each clip's trimmed length.
    pub fn total_trim_duration(&self) -> f64 {
        self.clips.iter().map(Clip::trim_duration).sum()
    }
}

impl<'a> IntoIterator for &'a ClipSequence {
    type Item = &'a Clip;
    type IntoIter = std::slice::Iter<'a, Clip>;

    fn into_iter(self) -> Self::IntoIter {
        self.clips.iter()
    }
}
