//! Resolution presets

use std::fmt;

use crate::error::{ClipstitchError, ClipstitchResult};

/// Fixed table of output resolutions. `Original` means no resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPreset {
    Original,
    P1080,
    P720,
    P480,
    P360,
    P240,
}

impl ResolutionPreset {
    /// Target dimensions, or `None` for `Original`.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            Self::Original => None,
            Self::P1080 => Some((1920, 1080)),
            Self::P720 => Some((1280, 720)),
            Self::P480 => Some((854, 480)),
            Self::P360 => Some((640, 360)),
            Self::P240 => Some((426, 240)),
        }
    }

    /// Parse a preset label such as `720p` or `original`.
    pub fn parse(input: &str) -> ClipstitchResult<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "original" => Ok(Self::Original),
            "1080p" => Ok(Self::P1080),
            "720p" => Ok(Self::P720),
            "480p" => Ok(Self::P480),
            "360p" => Ok(Self::P360),
            "240p" => Ok(Self::P240),
            other => Err(ClipstitchError::ConfigurationError {
                message: format!(
                    "unknown resolution preset '{}'; expected original, 1080p, 720p, 480p, 360p, or 240p",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for ResolutionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Original => "original",
            Self::P1080 => "1080p",
            Self::P720 => "720p",
            Self::P480 => "480p",
            Self::P360 => "360p",
            Self::P240 => "240p",
        };
        write!(f, "{}", label)
    }
}
