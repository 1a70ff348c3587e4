//! Encode configuration
//!
//! Tuning for the re-encoding paths, loadable from a TOML file. Defaults
//! match the fixed quality-oriented settings of the scaled export.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClipstitchError, ClipstitchResult};

/// Encoder tuning applied wherever video is re-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Video codec used for re-encoded output
    pub video_codec: String,
    /// Audio codec used by the full re-encode path
    pub audio_codec: String,
    /// Encoding speed preset
    pub preset: String,
    /// Constant rate factor (0-51, lower is higher quality)
    pub crf: u8,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            preset: "veryfast".to_string(),
            crf: 18,
        }
    }
}

impl EncodeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> ClipstitchResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ClipstitchError::ConfigFileError {
                message: format!("{}: {}", path.display(), e),
            })?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| ClipstitchError::ConfigFileError {
                message: format!("{}: {}", path.display(), e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges after deserialization.
    pub fn validate(&self) -> ClipstitchResult<()> {
        if self.crf > 51 {
            return Err(ClipstitchError::ConfigFileError {
                message: format!("crf must be between 0 and 51, got {}", self.crf),
            });
        }
        if self.video_codec.is_empty() || self.audio_codec.is_empty() {
            return Err(ClipstitchError::ConfigFileError {
                message: "codec names cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_quality_oriented_settings() {
        let config = EncodeConfig::default();
        assert_eq!(config.video_codec, "libx264");
        assert_eq!(config.audio_codec, "aac");
        assert_eq!(config.preset, "veryfast");
        assert_eq!(config.crf, 18);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clipstitch.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "preset = \"slow\"\ncrf = 23").unwrap();

        let config = EncodeConfig::load(&path).unwrap();
        assert_eq!(config.preset, "slow");
        assert_eq!(config.crf, 23);
        assert_eq!(config.video_codec, "libx264");
    }

    #[test]
    fn rejects_out_of_range_crf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clipstitch.toml");
        std::fs::write(&path, "crf = 99").unwrap();
        assert!(EncodeConfig::load(&path).is_err());
    }
}
