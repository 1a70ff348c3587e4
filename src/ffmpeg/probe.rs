//! Media probing via ffprobe
//!
//! One short-lived ffprobe invocation per source file; no handle on the
//! source stays open afterwards.

use std::path::Path;

use serde::Serialize;

use crate::error::{ClipstitchError, ClipstitchResult};
use crate::ffmpeg::Toolchain;

/// Stream-level facts about a media file, as reported by ffprobe.
#[derive(Debug, Clone, Serialize)]
pub struct MediaInfo {
    /// Total decodable length in seconds
    pub duration: f64,
    /// Width of the primary video stream
    pub width: u32,
    /// Height of the primary video stream
    pub height: u32,
    /// Frame rate of the primary video stream
    pub frame_rate: f64,
    /// Codec name of the primary video stream
    pub codec: String,
    /// Whether the file carries at least one audio stream
    pub has_audio: bool,
}

/// Probe a media file with `ffprobe -print_format json`.
pub fn probe_media(toolchain: &Toolchain, path: &Path) -> ClipstitchResult<MediaInfo> {
    let path_str = path.to_string_lossy().into_owned();
    let args = vec![
        "-v".to_string(),
        "quiet".to_string(),
        "-print_format".to_string(),
        "json".to_string(),
        "-show_format".to_string(),
        "-show_streams".to_string(),
        path_str.clone(),
    ];

    let stdout = toolchain
        .run_ffprobe(&args)
        .map_err(|message| ClipstitchError::ProbeError {
            path: path_str.clone(),
            message,
        })?;

    parse_probe_output(&stdout).map_err(|message| ClipstitchError::ProbeError {
        path: path_str,
        message,
    })
}

/// Parse ffprobe JSON into [`MediaInfo`]. Split out for testability.
fn parse_probe_output(stdout: &[u8]) -> Result<MediaInfo, String> {
    let json: serde_json::Value =
        serde_json::from_slice(stdout).map_err(|e| format!("invalid ffprobe output: {}", e))?;

    let streams = json["streams"]
        .as_array()
        .ok_or("no streams found in media file")?;

    let video_stream = streams
        .iter()
        .find(|s| s["codec_type"].as_str() == Some("video"))
        .ok_or("no video stream found")?;

    let has_audio = streams
        .iter()
        .any(|s| s["codec_type"].as_str() == Some("audio"));

    let width = video_stream["width"]
        .as_u64()
        .ok_or("missing video width")? as u32;
    let height = video_stream["height"]
        .as_u64()
        .ok_or("missing video height")? as u32;

    let codec = video_stream["codec_name"]
        .as_str()
        .unwrap_or("unknown")
        .to_string();

    let frame_rate = video_stream["r_frame_rate"]
        .as_str()
        .map(parse_frame_rate)
        .unwrap_or(0.0);

    // Stream duration first, then the container-level duration
    let duration = video_stream["duration"]
        .as_str()
        .and_then(|d| d.parse::<f64>().ok())
        .or_else(|| {
            json["format"]["duration"]
                .as_str()
                .and_then(|d| d.parse::<f64>().ok())
        })
        .ok_or("could not determine media duration")?;

    if duration <= 0.0 {
        return Err("media duration is zero".to_string());
    }

    Ok(MediaInfo {
        duration,
        width,
        height,
        frame_rate,
        codec,
        has_audio,
    })
}

/// Parse a rational frame rate string such as `30000/1001`.
fn parse_frame_rate(s: &str) -> f64 {
    if let Some((num, den)) = s.split_once('/') {
        let n: f64 = num.parse().unwrap_or(0.0);
        let d: f64 = den.parse().unwrap_or(1.0);
        if d > 0.0 {
            n / d
        } else {
            0.0
        }
    } else {
        s.parse().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "streams": [
            {
                "codec_type": "video",
                "codec_name": "h264",
                "width": 1920,
                "height": 1080,
                "r_frame_rate": "30000/1001",
                "duration": "12.512"
            },
            {
                "codec_type": "audio",
                "codec_name": "aac"
            }
        ],
        "format": { "duration": "12.545" }
    }"#;

    #[test]
    fn parses_full_probe_output() {
        let info = parse_probe_output(SAMPLE.as_bytes()).unwrap();
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert_eq!(info.codec, "h264");
        assert!(info.has_audio);
        assert!((info.frame_rate - 29.97).abs() < 0.01);
        assert!((info.duration - 12.512).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_format_duration() {
        let json = r#"{
            "streams": [
                {"codec_type": "video", "codec_name": "vp9", "width": 640, "height": 360}
            ],
            "format": {"duration": "8.0"}
        }"#;
        let info = parse_probe_output(json.as_bytes()).unwrap();
        assert_eq!(info.duration, 8.0);
        assert!(!info.has_audio);
    }

    #[test]
    fn rejects_files_without_video() {
        let json = r#"{"streams": [{"codec_type": "audio"}], "format": {}}"#;
        assert!(parse_probe_output(json.as_bytes()).is_err());
    }

    #[test]
    fn frame_rate_rational_parsing() {
        assert_eq!(parse_frame_rate("30/1"), 30.0);
        assert_eq!(parse_frame_rate("0/0"), 0.0);
        assert_eq!(parse_frame_rate("25"), 25.0);
    }
}
