//! External encoder toolchain: discovery and subprocess invocation
//!
//! The encoder binaries are resolved in priority order: explicit environment
//! override (`FFMPEG_PATH` / `FFPROBE_PATH`), then the system search path,
//! then a binary bundled next to the running executable. Discovery failure is
//! reported before any export work begins.

pub mod probe;

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

use crate::error::{ClipstitchError, ClipstitchResult};

/// Environment variable overriding the ffmpeg binary location.
pub const FFMPEG_ENV: &str = "FFMPEG_PATH";
/// Environment variable overriding the ffprobe binary location.
pub const FFPROBE_ENV: &str = "FFPROBE_PATH";

/// Resolved encoder toolchain.
#[derive(Debug, Clone)]
pub struct Toolchain {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl Toolchain {
    /// Locate ffmpeg and ffprobe, failing with a discovery error if either
    /// cannot be found.
    pub fn discover() -> ClipstitchResult<Self> {
        let ffmpeg = locate_tool("ffmpeg", FFMPEG_ENV)?;
        let ffprobe = locate_tool("ffprobe", FFPROBE_ENV)?;
        debug!(ffmpeg = %ffmpeg.display(), ffprobe = %ffprobe.display(), "encoder toolchain resolved");
        Ok(Self { ffmpeg, ffprobe })
    }

    /// Build a toolchain from explicit binary paths. Used by configuration
    /// overrides and by tests.
    pub fn from_paths(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Path to the resolved ffmpeg binary.
    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }

    /// Path to the resolved ffprobe binary.
    pub fn ffprobe(&self) -> &Path {
        &self.ffprobe
    }

    /// Run ffmpeg with the given arguments, capturing output. Returns the
    /// captured stderr as the error value on a non-zero exit so callers can
    /// map it into their own error variant.
    pub fn run_ffmpeg(&self, args: &[String]) -> Result<(), String> {
        run_capturing(&self.ffmpeg, args)
    }

    /// Run ffprobe with the given arguments, returning captured stdout.
    pub fn run_ffprobe(&self, args: &[String]) -> Result<Vec<u8>, String> {
        let output = spawn_capturing(&self.ffprobe, args)?;
        if !output.status.success() {
            return Err(String::from_utf8_lossy(&output.stderr).into_owned());
        }
        Ok(output.stdout)
    }
}

/// Resolve one tool: env override, then PATH, then bundled fallback. A
/// stale override pointing at a missing file is skipped, not fatal, so the
/// later lookups still apply.
fn locate_tool(name: &str, env_var: &str) -> ClipstitchResult<PathBuf> {
    if let Ok(explicit) = std::env::var(env_var) {
        let path = PathBuf::from(&explicit);
        if path.exists() {
            return Ok(path);
        }
        warn!(
            "{} points to a missing file ({}), falling back to the search path",
            env_var, explicit
        );
    }

    // PATH lookup, verified by actually running the binary
    if runs_ok(Path::new(name)) {
        return Ok(PathBuf::from(name));
    }

    // Binary bundled next to our executable
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let bundled = dir.join(bin_name(name));
            if bundled.exists() {
                return Ok(bundled);
            }
        }
    }

    Err(ClipstitchError::ToolDiscoveryError {
        tool: name.to_string(),
        message: format!(
            "install FFmpeg, place {} next to the executable, or set {}",
            bin_name(name),
            env_var
        ),
    })
}

fn bin_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

/// Check a candidate by running `<tool> -version` with output discarded.
fn runs_ok(candidate: &Path) -> bool {
    Command::new(candidate)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn spawn_capturing(program: &Path, args: &[String]) -> Result<Output, String> {
    Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| format!("failed to spawn {}: {}", program.display(), e))
}

fn run_capturing(program: &Path, args: &[String]) -> Result<(), String> {
    let output = spawn_capturing(program, args)?;
    if !output.status.success() {
        return Err(String::from_utf8_lossy(&output.stderr).into_owned());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_name_matches_platform() {
        if cfg!(windows) {
            assert_eq!(bin_name("ffmpeg"), "ffmpeg.exe");
        } else {
            assert_eq!(bin_name("ffmpeg"), "ffmpeg");
        }
    }

    #[test]
    fn run_ffmpeg_reports_spawn_failure() {
        let tc = Toolchain::from_paths("/nonexistent/ffmpeg", "/nonexistent/ffprobe");
        let err = tc.run_ffmpeg(&["-version".to_string()]).unwrap_err();
        assert!(err.contains("failed to spawn"));
    }
}
