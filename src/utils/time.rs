//! Time string parsing and formatting
//!
//! Accepts plain seconds (`83.5`), `MM:SS`, and `HH:MM:SS` with optional
//! fractional seconds. Formatting mirrors the parse side and drops the hour
//! field when it is zero.

use crate::error::{ClipstitchError, ClipstitchResult};

/// Parse a time string into seconds.
pub fn parse_seconds(input: &str) -> ClipstitchResult<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClipstitchError::InvalidTimeFormat {
            input: input.to_string(),
        });
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    let invalid = || ClipstitchError::InvalidTimeFormat {
        input: input.to_string(),
    };

    let seconds = match parts.as_slice() {
        [s] => s.parse::<f64>().map_err(|_| invalid())?,
        [m, s] => {
            let minutes = m.parse::<u32>().map_err(|_| invalid())? as f64;
            let secs = s.parse::<f64>().map_err(|_| invalid())?;
            if secs >= 60.0 {
                return Err(invalid());
            }
            minutes * 60.0 + secs
        }
        [h, m, s] => {
            let hours = h.parse::<u32>().map_err(|_| invalid())? as f64;
            let minutes = m.parse::<u32>().map_err(|_| invalid())? as f64;
            let secs = s.parse::<f64>().map_err(|_| invalid())?;
            if minutes >= 60.0 || secs >= 60.0 {
                return Err(invalid());
            }
            hours * 3600.0 + minutes * 60.0 + secs
        }
        _ => return Err(invalid()),
    };

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(invalid());
    }
    Ok(seconds)
}

/// Format seconds as `H:MM:SS.ss` (or `M:SS.ss` below one hour).
pub fn format_seconds(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let secs = seconds % 60.0;

    if hours > 0 {
        format!("{}:{:02}:{:05.2}", hours, minutes, secs)
    } else {
        format!("{}:{:05.2}", minutes, secs)
    }
}
