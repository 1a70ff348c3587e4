//! Error handling module for clipstitch

use thiserror::Error;

/// Main error type for clipstitch operations
#[derive(Error, Debug)]
pub enum ClipstitchError {
    /// A source file could not be opened or probed
    #[error("Failed to load source file {path}: {message}")]
    LoadError { path: String, message: String },

    /// A trim update violates 0 <= start < end <= duration. Reported by the
    /// clip itself, which does not know its position in any sequence.
    #[error("Invalid trim for {path}: start {start}s, end {end}s, duration {duration}s")]
    TrimOutOfRange {
        path: String,
        start: f64,
        end: f64,
        duration: f64,
    },

    /// A sequenced clip carries an invalid trim range
    #[error("Invalid trim for clip #{clip_index} ({path}): start {start}s, end {end}s, duration {duration}s")]
    InvalidTrim {
        clip_index: usize,
        path: String,
        start: f64,
        end: f64,
        duration: f64,
    },

    /// Export requested with no clips in the sequence
    #[error("Cannot export an empty clip sequence")]
    EmptySequence,

    /// An export strategy was requested with an incompatible option
    #[error("Invalid export configuration: {message}")]
    ConfigurationError { message: String },

    /// The external encoder binary could not be located
    #[error("{tool} not found: {message}")]
    ToolDiscoveryError { tool: String, message: String },

    /// Probing a media file failed
    #[error("Failed to probe media file {path}: {message}")]
    ProbeError { path: String, message: String },

    /// A segment extraction invocation exited non-zero
    #[error("Segment extraction failed for clip #{clip_index}: {stderr}")]
    ExtractionError { clip_index: usize, stderr: String },

    /// The final concatenation/encode invocation exited non-zero
    #[error("Concatenation failed: {stderr}")]
    ConcatenationError { stderr: String },

    /// Invalid time string supplied by the caller
    #[error("Invalid time format: {input}. Expected HH:MM:SS, MM:SS, or seconds")]
    InvalidTimeFormat { input: String },

    /// Configuration file could not be read or parsed
    #[error("Failed to load configuration: {message}")]
    ConfigFileError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for clipstitch operations
pub type ClipstitchResult<T> = std::result::Result<T, ClipstitchError>;
