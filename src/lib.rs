//! Clipstitch library
//!
//! Assemble an ordered sequence of trimmed video clips and export them as a
//! single file via lossless stream-copy concatenation, a normalizing
//! re-encode, or a hybrid scale-then-lossless-concat, all by composing an
//! external FFmpeg toolchain as subprocesses.

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ffmpeg;
pub mod utils;

// Re-export commonly used types
pub use config::EncodeConfig;
pub use domain::{Clip, ClipSequence, ResolutionPreset};
pub use engine::{ExportPlan, ExportStrategy, Exporter};
pub use error::{ClipstitchError, ClipstitchResult};
pub use ffmpeg::Toolchain;
