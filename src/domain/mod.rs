//! Domain models: clips, ordered sequences, presets, and validation rules

pub mod clip;
pub mod preset;
pub mod rules;

pub use clip::{Clip, ClipSequence};
pub use preset::ResolutionPreset;
pub use rules::validate_sequence;
