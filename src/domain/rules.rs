//! Pre-export validation rules

use crate::domain::clip::ClipSequence;
use crate::error::{ClipstitchError, ClipstitchResult};

/// Validate a sequence before export. Rejects an empty sequence and any clip
/// whose trim range violates `0 <= start < end <= duration`. Runs before any
/// subprocess is spawned and before any temporary storage is allocated.
pub fn validate_sequence(sequence: &ClipSequence) -> ClipstitchResult<()> {
    if sequence.is_empty() {
        return Err(ClipstitchError::EmptySequence);
    }

    for (index, clip) in sequence.iter().enumerate() {
        if !clip.trim_is_valid() {
            return Err(ClipstitchError::InvalidTrim {
                clip_index: index,
                path: clip.path().to_string_lossy().into_owned(),
                start: clip.start(),
                end: clip.end(),
                duration: clip.duration(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clip::test_support::{stub_clip, stub_clip_raw};
    use crate::error::ClipstitchError;

    #[test]
    fn rejects_empty_sequence() {
        let seq = ClipSequence::new();
        assert!(matches!(
            validate_sequence(&seq),
            Err(ClipstitchError::EmptySequence)
        ));
    }

    #[test]
    fn reports_offending_clip_index() {
        let mut seq = ClipSequence::new();
        seq.push(stub_clip("a.mp4", 10.0, 1920, 1080));
        seq.push(stub_clip_raw("b.mp4", 10.0, 6.0, 6.0)); // start >= end
        match validate_sequence(&seq) {
            Err(ClipstitchError::InvalidTrim { clip_index, .. }) => assert_eq!(clip_index, 1),
            other => panic!("expected InvalidTrim, got {:?}", other),
        }
    }

    #[test]
    fn rejects_end_past_duration() {
        let mut seq = ClipSequence::new();
        seq.push(stub_clip_raw("a.mp4", 10.0, 0.0, 12.0));
        assert!(matches!(
            validate_sequence(&seq),
            Err(ClipstitchError::InvalidTrim { clip_index: 0, .. })
        ));
    }

    #[test]
    fn accepts_trimmed_clips() {
        let mut seq = ClipSequence::new();
        let mut clip = stub_clip("a.mp4", 10.0, 1920, 1080);
        clip.set_trim(2.0, 5.0).unwrap();
        seq.push(clip);
        seq.push(stub_clip("b.mp4", 20.0, 1280, 720));
        assert!(validate_sequence(&seq).is_ok());
    }
}
