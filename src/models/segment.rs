use serde::{Deserialize, Serialize};

use super::TimeInterval;

/// Speaker assigned when no diarization turn overlaps a chunk
pub const UNKNOWN_SPEAKER: &str = "UNKNOWN";

/// A fused, speaker-attributed unit of transcript text.
///
/// Serialized field order is the report's column order and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Position of the source chunk in the transcription input; orders segments whose
    /// bounds are unknown
    #[serde(default)]
    pub index: usize,
    /// Start in seconds, `null` when unknown
    pub start: Option<f64>,
    /// End in seconds, `null` when unknown
    pub end: Option<f64>,
    /// Resolved speaker, or [`UNKNOWN_SPEAKER`]
    pub speaker_id: String,
    /// Current text; rewritten by normalization
    pub text: String,
    /// Text as recognized, never modified after fusion
    pub original_text: String,
    /// Whether both bounds were known at fusion time
    pub bounds_known: bool,
}

impl Segment {
    pub fn new(index: usize, interval: TimeInterval, speaker_id: impl Into<String>, text: &str) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
            speaker_id: speaker_id.into(),
            text: text.to_string(),
            original_text: text.to_string(),
            bounds_known: interval.is_known(),
            index,
        }
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start, self.end)
    }

    /// Duration in seconds for segments with known bounds
    pub fn duration(&self) -> Option<f64> {
        if self.bounds_known {
            self.interval().duration()
        } else {
            None
        }
    }

    pub fn has_unknown_speaker(&self) -> bool {
        self.speaker_id == UNKNOWN_SPEAKER
    }

    /// Whitespace-delimited token count of the current text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
