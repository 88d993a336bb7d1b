use serde::{Deserialize, Serialize};

use super::TimeInterval;

/// A labeled span asserting that one speaker was talking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiarizationTurn {
    /// Start in seconds
    pub start: f64,
    /// End in seconds
    pub end: f64,
    /// Opaque speaker label, stable within one recording
    #[serde(alias = "speaker")]
    pub speaker_id: String,
}

impl DiarizationTurn {
    pub fn new(start: f64, end: f64, speaker_id: impl Into<String>) -> Self {
        Self {
            start,
            end,
            speaker_id: speaker_id.into(),
        }
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::known(self.start, self.end)
    }
}

/// A span of recognized text, independent of speaker labeling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionChunk {
    /// Start in seconds, if the recognizer reported one
    #[serde(default)]
    pub start: Option<f64>,
    /// End in seconds, if the recognizer reported one
    #[serde(default)]
    pub end: Option<f64>,
    /// Raw recognized text
    pub text: String,
    /// Detected language code
    #[serde(default)]
    pub language: Option<String>,
}

impl TranscriptionChunk {
    pub fn new(start: Option<f64>, end: Option<f64>, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            language: None,
        }
    }

    /// Chunk with both bounds known
    pub fn timed(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self::new(Some(start), Some(end), text)
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start, self.end)
    }
}
