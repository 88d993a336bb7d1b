use serde::{Deserialize, Serialize};

use super::Segment;

/// Talk-time totals for one speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerStatistic {
    pub speaker_id: String,
    /// Sum of owned segment durations in seconds (known bounds only)
    pub total_talk_time: f64,
    pub segment_count: usize,
    pub word_count: usize,
}

impl SpeakerStatistic {
    pub fn new(speaker_id: impl Into<String>) -> Self {
        Self {
            speaker_id: speaker_id.into(),
            total_talk_time: 0.0,
            segment_count: 0,
            word_count: 0,
        }
    }
}

/// A ranked keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    /// 1-based rank position
    pub rank: usize,
    pub term: String,
    /// Non-negative score
    pub score: f64,
}

/// How keyword scores were computed for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMethod {
    /// Term frequency weighted by smoothed IDF across segments
    #[default]
    Tfidf,
    /// Raw term frequency; used when fewer than two segments have text
    TermFrequency,
}

/// Whole-recording statistics
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Maximum known segment end, 0 when no bounds are known
    pub total_duration: f64,
    /// All segments, including those with unknown bounds
    pub total_segments: usize,
    pub total_words: usize,
    pub total_sentences: usize,
    pub unknown_speaker_segments: usize,
    pub unknown_bounds_segments: usize,
    /// Distinct speaker ids, sorted
    pub speakers: Vec<String>,
}

/// Segments tagged by the mention tagger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentMentions {
    /// Position of the segment in the report's segment list
    pub segment_index: usize,
    pub total_mentions: usize,
    /// `(category, count)` pairs in lexicon order
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Descriptive data about one run; supplied by the caller so output stays reproducible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub recording_id: String,
    pub run_id: String,
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub language: String,
    pub source_turns: usize,
    pub source_chunks: usize,
    pub keyword_method: KeywordMethod,
    pub tool_version: String,
}

/// Everything a run produces, in emission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub statistics: Summary,
    pub speaker_statistics: Vec<SpeakerStatistic>,
    pub keywords: Vec<KeywordScore>,
    pub mentions: Vec<SegmentMentions>,
    pub segments: Vec<Segment>,
}
