use tracing::info;

use crate::keywords::KeywordRanker;
use crate::models::{KeywordMethod, KeywordScore, Segment, SegmentMentions, SpeakerStatistic, Summary};
use crate::stats::aggregate;
use crate::tagging::MentionTagger;

/// Result of Stage 2 analysis
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub summary: Summary,
    pub speaker_statistics: Vec<SpeakerStatistic>,
    pub keywords: Vec<KeywordScore>,
    pub keyword_method: KeywordMethod,
    pub mentions: Vec<SegmentMentions>,
}

/// Execute Stage 2: keyword ranking, statistics and mention tagging over the
/// normalized segments. Reads the segments only.
pub fn analyze(segments: &[Segment], ranker: &KeywordRanker, tagger: &MentionTagger) -> AnalysisResult {
    let documents: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
    let ranking = ranker.rank(&documents);
    let statistics = aggregate(segments);
    let mentions = tagger.tag(segments);

    info!(
        "Stage 2: {} keywords ({:?}), {} speakers, {} tagged segments",
        ranking.keywords.len(),
        ranking.method,
        statistics.speakers.len(),
        mentions.len()
    );

    AnalysisResult {
        summary: statistics.summary,
        speaker_statistics: statistics.speakers,
        keywords: ranking.keywords,
        keyword_method: ranking.method,
        mentions,
    }
}
