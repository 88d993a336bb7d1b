use std::collections::{BTreeSet, HashMap};

use crate::models::{Segment, SpeakerStatistic, Summary, UNKNOWN_SPEAKER};
use crate::text::count_sentences;

/// Whole-recording and per-speaker statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub summary: Summary,
    /// One entry per speaker, in order of first appearance
    pub speakers: Vec<SpeakerStatistic>,
}

/// Aggregate statistics in a single pass over `segments`.
///
/// Durations only count segments with known bounds; word and segment totals count every
/// segment. `total_duration` is the largest known end, whatever the segment order.
pub fn aggregate(segments: &[Segment]) -> Statistics {
    let mut summary = Summary::default();
    let mut speakers: Vec<SpeakerStatistic> = Vec::new();
    let mut speaker_index: HashMap<&str, usize> = HashMap::new();
    let mut distinct: BTreeSet<&str> = BTreeSet::new();

    for segment in segments {
        let words = segment.word_count();
        summary.total_segments += 1;
        summary.total_words += words;
        summary.total_sentences += count_sentences(&segment.text);

        let index = *speaker_index
            .entry(segment.speaker_id.as_str())
            .or_insert_with(|| {
                speakers.push(SpeakerStatistic::new(&segment.speaker_id));
                speakers.len() - 1
            });
        let speaker = &mut speakers[index];
        speaker.segment_count += 1;
        speaker.word_count += words;

        match segment.duration() {
            Some(duration) => speaker.total_talk_time += duration,
            None => summary.unknown_bounds_segments += 1,
        }

        if segment.bounds_known {
            if let Some(end) = segment.end {
                summary.total_duration = summary.total_duration.max(end);
            }
        }

        if segment.speaker_id == UNKNOWN_SPEAKER {
            summary.unknown_speaker_segments += 1;
        } else {
            distinct.insert(segment.speaker_id.as_str());
        }
    }

    summary.speakers = distinct.into_iter().map(str::to_string).collect();

    Statistics { summary, speakers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeInterval;

    fn segment(start: Option<f64>, end: Option<f64>, speaker: &str, text: &str) -> Segment {
        Segment::new(0, TimeInterval::new(start, end), speaker, text)
    }

    #[test]
    fn test_total_duration_is_max_end_regardless_of_order() {
        let segments = vec![
            segment(Some(5.0), Some(10.0), "A", "later"),
            segment(Some(0.0), Some(3.0), "B", "earlier"),
        ];
        let stats = aggregate(&segments);
        assert_eq!(stats.summary.total_duration, 10.0);
    }

    #[test]
    fn test_unknown_bounds_excluded_from_durations_only() {
        let segments = vec![
            segment(Some(0.0), Some(4.0), "A", "hello there"),
            segment(None, Some(50.0), UNKNOWN_SPEAKER, "lost chunk here"),
            segment(Some(6.0), Some(9.0), "A", "how are you"),
        ];
        let stats = aggregate(&segments);

        assert_eq!(stats.summary.total_duration, 9.0);
        assert_eq!(stats.summary.total_segments, 3);
        assert_eq!(stats.summary.total_words, 8);
        assert_eq!(stats.summary.unknown_bounds_segments, 1);
        assert_eq!(stats.summary.unknown_speaker_segments, 1);
        assert_eq!(stats.summary.speakers, vec!["A".to_string()]);

        assert_eq!(stats.speakers[0].speaker_id, "A");
        assert_eq!(stats.speakers[0].total_talk_time, 7.0);
        assert_eq!(stats.speakers[0].segment_count, 2);
        assert_eq!(stats.speakers[1].speaker_id, UNKNOWN_SPEAKER);
        assert_eq!(stats.speakers[1].total_talk_time, 0.0);
        assert_eq!(stats.speakers[1].word_count, 3);
    }

    #[test]
    fn test_empty_input() {
        let stats = aggregate(&[]);
        assert_eq!(stats.summary, Summary::default());
        assert!(stats.speakers.is_empty());
    }

    #[test]
    fn test_sentence_totals() {
        let segments = vec![segment(Some(0.0), Some(1.0), "A", "Yes. No? Maybe")];
        assert_eq!(aggregate(&segments).summary.total_sentences, 3);
    }
}
