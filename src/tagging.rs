use std::collections::BTreeMap;

use crate::models::{CategoryCount, Segment, SegmentMentions};
use crate::text::PhraseSet;

/// Tags segments that mention lexicon phrases at least `threshold` times
#[derive(Debug, Clone, Default)]
pub struct MentionTagger {
    categories: Vec<(String, PhraseSet)>,
    threshold: usize,
}

impl MentionTagger {
    /// Build from a `category -> phrases` lexicon; a threshold below 1 is treated as 1
    pub fn new(lexicon: &BTreeMap<String, Vec<String>>, threshold: usize) -> Self {
        let categories = lexicon
            .iter()
            .map(|(category, phrases)| (category.clone(), PhraseSet::new(phrases)))
            .filter(|(_, phrases)| !phrases.is_empty())
            .collect();
        Self {
            categories,
            threshold: threshold.max(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Mentions for every segment that reaches the threshold
    pub fn tag(&self, segments: &[Segment]) -> Vec<SegmentMentions> {
        if self.is_empty() {
            return vec![];
        }

        segments
            .iter()
            .enumerate()
            .filter_map(|(segment_index, segment)| {
                let categories: Vec<CategoryCount> = self
                    .categories
                    .iter()
                    .map(|(category, phrases)| CategoryCount {
                        category: category.clone(),
                        count: phrases.count_matches(&segment.text),
                    })
                    .filter(|c| c.count > 0)
                    .collect();
                let total_mentions = categories.iter().map(|c| c.count).sum();

                (total_mentions >= self.threshold).then_some(SegmentMentions {
                    segment_index,
                    total_mentions,
                    categories,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeInterval;

    fn lexicon() -> BTreeMap<String, Vec<String>> {
        BTreeMap::from([
            ("systems".to_string(), vec!["engine".to_string(), "oil change".to_string()]),
            ("makes".to_string(), vec!["toyota".to_string()]),
        ])
    }

    fn segment(text: &str) -> Segment {
        Segment::new(0, TimeInterval::known(0.0, 1.0), "A", text)
    }

    #[test]
    fn test_tags_segments_at_threshold() {
        let tagger = MentionTagger::new(&lexicon(), 2);
        let segments = vec![
            segment("my toyota engine needs an oil change"),
            segment("the engine is fine"),
            segment("nothing relevant"),
        ];

        let mentions = tagger.tag(&segments);
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].segment_index, 0);
        assert_eq!(mentions[0].total_mentions, 3);
        // lexicon order is alphabetical by category
        assert_eq!(mentions[0].categories[0].category, "makes");
        assert_eq!(mentions[0].categories[1].count, 2);
    }

    #[test]
    fn test_empty_lexicon_tags_nothing() {
        let tagger = MentionTagger::new(&BTreeMap::new(), 0);
        assert!(tagger.tag(&[segment("engine")]).is_empty());
    }
}
