pub mod cleanup;
pub mod fillers;
pub mod phrase;
pub mod profanity;
pub mod sentences;

pub use cleanup::*;
pub use fillers::*;
pub use phrase::*;
pub use profanity::*;
pub use sentences::*;

use cleanup::PUNCTUATION_MARKS;
use fillers::SENTENCE_TERMINATORS;

use crate::error::ConfigError;
use crate::models::Segment;

/// Configuration for the text normalizer
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Filler phrases, one or more whitespace-separated tokens each
    pub filler_phrases: Vec<String>,
    /// Exact tokens to mask
    pub profanity_terms: Vec<String>,
    pub remove_fillers: bool,
    pub mask_profanity: bool,
    /// Drop a word that repeats the previous one
    pub collapse_duplicates: bool,
    /// Character used to mask blocked tokens
    pub mask_char: char,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            filler_phrases: vec![],
            profanity_terms: vec![],
            remove_fillers: true,
            mask_profanity: true,
            collapse_duplicates: true,
            mask_char: '*',
        }
    }
}

/// Deterministic, idempotent cleanup of segment text.
///
/// Built once from an immutable configuration; holds no per-run state, so one instance
/// can be shared across worker threads.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    fillers: PhraseSet,
    profanity: ProfanityFilter,
    punctuation: PunctuationCleaner,
    remove_fillers: bool,
    mask_profanity: bool,
    collapse_duplicates: bool,
}

impl TextNormalizer {
    pub fn new(config: &NormalizerConfig) -> Result<Self, ConfigError> {
        let mask = config.mask_char;
        if mask.is_whitespace()
            || mask.is_alphanumeric()
            || PUNCTUATION_MARKS.contains(&mask)
            || SENTENCE_TERMINATORS.contains(&mask)
        {
            return Err(ConfigError::InvalidMaskChar(mask));
        }

        Ok(Self {
            fillers: PhraseSet::new(&config.filler_phrases),
            profanity: ProfanityFilter::new(&config.profanity_terms, config.mask_char),
            punctuation: PunctuationCleaner::new()?,
            remove_fillers: config.remove_fillers,
            mask_profanity: config.mask_profanity,
            collapse_duplicates: config.collapse_duplicates,
        })
    }

    /// Normalize one piece of text.
    ///
    /// The cleanup passes repeat until one leaves the text unchanged, since dropping a
    /// duplicate can complete a filler phrase and dropping a filler can expose new
    /// punctuation or a new duplicate. The result is therefore a fixed point.
    pub fn normalize(&self, text: &str) -> String {
        let mut text = collapse_whitespace(text);

        while !text.is_empty() {
            let next = self.clean_pass(&text);
            if next == text {
                break;
            }
            text = next;
        }

        text
    }

    fn clean_pass(&self, text: &str) -> String {
        let mut text = self.punctuation.clean(text);

        if self.remove_fillers {
            text = remove_fillers(&text, &self.fillers);
        }

        if self.mask_profanity {
            text = self.profanity.mask(&text);
        }

        if self.collapse_duplicates {
            text = remove_consecutive_duplicates(&text);
        }

        text
    }

    /// Rewrite `segment.text` in place; `original_text` is left untouched
    pub fn normalize_segment(&self, segment: &mut Segment) {
        segment.text = self.normalize(&segment.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeInterval;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new(&NormalizerConfig {
            filler_phrases: vec!["um".into(), "uh".into(), "you know".into(), "sort of".into()],
            profanity_terms: vec!["damn".into()],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_full_normalization() {
        let n = normalizer();
        assert_eq!(
            n.normalize("  Um , the the  damn engine is sort of , you know , broken .. "),
            "the **** engine is broken."
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let n = normalizer();
        for input in [
            "you um know the the plan",
            "Sort of. sort of . Damn!!",
            "it's , uh , fine ... really",
            "",
        ] {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_duplicate_collapse_completing_a_filler_is_removed_at_once() {
        let n = TextNormalizer::new(&NormalizerConfig {
            filler_phrases: vec!["you know what".into()],
            ..Default::default()
        })
        .unwrap();

        let once = n.normalize("you know know what");
        assert_eq!(once, "");
        assert_eq!(n.normalize(&once), once);

        let once = n.normalize("Well, you know know what, the engine stalls");
        assert_eq!(once, "Well, the engine stalls");
        assert_eq!(n.normalize(&once), once);
    }

    #[test]
    fn test_masked_text_is_stable() {
        let n = TextNormalizer::new(&NormalizerConfig {
            profanity_terms: vec!["damn".into()],
            mask_char: '#',
            ..Default::default()
        })
        .unwrap();

        let once = n.normalize("damn it, damn. it");
        assert_eq!(once, "#### it, ####. it");
        assert_eq!(n.normalize(&once), once);
    }

    #[test]
    fn test_rejects_mask_char_the_cleanup_rewrites() {
        for mask in ['.', '!', ',', '。', ' ', 'x', '7'] {
            let result = TextNormalizer::new(&NormalizerConfig {
                mask_char: mask,
                ..Default::default()
            });
            assert!(
                matches!(result, Err(ConfigError::InvalidMaskChar(c)) if c == mask),
                "mask {mask:?}"
            );
        }
    }

    #[test]
    fn test_stages_can_be_disabled() {
        let n = TextNormalizer::new(&NormalizerConfig {
            filler_phrases: vec!["um".into()],
            profanity_terms: vec!["damn".into()],
            remove_fillers: false,
            mask_profanity: false,
            collapse_duplicates: false,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(n.normalize("um damn damn"), "um damn damn");
    }

    #[test]
    fn test_normalize_segment_preserves_original() {
        let n = normalizer();
        let mut segment = Segment::new(0, TimeInterval::known(0.0, 1.0), "A", "um hello");
        n.normalize_segment(&mut segment);
        assert_eq!(segment.text, "hello");
        assert_eq!(segment.original_text, "um hello");
    }
}
