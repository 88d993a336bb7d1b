use regex::{Captures, Regex};

use crate::error::ConfigError;

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop a word when it repeats the previous word (case-insensitive)
pub fn remove_consecutive_duplicates(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        let repeats = kept
            .last()
            .is_some_and(|previous| previous.to_lowercase() == word.to_lowercase());
        if !repeats {
            kept.push(word);
        }
    }
    kept.join(" ")
}

/// Marks the cleaner reattaches to the previous word
pub(crate) const PUNCTUATION_MARKS: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Reattaches detached punctuation and collapses repeated marks
#[derive(Debug, Clone)]
pub struct PunctuationCleaner {
    detached: Regex,
    repeated: Regex,
}

impl PunctuationCleaner {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            detached: Regex::new(r"\s+([.,!?;:])")?,
            repeated: Regex::new(r"\.{2,}|,{2,}|!{2,}|\?{2,}|;{2,}|:{2,}|。{2,}|！{2,}|？{2,}")?,
        })
    }

    pub fn clean(&self, text: &str) -> String {
        let attached = self.detached.replace_all(text, "$1");
        self.repeated
            .replace_all(&attached, |caps: &Captures| {
                caps[0].chars().next().map(String::from).unwrap_or_default()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  hello \n\t world  "), "hello world");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_remove_consecutive_duplicates() {
        assert_eq!(remove_consecutive_duplicates("the The plan plan is"), "the plan is");
        assert_eq!(remove_consecutive_duplicates("no no, yes"), "no no, yes");
    }

    #[test]
    fn test_punctuation_cleanup() {
        let cleaner = PunctuationCleaner::new().unwrap();
        assert_eq!(cleaner.clean("hello , world !!"), "hello, world!");
        assert_eq!(cleaner.clean("wait . . . what"), "wait. what");
        assert_eq!(cleaner.clean("好的。。。"), "好的。");
        assert_eq!(cleaner.clean("version 3.5 ships"), "version 3.5 ships");
    }
}
