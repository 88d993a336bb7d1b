use std::collections::HashSet;

/// Split a token into `(prefix, core, suffix)` where the core starts and ends on an
/// alphanumeric character. Punctuation-only tokens have an empty core.
pub fn split_affixes(token: &str) -> (&str, &str, &str) {
    let core_start = token
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, _)| i);

    let Some(core_start) = core_start else {
        return (token, "", "");
    };

    let core_end = token
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(token.len());

    (
        &token[..core_start],
        &token[core_start..core_end],
        &token[core_end..],
    )
}

/// Matching key for a token: its core, lowercased
pub fn token_key(token: &str) -> String {
    split_affixes(token).1.to_lowercase()
}

/// A set of token sequences matched longest-first against a token stream
#[derive(Debug, Clone, Default)]
pub struct PhraseSet {
    phrases: HashSet<Vec<String>>,
    max_len: usize,
}

impl PhraseSet {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for phrase in phrases {
            let keys: Vec<String> = phrase
                .as_ref()
                .split_whitespace()
                .map(token_key)
                .filter(|k| !k.is_empty())
                .collect();
            if keys.is_empty() {
                continue;
            }
            set.max_len = set.max_len.max(keys.len());
            set.phrases.insert(keys);
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Token length of the longest phrase starting at `keys[pos]`
    pub fn longest_match(&self, keys: &[String], pos: usize) -> Option<usize> {
        let available = keys.len().saturating_sub(pos);
        (1..=self.max_len.min(available))
            .rev()
            .find(|&len| self.phrases.contains(&keys[pos..pos + len]))
    }

    /// Non-overlapping occurrences in `text`, scanning left to right
    pub fn count_matches(&self, text: &str) -> usize {
        if self.is_empty() {
            return 0;
        }
        let keys: Vec<String> = text.split_whitespace().map(token_key).collect();
        let mut count = 0;
        let mut pos = 0;
        while pos < keys.len() {
            match self.longest_match(&keys, pos) {
                Some(len) => {
                    count += 1;
                    pos += len;
                }
                None => pos += 1,
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(text: &str) -> Vec<String> {
        text.split_whitespace().map(token_key).collect()
    }

    #[test]
    fn test_split_affixes() {
        assert_eq!(split_affixes("(hello),"), ("(", "hello", "),"));
        assert_eq!(split_affixes("don't."), ("", "don't", "."));
        assert_eq!(split_affixes("..."), ("...", "", ""));
        assert_eq!(split_affixes("привет!"), ("", "привет", "!"));
    }

    #[test]
    fn test_longest_match_prefers_longer_phrase() {
        let set = PhraseSet::new(["you", "you know", "you know what"]);
        let k = keys("You know, that else");
        assert_eq!(set.longest_match(&k, 0), Some(2));

        let k = keys("you know what");
        assert_eq!(set.longest_match(&k, 0), Some(3));
    }

    #[test]
    fn test_no_partial_match() {
        let set = PhraseSet::new(["sort of"]);
        let k = keys("sort the list of items");
        assert!((0..k.len()).all(|pos| set.longest_match(&k, pos).is_none()));
    }

    #[test]
    fn test_count_matches() {
        let set = PhraseSet::new(["oil change", "engine"]);
        assert_eq!(set.count_matches("The engine needs an oil change. Engine!"), 3);
        assert_eq!(PhraseSet::default().count_matches("engine"), 0);
    }
}
