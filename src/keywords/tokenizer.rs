use std::collections::HashSet;

/// Extracts rankable terms from one document
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: HashSet<String>,
    /// Minimum term length in characters
    min_term_len: usize,
    /// Largest n-gram emitted (1 or 2)
    max_ngram: usize,
}

impl Tokenizer {
    pub fn new<I, S>(stopwords: I, min_term_len: usize, max_ngram: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect(),
            min_term_len: min_term_len.max(1),
            max_ngram: max_ngram.clamp(1, 2),
        }
    }

    /// Terms in order of appearance; bigrams follow the word that completes them
    pub fn terms(&self, text: &str) -> Vec<String> {
        let words: Vec<String> = text
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .filter(|w| w.chars().count() >= self.min_term_len && !self.stopwords.contains(w))
            .collect();

        if self.max_ngram < 2 {
            return words;
        }

        let mut terms = Vec::with_capacity(words.len() * 2);
        for (i, word) in words.iter().enumerate() {
            terms.push(word.clone());
            if i > 0 {
                terms.push(format!("{} {}", words[i - 1], word));
            }
        }
        terms
    }
}
