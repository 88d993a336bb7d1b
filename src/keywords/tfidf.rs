use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::Tokenizer;
use crate::models::{KeywordMethod, KeywordScore};

/// Outcome of ranking one recording
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub keywords: Vec<KeywordScore>,
    /// `TermFrequency` when fewer than two documents contain terms
    pub method: KeywordMethod,
}

#[derive(Debug, Clone, Copy)]
struct TermStats {
    first_seen: usize,
    term_frequency: usize,
    document_frequency: usize,
}

/// Multi-document keyword ranker; every segment text is one document
#[derive(Debug, Clone)]
pub struct KeywordRanker {
    tokenizer: Tokenizer,
    top_n: usize,
}

impl KeywordRanker {
    pub fn new(tokenizer: Tokenizer, top_n: usize) -> Self {
        Self { tokenizer, top_n }
    }

    /// Rank terms across `documents`.
    ///
    /// score(t) = tf(t) * (ln((1 + N) / (1 + df(t))) + 1), with N the number of documents
    /// and tf summed over the recording. With fewer than two documents that contain terms
    /// IDF is constant, so raw term frequency is used and reported as such.
    pub fn rank<S: AsRef<str>>(&self, documents: &[S]) -> Ranking {
        let mut stats: HashMap<String, TermStats> = HashMap::new();
        let mut next_position = 0usize;
        let mut non_empty_documents = 0usize;

        for document in documents {
            let terms = self.tokenizer.terms(document.as_ref());
            if !terms.is_empty() {
                non_empty_documents += 1;
            }

            let mut seen_here: HashSet<&str> = HashSet::new();
            for term in &terms {
                let entry = stats.entry(term.clone()).or_insert_with(|| {
                    let stats = TermStats {
                        first_seen: next_position,
                        term_frequency: 0,
                        document_frequency: 0,
                    };
                    next_position += 1;
                    stats
                });
                entry.term_frequency += 1;
                if seen_here.insert(term.as_str()) {
                    entry.document_frequency += 1;
                }
            }
        }

        let method = if non_empty_documents >= 2 {
            KeywordMethod::Tfidf
        } else {
            if non_empty_documents == 1 {
                warn!("Only one segment has terms; ranking by raw term frequency");
            }
            KeywordMethod::TermFrequency
        };
        let total_documents = documents.len() as f64;

        let mut scored: Vec<(String, f64, usize)> = stats
            .into_iter()
            .map(|(term, s)| {
                let tf = s.term_frequency as f64;
                let score = match method {
                    KeywordMethod::Tfidf => {
                        let idf = ((1.0 + total_documents) / (1.0 + s.document_frequency as f64)).ln() + 1.0;
                        tf * idf
                    }
                    KeywordMethod::TermFrequency => tf,
                };
                (term, score, s.first_seen)
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.2.cmp(&b.2)));

        debug!(
            "Ranked {} distinct terms over {} documents ({} with terms)",
            scored.len(),
            documents.len(),
            non_empty_documents
        );

        let keywords = scored
            .into_iter()
            .take(self.top_n)
            .enumerate()
            .map(|(i, (term, score, _))| KeywordScore {
                rank: i + 1,
                term,
                score,
            })
            .collect();

        Ranking { keywords, method }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranker(top_n: usize) -> KeywordRanker {
        KeywordRanker::new(Tokenizer::new(["the", "a"], 2, 1), top_n)
    }

    fn terms(ranking: &Ranking) -> Vec<&str> {
        ranking.keywords.iter().map(|k| k.term.as_str()).collect()
    }

    #[test]
    fn test_idf_outranks_raw_frequency() {
        let documents = [
            "alpha beta beta beta",
            "alpha gamma",
            "alpha delta",
            "alpha epsilon",
        ];
        let ranking = ranker(10).rank(&documents);

        assert_eq!(ranking.method, KeywordMethod::Tfidf);
        // alpha is the most frequent term but appears in every document
        assert_eq!(terms(&ranking), vec!["beta", "alpha", "gamma", "delta", "epsilon"]);

        let beta = &ranking.keywords[0];
        let expected = 3.0 * ((5.0f64 / 2.0).ln() + 1.0);
        assert!((beta.score - expected).abs() < 1e-9);
        assert_eq!(beta.rank, 1);
        assert!((ranking.keywords[1].score - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_document_falls_back_to_term_frequency() {
        let ranking = ranker(10).rank(&["engine noise engine", "", "the a"]);
        assert_eq!(ranking.method, KeywordMethod::TermFrequency);
        assert_eq!(terms(&ranking), vec!["engine", "noise"]);
        assert_eq!(ranking.keywords[0].score, 2.0);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let ranking = ranker(10).rank(&["zulu yankee", "xray whiskey"]);
        assert_eq!(terms(&ranking), vec!["zulu", "yankee", "xray", "whiskey"]);
    }

    #[test]
    fn test_top_n_and_empty_corpus() {
        let ranking = ranker(2).rank(&["one two three", "four five six"]);
        assert_eq!(ranking.keywords.len(), 2);

        let empty: [&str; 0] = [];
        let ranking = ranker(10).rank(&empty);
        assert!(ranking.keywords.is_empty());
    }

    #[test]
    fn test_scores_are_non_negative() {
        let ranking = ranker(10).rank(&["shared word", "shared word", "shared word"]);
        assert!(ranking.keywords.iter().all(|k| k.score >= 0.0));
    }
}
