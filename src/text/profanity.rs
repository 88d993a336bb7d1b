use std::collections::HashSet;

use super::phrase::split_affixes;

/// Masks tokens that exactly match a curated block-list
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    terms: HashSet<String>,
    mask: char,
}

impl ProfanityFilter {
    pub fn new<I, S>(terms: I, mask: char) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms, mask }
    }

    /// Replace every blocked token in `text` with a mask of the same length
    pub fn mask(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| self.mask_token(token).unwrap_or_else(|| token.to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Masked form of `token`, or `None` when it is not blocked.
    /// Surrounding punctuation is kept.
    pub fn mask_token(&self, token: &str) -> Option<String> {
        let (prefix, core, suffix) = split_affixes(token);
        if core.is_empty() || !self.terms.contains(&core.to_lowercase()) {
            return None;
        }
        let masked: String = std::iter::repeat_n(self.mask, core.chars().count()).collect();
        Some(format!("{prefix}{masked}{suffix}"))
    }
}
