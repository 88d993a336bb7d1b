use super::phrase::{token_key, PhraseSet};

/// Characters that end a sentence
pub(crate) const SENTENCE_TERMINATORS: [char; 7] = ['.', '!', '?', '…', '。', '！', '？'];

/// Remove filler phrases from `text`.
///
/// Each pass scans left to right and tries the longest configured phrase first; matched
/// tokens are dropped as a unit. Passes repeat until nothing is removed, since dropping a
/// filler can bring the tokens of another filler phrase together. A removed phrase's
/// sentence terminator moves onto the previous kept token.
pub fn remove_fillers(text: &str, fillers: &PhraseSet) -> String {
    let mut tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();

    if !fillers.is_empty() {
        loop {
            let (kept, removed) = remove_pass(&tokens, fillers);
            tokens = kept;
            if !removed {
                break;
            }
        }
    }

    tokens.join(" ")
}

fn remove_pass(tokens: &[String], fillers: &PhraseSet) -> (Vec<String>, bool) {
    let keys: Vec<String> = tokens.iter().map(|t| token_key(t)).collect();
    let mut kept: Vec<String> = Vec::with_capacity(tokens.len());
    let mut removed = false;
    let mut pos = 0;

    while pos < tokens.len() {
        match fillers.longest_match(&keys, pos) {
            Some(len) => {
                let last = &tokens[pos + len - 1];
                if let (Some(terminator), Some(previous)) = (trailing_terminator(last), kept.last_mut()) {
                    carry_terminator(previous, terminator);
                }
                removed = true;
                pos += len;
            }
            None => {
                kept.push(tokens[pos].clone());
                pos += 1;
            }
        }
    }

    (kept, removed)
}

fn trailing_terminator(token: &str) -> Option<char> {
    token
        .chars()
        .rev()
        .take_while(|c| !c.is_alphanumeric())
        .find(|c| SENTENCE_TERMINATORS.contains(c))
}

fn carry_terminator(token: &mut String, terminator: char) {
    let trimmed = token.trim_end_matches([',', ';', ':']).len();
    token.truncate(trimmed);
    if !token.ends_with(SENTENCE_TERMINATORS) {
        token.push(terminator);
    }
}
