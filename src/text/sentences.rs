use super::fillers::SENTENCE_TERMINATORS;

/// Split text into sentences.
///
/// A boundary is a run of terminators (plus closing quotes or brackets) followed by
/// whitespace or the end of the text. CJK terminators end a sentence even without a
/// following space.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !SENTENCE_TERMINATORS.contains(&c) {
            continue;
        }

        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if SENTENCE_TERMINATORS.contains(&next) || matches!(next, '"' | '\'' | ')' | ']' | '»' | '”') {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let at_boundary = matches!(c, '。' | '！' | '？')
            || chars.peek().is_none_or(|(_, next)| next.is_whitespace());
        if at_boundary {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

/// Number of sentences in `text`
pub fn count_sentences(text: &str) -> usize {
    split_sentences(text).len()
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
