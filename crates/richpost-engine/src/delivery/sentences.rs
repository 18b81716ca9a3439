/// Splits text into sentences for length-aware cutting.
///
/// Every returned sentence must occur verbatim in `text`, trailing
/// separators included, so it can be removed with a plain substring
/// replace.
pub trait SentenceSplitter {
    fn split(&self, text: &str, language: &str) -> Vec<String>;
}

/// Splits after runs of `.`, `!`, `?` or `;` followed by whitespace, and
/// after line breaks.
///
/// Trailing whitespace stays with the sentence it follows. Blank pieces and
/// pieces that are only a dot are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSplitter;

const TERMINATORS: [char; 4] = ['.', '!', '?', ';'];

impl SentenceSplitter for PunctuationSplitter {
    fn split(&self, text: &str, _language: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((at, ch)) = chars.next() {
            let mut end = at + ch.len_utf8();
            if TERMINATORS.contains(&ch) {
                while let Some(&(next_at, next)) = chars.peek() {
                    if !TERMINATORS.contains(&next) {
                        break;
                    }
                    end = next_at + next.len_utf8();
                    chars.next();
                }
                let at_boundary = chars.peek().is_none_or(|&(_, next)| next.is_whitespace());
                if !at_boundary {
                    continue;
                }
            } else if ch != '\n' {
                continue;
            }
            while let Some(&(next_at, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = next_at + next.len_utf8();
                chars.next();
            }
            sentences.push(&text[start..end]);
            start = end;
        }
        if start < text.len() {
            sentences.push(&text[start..]);
        }

        sentences
            .into_iter()
            .filter(|s| !s.trim().is_empty() && s.trim() != ".")
            .map(str::to_string)
            .collect()
    }
}
