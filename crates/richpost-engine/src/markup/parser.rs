use std::sync::OnceLock;

use log::trace;
use regex::Regex;

use super::{
    cursor::Cursor,
    kinds::{Delimiter, Link, link},
};
use crate::spans::{Span, SpanKind, adjust};
use crate::text::{self, Range};

/// Output of [`parse`]: plain UTF-16 text and spans over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub units: Vec<u16>,
    pub spans: Vec<Span>,
}

impl Parsed {
    pub fn plain(&self) -> String {
        text::decode(&self.units)
    }
}

/// Parses markup into plain text plus spans.
///
/// # Precedence
/// At each position the parser tries a delimiter (longest first), then a
/// `[text](target)` link, then a bare URL. Markers are cut out of the buffer
/// as they match, and spans recorded earlier are shifted with the same
/// delete policy the edit engine uses.
///
/// # Raw Zones
/// Code and pre content is skipped after matching, so markers inside it stay
/// literal. Other content is rescanned, which lets formatting nest.
///
/// Unclosed markers are literal text; parsing never fails.
pub fn parse(markup: &str) -> Parsed {
    let mut cur = Cursor::from(markup);
    let mut spans = Vec::new();

    while !cur.eof() {
        if let Some(delim) = Delimiter::at(&cur) {
            if !try_parse_delimited(&mut cur, &mut spans, delim) {
                trace!("unclosed {:?} at {}, keeping it as text", delim.as_str(), cur.pos());
                cur.bump_n(delim.width());
            }
            continue;
        }
        if try_parse_link(&mut cur, &mut spans) {
            continue;
        }
        if try_parse_bare_url(&mut cur, &mut spans) {
            continue;
        }
        cur.bump();
    }

    Parsed {
        units: cur.into_inner(),
        spans,
    }
}

/// Attempts to match `delim` at the cursor against its next occurrence.
///
/// The closing marker is searched at least one unit past the opening one so
/// `****` stays literal instead of producing an empty span.
fn try_parse_delimited(cur: &mut Cursor, spans: &mut Vec<Span>, delim: Delimiter) -> bool {
    let start = cur.pos();
    let width = delim.width();
    let Some(close) = cur.find(delim.marker(), start + width + 1) else {
        return false;
    };

    // closing marker first so the opening one keeps its position
    cut(cur, spans, Range::at(close, width));
    cut(cur, spans, Range::at(start, width));
    let end = close - width;
    spans.push(Span::new(delim.kind(), start, end - start));

    if delim.is_raw() {
        cur.seek(end);
    } else {
        cur.seek(start);
    }
    true
}

/// Attempts to parse `[text](target)` at the cursor.
///
/// The text must be non-empty and is left in place so formatting inside it
/// is parsed afterwards; `\[`, `\]` and `\\` in it stand for the bare
/// unit. The target must be non-empty; it ends at the first `)` outside
/// balanced parentheses, and `\(`, `\)` and `\\` in it are unescaped.
/// Links are never opened inside another link's text.
fn try_parse_link(cur: &mut Cursor, spans: &mut Vec<Span>) -> bool {
    if cur.peek() != Some(u16::from(Link::OPEN)) {
        return false;
    }
    let open = cur.pos();
    if inside_bracketed(spans, open) {
        return false;
    }
    let Some((text_end, escapes)) = scan_link_text(cur, open + 1) else {
        return false;
    };
    if text_end == open + 1 || cur.unit_at(text_end + 1) != Some(u16::from(Link::TARGET_OPEN)) {
        return false;
    }
    let Some((target_end, target)) = scan_target(cur, text_end + 2) else {
        return false;
    };
    if target.is_empty() {
        return false;
    }

    cut(cur, spans, Range::new(text_end, target_end + 1));
    for &at in escapes.iter().rev() {
        cut(cur, spans, Range::at(at, 1));
    }
    cut(cur, spans, Range::at(open, 1));
    let text_len = text_end - open - 1 - escapes.len();
    spans.push(Span::new(link::resolve(&target), open, text_len));
    cur.seek(open);
    true
}

/// Finds the `]` closing link text that starts at `from`, and the positions
/// of escape units inside the text.
fn scan_link_text(cur: &Cursor, from: usize) -> Option<(usize, Vec<usize>)> {
    let mut escapes = Vec::new();
    let mut at = from;
    loop {
        let unit = cur.unit_at(at)?;
        if unit == u16::from(Link::ESCAPE) && cur.unit_at(at + 1).is_some_and(link::escaped_in_text)
        {
            escapes.push(at);
            at += 2;
        } else if unit == u16::from(Link::CLOSE) {
            return Some((at, escapes));
        } else {
            at += 1;
        }
    }
}

/// Reads a link target starting at `from`; returns the position of the
/// closing `)` and the unescaped target.
fn scan_target(cur: &Cursor, from: usize) -> Option<(usize, String)> {
    let mut target = Vec::new();
    let mut depth = 0usize;
    let mut at = from;
    loop {
        let unit = cur.unit_at(at)?;
        if unit == u16::from(Link::ESCAPE) {
            if let Some(next) = cur
                .unit_at(at + 1)
                .filter(|&u| u8::try_from(u).is_ok_and(|b| Link::TARGET_ESCAPED.contains(&b)))
            {
                target.push(next);
                at += 2;
                continue;
            }
        } else if unit == u16::from(Link::TARGET_OPEN) {
            depth += 1;
        } else if unit == u16::from(Link::TARGET_CLOSE) {
            match depth.checked_sub(1) {
                Some(next) => depth = next,
                None => return Some((at, text::decode(&target))),
            }
        }
        target.push(unit);
        at += 1;
    }
}

fn inside_bracketed(spans: &[Span], at: usize) -> bool {
    spans
        .iter()
        .any(|s| s.kind.is_bracketed() && s.offset <= at && at < s.end())
}

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| Regex::new(r"^https?://[^\s<>\[\]]+").expect("Invalid URL regex"))
}

/// Attempts to recognise a bare `http(s)://` URL at the cursor.
///
/// The visible text is the URL itself, so nothing is cut; a `Url` span is
/// recorded over it and the cursor moves past. Trailing punctuation that
/// usually ends a sentence is not part of the URL, and neither is anything
/// from the first delimiter marker on.
fn try_parse_bare_url(cur: &mut Cursor, spans: &mut Vec<Span>) -> bool {
    if !cur.starts_with(b"http") {
        return false;
    }
    if cur
        .prev()
        .and_then(|u| char::from_u32(u32::from(u)))
        .is_some_and(char::is_alphanumeric)
    {
        return false;
    }
    let at = cur.pos();
    if inside_bracketed(spans, at) {
        return false;
    }

    let run_len = cur
        .rest()
        .iter()
        .take_while(|&&u| !text::is_whitespace_unit(u))
        .count();
    let run = text::decode(&cur.rest()[..run_len]);
    let Some(m) = url_regex().find(&run) else {
        return false;
    };
    let url = m.as_str();
    // markers written by the unparser end the URL
    let url = Delimiter::ALL
        .iter()
        .filter_map(|delim| url.find(delim.as_str()))
        .min()
        .map_or(url, |cut_at| &url[..cut_at]);
    let url = url
        .trim_end_matches(['.', ',', ':', ';', '!', '?', ')', ']', '}']);
    if url.ends_with("://") {
        return false;
    }

    let len = text::utf16_len(url);
    spans.push(Span::new(SpanKind::Url, at, len));
    cur.bump_n(len);
    true
}

/// Cuts `range` out of the buffer and shifts recorded spans.
fn cut(cur: &mut Cursor, spans: &mut [Span], range: Range) {
    adjust::delete_range(spans, range);
    cur.cut(range);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn spans_of(markup: &str) -> Vec<(SpanKind, usize, usize)> {
        parse(markup)
            .spans
            .into_iter()
            .map(|s| (s.kind, s.offset, s.length))
            .collect()
    }

    #[test]
    fn two_bold_words() {
        let parsed = parse("**hello** **hello**");
        assert_eq!(parsed.plain(), "hello hello");
        assert_eq!(
            spans_of("**hello** **hello**"),
            vec![(SpanKind::Bold, 0, 5), (SpanKind::Bold, 6, 5)]
        );
    }

    #[rstest]
    #[case("**b**", SpanKind::Bold)]
    #[case("__i__", SpanKind::Italic)]
    #[case("~~s~~", SpanKind::Strike)]
    #[case("`c`", SpanKind::Code)]
    #[case("```p```", SpanKind::Pre { language: None })]
    fn each_delimiter(#[case] markup: &str, #[case] kind: SpanKind) {
        let parsed = parse(markup);
        assert_eq!(parsed.plain().len(), 1);
        assert_eq!(parsed.spans, vec![Span::new(kind, 0, 1)]);
    }

    #[test]
    fn four_stars_stay_literal() {
        let parsed = parse("****");
        assert_eq!(parsed.plain(), "****");
        assert!(parsed.spans.is_empty());
    }

    #[test]
    fn unclosed_delimiter_is_literal() {
        let parsed = parse("a ** b __c__");
        assert_eq!(parsed.plain(), "a ** b c");
        assert_eq!(parsed.spans, vec![Span::new(SpanKind::Italic, 7, 1)]);
    }

    #[test]
    fn nested_delimiters_shrink_outer_span() {
        let parsed = parse("**a __b__ c**");
        assert_eq!(parsed.plain(), "a b c");
        assert_eq!(
            parsed.spans,
            vec![Span::new(SpanKind::Bold, 0, 5), Span::new(SpanKind::Italic, 2, 1)]
        );
    }

    #[test]
    fn code_suppresses_nested_markup() {
        let parsed = parse("`**x**` **y**");
        assert_eq!(parsed.plain(), "**x** y");
        assert_eq!(
            parsed.spans,
            vec![Span::new(SpanKind::Code, 0, 5), Span::new(SpanKind::Bold, 6, 1)]
        );
    }

    #[rstest]
    #[case("```rust\nfn main() {}```", "rust\nfn main() {}")]
    #[case("```Requirements\n- Rust 3y```", "Requirements\n- Rust 3y")]
    #[case("```rust```", "rust")]
    fn pre_content_is_kept_verbatim(#[case] markup: &str, #[case] plain: &str) {
        let parsed = parse(markup);
        assert_eq!(parsed.plain(), plain);
        assert_eq!(
            parsed.spans,
            vec![Span::new(
                SpanKind::Pre { language: None },
                0,
                plain.encode_utf16().count()
            )]
        );
    }

    #[test]
    fn link_becomes_text_link() {
        let parsed = parse("see [this](github.com) now");
        assert_eq!(parsed.plain(), "see this now");
        assert_eq!(
            parsed.spans,
            vec![Span::new(
                SpanKind::TextLink {
                    url: "github.com".into()
                },
                4,
                4
            )]
        );
    }

    #[test]
    fn link_text_may_hold_formatting() {
        let parsed = parse("[**hi** you](https://a.io)");
        assert_eq!(parsed.plain(), "hi you");
        assert_eq!(
            parsed.spans,
            vec![
                Span::new(
                    SpanKind::TextLink {
                        url: "https://a.io".into()
                    },
                    0,
                    6
                ),
                Span::new(SpanKind::Bold, 0, 2),
            ]
        );
    }

    #[test]
    fn link_target_keeps_balanced_parentheses() {
        let parsed = parse("[Rust](https://en.wikipedia.org/wiki/Rust_(language)) rocks");
        assert_eq!(parsed.plain(), "Rust rocks");
        assert_eq!(
            parsed.spans,
            vec![Span::new(
                SpanKind::TextLink {
                    url: "https://en.wikipedia.org/wiki/Rust_(language)".into()
                },
                0,
                4
            )]
        );
    }

    #[test]
    fn link_target_escapes_are_removed() {
        assert_eq!(
            spans_of(r"[a](x\)y)"),
            vec![(SpanKind::TextLink { url: "x)y".into() }, 0, 1)]
        );
    }

    #[test]
    fn escaped_brackets_in_link_text() {
        let parsed = parse(r"see [a\]b\[c](u) ok");
        assert_eq!(parsed.plain(), "see a]b[c ok");
        assert_eq!(
            parsed.spans,
            vec![Span::new(SpanKind::TextLink { url: "u".into() }, 4, 5)]
        );
    }

    #[test]
    fn escapes_inside_link_text_shift_nested_spans() {
        let parsed = parse(r"[a**\]**](u)");
        assert_eq!(parsed.plain(), "a]");
        assert_eq!(
            parsed.spans,
            vec![
                Span::new(SpanKind::TextLink { url: "u".into() }, 0, 2),
                Span::new(SpanKind::Bold, 1, 1),
            ]
        );
    }

    #[test]
    fn unescaped_bracket_in_link_text_does_not_open_a_link() {
        let parsed = parse(r"[\[x\](y)](u)");
        assert_eq!(parsed.plain(), "[x](y)");
        assert_eq!(
            parsed.spans,
            vec![Span::new(SpanKind::TextLink { url: "u".into() }, 0, 6)]
        );
    }

    #[test]
    fn mention_and_emoji_links() {
        assert_eq!(
            spans_of("[Ann](tg://user?id=5) [x](emoji:9)"),
            vec![
                (SpanKind::MentionName { user_id: 5 }, 0, 3),
                (SpanKind::CustomEmoji { document_id: 9 }, 4, 1),
            ]
        );
    }

    #[rstest]
    #[case("[](x)")]
    #[case("[a]()")]
    #[case("[a] (x)")]
    #[case("[a](x")]
    fn incomplete_links_are_literal(#[case] markup: &str) {
        let parsed = parse(markup);
        assert_eq!(parsed.plain(), markup);
        assert!(parsed.spans.is_empty());
    }

    #[test]
    fn bare_url_is_detected_without_trailing_punctuation() {
        let parsed = parse("go to https://example.com/a?b=1. ok");
        assert_eq!(parsed.plain(), "go to https://example.com/a?b=1. ok");
        assert_eq!(parsed.spans, vec![Span::new(SpanKind::Url, 6, 25)]);
    }

    #[test]
    fn bare_url_inside_bold() {
        let parsed = parse("**https://a.io**");
        assert_eq!(parsed.plain(), "https://a.io");
        assert_eq!(
            parsed.spans,
            vec![Span::new(SpanKind::Bold, 0, 12), Span::new(SpanKind::Url, 0, 12)]
        );
    }

    #[test]
    fn bare_url_stops_at_delimiter_markers() {
        let parsed = parse("see https://a.io/**path**");
        assert_eq!(parsed.plain(), "see https://a.io/path");
        assert_eq!(
            parsed.spans,
            vec![Span::new(SpanKind::Url, 4, 13), Span::new(SpanKind::Bold, 17, 4)]
        );

        let parsed = parse("https://a.io/__x y__");
        assert_eq!(parsed.plain(), "https://a.io/x y");
        assert_eq!(
            parsed.spans,
            vec![Span::new(SpanKind::Url, 0, 13), Span::new(SpanKind::Italic, 13, 3)]
        );
    }

    #[test]
    fn bare_url_keeps_single_underscores() {
        let parsed = parse("https://a.io/snake_case");
        assert_eq!(parsed.spans, vec![Span::new(SpanKind::Url, 0, 23)]);
    }

    #[test]
    fn bare_url_inside_link_text_is_not_doubled() {
        let parsed = parse("[https://a.io](https://a.io)");
        assert_eq!(parsed.spans.len(), 1);
    }

    #[test]
    fn url_glued_to_word_is_ignored() {
        assert!(parse("xhttps://a.io").spans.is_empty());
        assert!(parse("http:// nothing").spans.is_empty());
    }

    #[test]
    fn offsets_count_utf16_units() {
        let parsed = parse("🫡 **привет**");
        assert_eq!(parsed.spans, vec![Span::new(SpanKind::Bold, 3, 6)]);
    }

    #[test]
    fn empty_input() {
        let parsed = parse("");
        assert!(parsed.units.is_empty());
        assert!(parsed.spans.is_empty());
    }
}
