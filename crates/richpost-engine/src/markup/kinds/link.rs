use std::sync::OnceLock;

use regex::Regex;

use crate::spans::SpanKind;

/// `[text](target)` link syntax with owned delimiter constants.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const TARGET_OPEN: u8 = b'(';
    pub const TARGET_CLOSE: u8 = b')';
    /// Escapes the next bracket or backslash inside link text and targets.
    pub const ESCAPE: u8 = b'\\';
    /// Units escaped inside link text.
    pub const TEXT_ESCAPED: [u8; 3] = [b'\\', b'[', b']'];
    /// Units escaped inside a link target.
    pub const TARGET_ESCAPED: [u8; 3] = [b'\\', b'(', b')'];

    /// Deep link written for a user mention.
    pub const USER_PREFIX: &'static str = "tg://user?id=";
    /// Deep link written for a custom emoji.
    pub const EMOJI_PREFIX: &'static str = "tg://emoji?id=";
}

fn mention_regex() -> &'static Regex {
    static MENTION_REGEX: OnceLock<Regex> = OnceLock::new();
    MENTION_REGEX.get_or_init(|| {
        Regex::new(r"^(?:mention:|tg://user\?id=)(\d+)$").expect("Invalid mention regex")
    })
}

fn emoji_regex() -> &'static Regex {
    static EMOJI_REGEX: OnceLock<Regex> = OnceLock::new();
    EMOJI_REGEX.get_or_init(|| {
        Regex::new(r"^(?:emoji:|tg://emoji\?id=)(\d+)$").expect("Invalid emoji regex")
    })
}

fn captured_id(re: &Regex, target: &str) -> Option<i64> {
    re.captures(target)?.get(1)?.as_str().parse().ok()
}

/// Kind of span produced by a link with the given target.
///
/// User and emoji deep links become their dedicated kinds; every other
/// target is kept verbatim as a text link.
pub fn resolve(target: &str) -> SpanKind {
    if let Some(user_id) = captured_id(mention_regex(), target) {
        return SpanKind::MentionName { user_id };
    }
    if let Some(document_id) = captured_id(emoji_regex(), target) {
        return SpanKind::CustomEmoji { document_id };
    }
    SpanKind::TextLink {
        url: target.to_string(),
    }
}

/// Target written inside `(...)` when unparsing a bracketed kind.
pub fn target(kind: &SpanKind) -> Option<String> {
    match kind {
        SpanKind::TextLink { url } => Some(url.clone()),
        SpanKind::MentionName { user_id } => Some(format!("{}{user_id}", Link::USER_PREFIX)),
        SpanKind::CustomEmoji { document_id } => {
            Some(format!("{}{document_id}", Link::EMOJI_PREFIX))
        }
        _ => None,
    }
}

/// Writes `target` so the parser reads it back unchanged.
///
/// Balanced parentheses are left alone (`wiki/Rust_(language)`); anything
/// else that could end the target early is backslash-escaped.
pub fn escape_target(target: &str) -> String {
    if !target.contains(char::from(Link::ESCAPE)) && parens_balanced(target) {
        return target.to_string();
    }
    let mut out = String::with_capacity(target.len() + 2);
    for ch in target.chars() {
        if u8::try_from(ch).is_ok_and(|b| Link::TARGET_ESCAPED.contains(&b)) {
            out.push(char::from(Link::ESCAPE));
        }
        out.push(ch);
    }
    out
}

fn parens_balanced(target: &str) -> bool {
    let mut depth = 0usize;
    for ch in target.chars() {
        if ch == char::from(Link::TARGET_OPEN) {
            depth += 1;
        } else if ch == char::from(Link::TARGET_CLOSE) {
            let Some(next) = depth.checked_sub(1) else {
                return false;
            };
            depth = next;
        }
    }
    depth == 0
}

/// True when `unit` must be escaped inside link text.
pub fn escaped_in_text(unit: u16) -> bool {
    u8::try_from(unit).is_ok_and(|b| Link::TEXT_ESCAPED.contains(&b))
}
