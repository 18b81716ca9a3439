//! # UTF-16 Text Helpers
//!
//! The document buffer is stored as UTF-16 code units because that is the
//! unit external annotation systems count offsets in. These helpers keep
//! the conversions in one place.
//!
//! - **`range`**: `Range` and the interval predicates used by the parser
//!   and the edit engine

pub mod range;

pub use range::{Range, Relation};

/// Encodes a string into UTF-16 code units.
pub fn encode(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Decodes code units back into a string.
///
/// The engine only ever cuts at character boundaries, so the lossy path is
/// never taken for buffers it produced.
pub fn decode(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Length of `s` in UTF-16 code units.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Extracts the text covered by `range` as an owned String.
pub fn slice_to_string(units: &[u16], range: Range) -> String {
    let end = range.end.min(units.len());
    let start = range.start.min(end);
    decode(&units[start..end])
}

/// Finds `needle` in `haystack` at or after `from`.
pub fn find(haystack: &[u16], needle: &[u16], from: usize) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&at| haystack[at..].starts_with(needle))
}

/// Counts non-overlapping occurrences of `needle`.
pub fn count(haystack: &[u16], needle: &[u16]) -> usize {
    let mut total = 0;
    let mut from = 0;
    while let Some(at) = find(haystack, needle, from) {
        total += 1;
        from = at + needle.len();
    }
    total
}

pub fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// True if `at` falls between the two halves of a surrogate pair.
pub fn within_surrogate(units: &[u16], at: usize) -> bool {
    at > 0
        && at < units.len()
        && is_high_surrogate(units[at - 1])
        && is_low_surrogate(units[at])
}

/// Whitespace test on a single code unit. All whitespace lives in the BMP,
/// so surrogate halves are never whitespace.
pub fn is_whitespace_unit(unit: u16) -> bool {
    char::from_u32(u32::from(unit)).is_some_and(char::is_whitespace)
}

/// True if every unit is whitespace (an empty slice is blank).
pub fn is_blank(units: &[u16]) -> bool {
    units.iter().all(|&u| is_whitespace_unit(u))
}

/// Number of leading and trailing whitespace units.
pub fn whitespace_margins(units: &[u16]) -> (usize, usize) {
    let lead = units.iter().take_while(|&&u| is_whitespace_unit(u)).count();
    let trail = units[lead..]
        .iter()
        .rev()
        .take_while(|&&u| is_whitespace_unit(u))
        .count();
    (lead, trail)
}
