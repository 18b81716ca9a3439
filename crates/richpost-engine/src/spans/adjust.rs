//! Span-list bookkeeping shared by the parser and the edit engine.

use super::Span;
use crate::text::{self, Range};

/// Units a span may not start or end on. Spans built from markup are
/// trimmed so that `** hello**` formats only `hello`.
pub const NOT_AT_EDGE: [u16; 11] = [
    b' ' as u16,
    b'\n' as u16,
    b'\t' as u16,
    b'\r' as u16,
    b'\\' as u16,
    b'\'' as u16,
    b'"' as u16,
    0x07,
    0x08,
    0x0B,
    0x0C,
];

/// Adjusts every span for the removal of `deleted`.
pub fn delete_range(spans: &mut [Span], deleted: Range) {
    for span in spans {
        span.set_range(span.range().after_delete(deleted));
    }
}

/// Adjusts every span for `n` units inserted at `at`.
pub fn insert_range(spans: &mut [Span], at: usize, n: usize) {
    for span in spans {
        span.set_range(span.range().after_insert(at, n));
    }
}

/// Adjusts every span for `replaced` being overwritten by `n` units.
pub fn splice_range(spans: &mut [Span], replaced: Range, n: usize) {
    for span in spans {
        span.set_range(span.range().after_splice(replaced, n));
    }
}

/// Drops spans that are empty or cover only whitespace.
pub fn prune(units: &[u16], spans: &mut Vec<Span>) {
    spans.retain(|span| {
        span.length > 0
            && span.end() <= units.len()
            && !text::is_blank(&units[span.offset..span.end()])
    });
}

/// Moves span edges inward past `NOT_AT_EDGE` units.
pub fn trim_edges(units: &[u16], spans: &mut [Span]) {
    for span in spans {
        let end = span.end().min(units.len());
        let covered = &units[span.offset.min(end)..end];
        let lead = covered
            .iter()
            .take_while(|u| NOT_AT_EDGE.contains(u))
            .count();
        let trail = covered[lead..]
            .iter()
            .rev()
            .take_while(|u| NOT_AT_EDGE.contains(u))
            .count();
        span.set_range(Range::new(span.offset + lead, end - trail));
    }
}
