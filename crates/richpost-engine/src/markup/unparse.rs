use std::cmp::Reverse;
use std::collections::BTreeSet;

use super::kinds::{Delimiter, Link, link};
use crate::spans::{Span, SpanKind};
use crate::text;

/// A marker waiting to be spliced into the plain text.
struct Insertion {
    at: usize,
    key: (u8, Reverse<usize>, u8, usize),
    marker: String,
}

/// Writes plain text plus spans back out as markup.
///
/// # Marker Order
/// Markers sharing a position are ordered so the result parses back into
/// the same spans: closers come before openers, the span that started later
/// closes first, and the span that ends later opens first. Remaining ties
/// follow span order.
///
/// Kinds without markup syntax (underline, entity kinds such as `Url` or
/// `Hashtag`) emit nothing, and neither does a pre block's language.
///
/// # Escapes
/// Brackets and backslashes inside link text get a `\` in front, placed
/// after every other marker at that position. Targets go through
/// [`link::escape_target`].
pub fn unparse(plain: &str, spans: &[Span]) -> String {
    unparse_units(&text::encode(plain), spans)
}

pub fn unparse_units(units: &[u16], spans: &[Span]) -> String {
    let mut insertions = Vec::with_capacity(spans.len() * 2);
    let mut escapes = BTreeSet::new();
    for (index, span) in spans.iter().enumerate() {
        if span.kind.is_bracketed() {
            let end = span.end().min(units.len());
            escapes.extend(
                (span.offset.min(end)..end).filter(|&at| link::escaped_in_text(units[at])),
            );
        }
        let Some((open, close, rank)) = markers(&span.kind) else {
            continue;
        };
        insertions.push(Insertion {
            at: span.end(),
            key: (0, Reverse(span.offset), rank.close, index),
            marker: close,
        });
        insertions.push(Insertion {
            at: span.offset,
            key: (1, Reverse(span.end()), rank.open, index),
            marker: open,
        });
    }
    insertions.extend(escapes.into_iter().map(|at| Insertion {
        at,
        key: (2, Reverse(0), 0, 0),
        marker: char::from(Link::ESCAPE).to_string(),
    }));
    insertions.sort_by(|a, b| (a.at, a.key).cmp(&(b.at, b.key)));

    let mut out = units.to_vec();
    for insertion in insertions.into_iter().rev() {
        let mut at = insertion.at.min(out.len());
        while text::within_surrogate(&out, at) {
            at += 1;
        }
        out.splice(at..at, insertion.marker.encode_utf16());
    }
    text::decode(&out)
}

/// Tie-break ranks: delimiters wrap links, code sits between the two.
struct Rank {
    open: u8,
    close: u8,
}

fn markers(kind: &SpanKind) -> Option<(String, String, Rank)> {
    if let Some(delim) = Delimiter::for_kind(kind) {
        let rank = if delim.is_raw() {
            Rank { open: 1, close: 1 }
        } else {
            Rank { open: 0, close: 2 }
        };
        return Some((delim.as_str().to_string(), delim.as_str().to_string(), rank));
    }
    let target = link::escape_target(&link::target(kind)?);
    Some((
        char::from(Link::OPEN).to_string(),
        format!(
            "{}{}{target}{}",
            char::from(Link::CLOSE),
            char::from(Link::TARGET_OPEN),
            char::from(Link::TARGET_CLOSE)
        ),
        Rank { open: 2, close: 0 },
    ))
}
