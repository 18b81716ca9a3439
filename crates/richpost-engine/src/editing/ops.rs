use std::ops::Add;

use log::debug;

use super::cleanup;
use super::document::Document;
use crate::spans::{Span, SpanKind, adjust};
use crate::text::{self, Range};

/// Header length bounds accepted by [`Document::fix_header`], in code units.
const HEADER_LEN: std::ops::RangeInclusive<usize> = 5..=50;

impl Document {
    /// Removes leading and trailing whitespace.
    ///
    /// Spans are clipped to the kept region and re-based onto it; spans left
    /// entirely inside the trimmed margins are dropped.
    pub fn strip(&self) -> Self {
        let (lead, trail) = text::whitespace_margins(&self.units);
        let keep = Range::new(lead, self.units.len() - trail);
        let units = self.units[keep.start..keep.end].to_vec();
        let mut spans: Vec<_> = self
            .spans
            .iter()
            .filter_map(|span| {
                let start = span.offset.max(keep.start);
                let end = span.end().min(keep.end);
                (start < end).then(|| {
                    let mut span = span.clone();
                    span.set_range(Range::new(start - lead, end - lead));
                    span
                })
            })
            .collect();
        adjust::prune(&units, &mut spans);
        Self::from_parts(units, spans)
    }

    /// Replaces every non-overlapping occurrence of `old`, left to right.
    ///
    /// The search resumes right after each inserted replacement, so `new`
    /// may contain `old` without looping. An empty `old` changes nothing.
    pub fn replace(&self, old: &str, new: &str) -> Self {
        if old.is_empty() {
            debug!("replace called with an empty needle, nothing to do");
            return self.clone();
        }
        let old = text::encode(old);
        let new = text::encode(new);
        let mut units = self.units.clone();
        let mut spans = self.spans.clone();

        let mut from = 0;
        while let Some(at) = text::find(&units, &old, from) {
            splice(&mut units, &mut spans, Range::at(at, old.len()), &new);
            from = at + new.len();
        }
        Self::from_parts(units, spans)
    }

    /// Inserts plain text at a code-unit offset.
    ///
    /// A span ending at `at` grows to cover the insertion, a span starting
    /// at `at` moves right. An offset inside a surrogate pair is moved past
    /// the pair.
    ///
    /// # Panics
    /// If `at` is past the end of the buffer.
    pub fn insert(&self, at: usize, inserted: &str) -> Self {
        assert!(
            at <= self.units.len(),
            "insert position {at} out of bounds (text len: {})",
            self.units.len()
        );
        let mut at = at;
        while text::within_surrogate(&self.units, at) {
            at += 1;
        }
        let inserted = text::encode(inserted);
        let mut units = self.units.clone();
        let mut spans = self.spans.clone();
        adjust::insert_range(&mut spans, at, inserted.len());
        units.splice(at..at, inserted);
        adjust::prune(&units, &mut spans);
        Self::from_parts(units, spans)
    }

    /// Appends `other`; its spans move right by this document's length.
    /// Spans are never merged across the seam.
    pub fn concat(&self, other: &Document) -> Self {
        let shift = self.units.len();
        let mut units = self.units.clone();
        units.extend_from_slice(&other.units);
        let mut spans = self.spans.clone();
        spans.extend(other.spans.iter().map(|span| span.shifted(shift)));
        Self::from_parts(units, spans)
    }

    /// Parses `markup` and puts it in front of this document.
    pub fn prepend_markup(&self, markup: &str) -> Self {
        Document::from_markup(markup).concat(self)
    }

    /// Drops text-link and URL spans; the visible text stays.
    pub fn turn_off_links(&self) -> Self {
        let spans = self
            .spans
            .iter()
            .filter(|span| !span.kind.is_link())
            .cloned()
            .collect();
        Self::from_parts(self.units.clone(), spans)
    }

    /// Turns a decorated heading line into a clean bold heading.
    ///
    /// The header must occur exactly once and be 5 to 50 code units long.
    /// Emoji and spaces directly in front of it are taken in, bullet glyphs
    /// and emoji are removed, and the cleaned heading is made bold. Any
    /// failed check returns the document unchanged.
    pub fn fix_header(&self, header: &str) -> Self {
        if header.trim().is_empty() {
            return self.clone();
        }
        let needle = text::encode(header);
        if !HEADER_LEN.contains(&needle.len()) {
            debug!("header of {} units is outside {HEADER_LEN:?}, skipping", needle.len());
            return self.clone();
        }
        if text::count(&self.units, &needle) != 1 {
            debug!("header {header:?} is not unique in the document, skipping");
            return self.clone();
        }
        let Some(found) = text::find(&self.units, &needle, 0) else {
            return self.clone();
        };

        let mut start = found;
        while let Some((ch, width)) = char_before(&self.units, start) {
            if !cleanup::is_emoji_or_space(ch) {
                break;
            }
            start -= width;
        }
        let extended = Range::new(start, found + needle.len());
        let (lead, trail) = text::whitespace_margins(&self.units[extended.start..extended.end]);
        let heading = Range::new(extended.start + lead, extended.end - trail);

        let decorated = text::slice_to_string(&self.units, extended);
        let cleaned = cleanup::normalize_bullets(&decorated).replace('•', "");
        let cleaned = cleanup::remove_emojis(&cleaned);
        let cleaned = text::encode(cleaned.trim());

        let mut units = self.units.clone();
        let mut spans = self.spans.clone();
        splice(&mut units, &mut spans, heading, &cleaned);
        spans.push(Span::new(SpanKind::Bold, heading.start, cleaned.len()));
        adjust::trim_edges(&units, &mut spans);
        adjust::prune(&units, &mut spans);
        Self::from_parts(units, spans)
    }
}

/// Overwrites `range` with `new`, keeping spans consistent.
///
/// An equal-length substitution maps every unit onto its replacement, so
/// spans keep their ranges.
pub(crate) fn splice(units: &mut Vec<u16>, spans: &mut Vec<Span>, range: Range, new: &[u16]) {
    if range.len() != new.len() {
        adjust::splice_range(spans, range, new.len());
    }
    units.splice(range.start..range.end, new.iter().copied());
    adjust::prune(units, spans);
}

/// The character ending at `at` and its width in code units.
fn char_before(units: &[u16], at: usize) -> Option<(char, usize)> {
    let last = *units.get(at.checked_sub(1)?)?;
    if text::is_low_surrogate(last) && at >= 2 && text::is_high_surrogate(units[at - 2]) {
        let ch = char::decode_utf16([units[at - 2], last]).next()?.ok()?;
        return Some((ch, 2));
    }
    Some((char::from_u32(u32::from(last))?, 1))
}

impl Add<&Document> for &Document {
    type Output = Document;

    fn add(self, rhs: &Document) -> Document {
        self.concat(rhs)
    }
}

impl Add for Document {
    type Output = Document;

    fn add(self, rhs: Document) -> Document {
        self.concat(&rhs)
    }
}

impl Add<&str> for Document {
    type Output = Document;

    /// Parses `rhs` as markup before appending it.
    fn add(self, rhs: &str) -> Document {
        self.concat(&Document::from_markup(rhs))
    }
}

impl Add<Document> for &str {
    type Output = Document;

    fn add(self, rhs: Document) -> Document {
        rhs.prepend_markup(self)
    }
}
