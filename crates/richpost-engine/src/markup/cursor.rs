use crate::text::{self, Range};

/// A cursor over a UTF-16 buffer that is being rewritten while it is scanned.
///
/// Markers are cut out of the buffer as soon as they are matched, so the
/// cursor owns the buffer and positions always refer to the plain text
/// produced so far.
#[derive(Clone)]
pub struct Cursor {
    units: Vec<u16>,
    /// Current index into `units`.
    i: usize,
}

impl Cursor {
    /// Creates a new cursor at the start of `units`.
    pub fn new(units: Vec<u16>) -> Self {
        Self { units, i: 0 }
    }

    /// Returns the current position in code units.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of buffer.
    pub fn eof(&self) -> bool {
        self.i >= self.units.len()
    }

    /// Peeks at the current unit without advancing.
    pub fn peek(&self) -> Option<u16> {
        self.units.get(self.i).copied()
    }

    /// The unit just before the cursor.
    pub fn prev(&self) -> Option<u16> {
        self.i.checked_sub(1).and_then(|at| self.units.get(at).copied())
    }

    pub fn unit_at(&self, at: usize) -> Option<u16> {
        self.units.get(at).copied()
    }

    /// Checks if the remaining input starts with the given ASCII pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        matches_ascii(self.rest(), pat)
    }

    /// Finds the ASCII pattern at or after `from`.
    pub fn find(&self, pat: &[u8], from: usize) -> Option<usize> {
        if pat.is_empty() || pat.len() > self.units.len() {
            return None;
        }
        (from..=self.units.len() - pat.len()).find(|&at| matches_ascii(&self.units[at..], pat))
    }

    /// Finds a single ASCII unit at or after `from`.
    pub fn find_unit(&self, unit: u8, from: usize) -> Option<usize> {
        let from = from.min(self.units.len());
        self.units[from..]
            .iter()
            .position(|&u| u == u16::from(unit))
            .map(|at| from + at)
    }

    /// Advances by one unit, returning the consumed unit.
    pub fn bump(&mut self) -> Option<u16> {
        let u = self.peek()?;
        self.i += 1;
        Some(u)
    }

    /// Advances by `n` units, stopping at the end of the buffer.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.units.len());
    }

    /// Moves to an absolute position.
    pub fn seek(&mut self, at: usize) {
        self.i = at.min(self.units.len());
    }

    /// Units from the cursor to the end.
    pub fn rest(&self) -> &[u16] {
        &self.units[self.i.min(self.units.len())..]
    }

    pub fn slice(&self, range: Range) -> &[u16] {
        &self.units[range.start..range.end]
    }

    /// Removes `range` from the buffer. A cursor past the cut moves back with
    /// the text it was on.
    pub fn cut(&mut self, range: Range) {
        self.units.drain(range.start..range.end);
        if self.i >= range.end {
            self.i -= range.len();
        } else if self.i > range.start {
            self.i = range.start;
        }
    }

    pub fn into_inner(self) -> Vec<u16> {
        self.units
    }
}

impl From<&str> for Cursor {
    fn from(s: &str) -> Self {
        Self::new(text::encode(s))
    }
}

fn matches_ascii(units: &[u16], pat: &[u8]) -> bool {
    units.len() >= pat.len() && units.iter().zip(pat).all(|(&u, &b)| u == u16::from(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::from("hello");
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(u16::from(b'h')));
        assert_eq!(cur.bump(), Some(u16::from(b'h')));
        assert_eq!(cur.pos(), 1);
        assert_eq!(cur.prev(), Some(u16::from(b'h')));
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::from("**bold**");
        assert!(cur.starts_with(b"**"));
        assert!(!cur.starts_with(b"__"));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::from("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.prev(), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn starts_with_pattern_longer_than_remaining() {
        let mut cur = Cursor::from("ab");
        assert!(!cur.starts_with(b"abcdef"));

        cur.bump();
        assert!(!cur.starts_with(b"bc"));
        assert!(cur.starts_with(b"b"));
    }

    #[test]
    fn starts_with_at_eof() {
        let mut cur = Cursor::from("ab");
        cur.bump_n(2);
        assert!(cur.eof());
        // Empty pattern should still match at EOF
        assert!(cur.starts_with(b""));
        assert!(!cur.starts_with(b"a"));
    }

    #[test]
    fn bump_n_past_end_is_clamped() {
        let mut cur = Cursor::from("hi");
        cur.bump_n(10);
        assert!(cur.eof());
        assert_eq!(cur.pos(), 2);
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::from("x");
        cur.bump();
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn find_pattern_from_offset() {
        let cur = Cursor::from("**a** **b**");
        assert_eq!(cur.find(b"**", 0), Some(0));
        assert_eq!(cur.find(b"**", 1), Some(3));
        assert_eq!(cur.find(b"**", 10), None);
        assert_eq!(cur.find(b"**", 40), None);
        assert_eq!(cur.find_unit(b'b', 0), Some(8));
        assert_eq!(cur.find_unit(b'z', 0), None);
    }

    #[test]
    fn surrogate_pairs_count_as_two_units() {
        let mut cur = Cursor::from("🫡x");
        cur.bump_n(2);
        assert_eq!(cur.peek(), Some(u16::from(b'x')));
        cur.bump();
        assert!(cur.eof());
        assert_eq!(cur.pos(), 3);
    }

    #[test]
    fn cut_before_cursor_moves_cursor_back() {
        let mut cur = Cursor::from("ab**cd");
        cur.seek(4);
        cur.cut(Range::new(2, 4));
        assert_eq!(cur.pos(), 2);
        assert_eq!(cur.peek(), Some(u16::from(b'c')));
        assert_eq!(text::decode(&cur.into_inner()), "abcd");
    }

    #[test]
    fn cut_after_cursor_keeps_position() {
        let mut cur = Cursor::from("ab**cd");
        cur.seek(1);
        cur.cut(Range::new(2, 4));
        assert_eq!(cur.pos(), 1);
        assert_eq!(text::decode(&cur.into_inner()), "abcd");
    }

    #[test]
    fn cut_around_cursor_snaps_to_cut_start() {
        let mut cur = Cursor::from("ab**cd");
        cur.seek(3);
        cur.cut(Range::new(2, 4));
        assert_eq!(cur.pos(), 2);
    }
}
