/// A half-open range `[start, end)` of UTF-16 code units.
///
/// Every span offset in the engine is measured in code units, so an astral
/// plane character (most emoji) occupies two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {start}..{end}");
        Self { start, end }
    }

    /// Range of `len` units starting at `start`.
    pub fn at(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    /// Zero-width range at `at` (an insertion point).
    pub fn point(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Returns the length in code units. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the range is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Number of code units shared by both ranges.
    #[must_use]
    pub fn overlap(self, other: Range) -> usize {
        self.end
            .min(other.end)
            .saturating_sub(self.start.max(other.start))
    }

    /// Classifies where `self` lies relative to `other`.
    ///
    /// Checks run in a fixed order so every pair lands in exactly one class:
    /// equal ranges are `Within`, and touching is never treated as overlap.
    pub fn relation(self, other: Range) -> Relation {
        if self == other {
            return Relation::Within;
        }
        if left_of(self, other) {
            return if touches_from_left(self, other) {
                Relation::TouchesStart
            } else {
                Relation::Before
            };
        }
        if left_of(other, self) {
            return if touches_from_left(other, self) {
                Relation::TouchesEnd
            } else {
                Relation::After
            };
        }
        if contains(self, other) {
            Relation::Within
        } else if contains(other, self) {
            Relation::Encloses
        } else if overlaps_from_left(self, other) {
            Relation::OverlapsStart
        } else {
            Relation::OverlapsEnd
        }
    }

    /// Where this range ends up after `deleted` is removed from the buffer.
    ///
    /// Text of the range that survives keeps its coordinates relative to
    /// its neighbours; a range swallowed by the deletion collapses to the
    /// deletion point.
    #[must_use]
    pub fn after_delete(self, deleted: Range) -> Range {
        let n = deleted.len();
        match self.relation(deleted) {
            Relation::Before | Relation::TouchesStart => self,
            Relation::TouchesEnd | Relation::After => Range::new(self.start - n, self.end - n),
            Relation::Within => Range::point(deleted.start),
            Relation::Encloses => Range::new(self.start, self.end - n),
            Relation::OverlapsStart => Range::new(self.start, deleted.start),
            Relation::OverlapsEnd => Range::new(deleted.start, self.end - n),
        }
    }

    /// Where this range ends up after `n` units are inserted at `at`.
    ///
    /// A range ending at the insertion point or enclosing it grows; a range
    /// starting at or after it moves right.
    #[must_use]
    pub fn after_insert(self, at: usize, n: usize) -> Range {
        match self.relation(Range::point(at)) {
            Relation::Before => self,
            Relation::TouchesEnd | Relation::After => Range::new(self.start + n, self.end + n),
            // a point can only overlap a range it lies strictly inside
            Relation::TouchesStart
            | Relation::Within
            | Relation::Encloses
            | Relation::OverlapsStart
            | Relation::OverlapsEnd => Range::new(self.start, self.end + n),
        }
    }

    /// Where this range ends up after `replaced` is overwritten with `n` new
    /// units: a delete followed by an insert at the same position.
    #[must_use]
    pub fn after_splice(self, replaced: Range, n: usize) -> Range {
        let d = replaced.len();
        match self.relation(replaced) {
            Relation::Before => self,
            Relation::TouchesStart => Range::new(self.start, self.end + n),
            Relation::TouchesEnd | Relation::After => {
                Range::new(self.start + n - d, self.end + n - d)
            }
            Relation::Within => Range::at(replaced.start, n),
            Relation::Encloses => Range::new(self.start, self.end + n - d),
            Relation::OverlapsStart => Range::new(self.start, replaced.start + n),
            Relation::OverlapsEnd => Range::new(replaced.start, self.end + n - d),
        }
    }
}

/// Position of one range relative to another, as seen from the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Ends strictly before the other starts.
    Before,
    /// Ends exactly where the other starts.
    TouchesStart,
    /// Starts before the other and ends inside it.
    OverlapsStart,
    /// Lies inside the other (equal ranges included).
    Within,
    /// Strictly encloses the other.
    Encloses,
    /// Starts inside the other and ends after it.
    OverlapsEnd,
    /// Starts exactly where the other ends.
    TouchesEnd,
    /// Starts strictly after the other ends.
    After,
}

/// `a` ends at or before the start of `b`.
pub fn left_of(a: Range, b: Range) -> bool {
    a.end <= b.start
}

/// `a` ends exactly where `b` starts.
pub fn touches_from_left(a: Range, b: Range) -> bool {
    a.end == b.start
}

/// `a` starts before `b` and reaches into it. Touching is not overlap.
pub fn overlaps_from_left(a: Range, b: Range) -> bool {
    a.end > b.start && b.start > a.start
}

/// `a` lies inside `b`; equal ranges count as contained.
pub fn contains(a: Range, b: Range) -> bool {
    a.start >= b.start && a.end <= b.end
}
