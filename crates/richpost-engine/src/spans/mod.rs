//! # Spans
//!
//! A span is a formatting or semantic annotation anchored to a
//! `[offset, offset + length)` region of a document's UTF-16 buffer.
//!
//! - **`adjust`**: span-list updates for deletions, insertions and splices
//! - **`json`**: persisted `{kind, offset, length, ...}` records
//! - **`platform`**: lossy projection onto the messaging platform's entity set

pub mod adjust;
pub mod json;
pub mod platform;

use crate::text::Range;

/// Closed set of span kinds.
///
/// Payload-carrying kinds hold exactly the data needed to reproduce them in
/// markup and in external entity formats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpanKind {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    Pre { language: Option<String> },
    TextLink { url: String },
    /// Mention of a user that has no public username.
    MentionName { user_id: i64 },
    CustomEmoji { document_id: i64 },
    /// `@username` mention.
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    Phone,
}

impl SpanKind {
    /// Display name used by span dumps and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            SpanKind::Bold => "Bold",
            SpanKind::Italic => "Italic",
            SpanKind::Underline => "Underline",
            SpanKind::Strike => "Strike",
            SpanKind::Code => "Code",
            SpanKind::Pre { .. } => "Pre",
            SpanKind::TextLink { .. } => "TextLink",
            SpanKind::MentionName { .. } => "MentionName",
            SpanKind::CustomEmoji { .. } => "CustomEmoji",
            SpanKind::Mention => "Mention",
            SpanKind::Hashtag => "Hashtag",
            SpanKind::Cashtag => "Cashtag",
            SpanKind::BotCommand => "BotCommand",
            SpanKind::Url => "Url",
            SpanKind::Email => "Email",
            SpanKind::Phone => "Phone",
        }
    }

    /// Kinds removed by `turn_off_links`.
    pub fn is_link(&self) -> bool {
        matches!(self, SpanKind::TextLink { .. } | SpanKind::Url)
    }

    /// Kinds written as `[text](target)` in markup.
    pub fn is_bracketed(&self) -> bool {
        matches!(
            self,
            SpanKind::TextLink { .. } | SpanKind::MentionName { .. } | SpanKind::CustomEmoji { .. }
        )
    }

    /// Kinds whose content is never scanned for nested markup.
    pub fn is_raw(&self) -> bool {
        matches!(self, SpanKind::Code | SpanKind::Pre { .. })
    }
}

/// A span anchored to a document buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub kind: SpanKind,
    pub offset: usize,
    pub length: usize,
}

impl Span {
    pub fn new(kind: SpanKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
        }
    }

    /// Exclusive end offset.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    #[must_use]
    pub fn range(&self) -> Range {
        Range::at(self.offset, self.length)
    }

    pub fn set_range(&mut self, range: Range) {
        self.offset = range.start;
        self.length = range.len();
    }

    /// Copy of this span moved right by `by` units.
    pub fn shifted(&self, by: usize) -> Self {
        Self {
            kind: self.kind.clone(),
            offset: self.offset + by,
            length: self.length,
        }
    }
}
