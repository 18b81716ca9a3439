use crate::markup::cursor::Cursor;
use crate::spans::SpanKind;

/// Paired markers that wrap formatted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Pre,
    Bold,
    Italic,
    Strike,
    Code,
}

impl Delimiter {
    /// Match order: the longest marker goes first so ```` ``` ```` is never
    /// read as an inline code tick.
    pub const ALL: [Delimiter; 5] = [
        Delimiter::Pre,
        Delimiter::Bold,
        Delimiter::Italic,
        Delimiter::Strike,
        Delimiter::Code,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Pre => "```",
            Delimiter::Bold => "**",
            Delimiter::Italic => "__",
            Delimiter::Strike => "~~",
            Delimiter::Code => "`",
        }
    }

    pub fn marker(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    /// Marker width in code units (markers are ASCII).
    pub fn width(self) -> usize {
        self.marker().len()
    }

    /// Delimited content is raw: nothing inside is parsed.
    pub fn is_raw(self) -> bool {
        matches!(self, Delimiter::Pre | Delimiter::Code)
    }

    /// Kind of the span produced for this delimiter. Markup carries no pre
    /// language, so the first line of a pre block is always content.
    pub fn kind(self) -> SpanKind {
        match self {
            Delimiter::Pre => SpanKind::Pre { language: None },
            Delimiter::Bold => SpanKind::Bold,
            Delimiter::Italic => SpanKind::Italic,
            Delimiter::Strike => SpanKind::Strike,
            Delimiter::Code => SpanKind::Code,
        }
    }

    /// Delimiter used to write `kind` back out, if it has one.
    pub fn for_kind(kind: &SpanKind) -> Option<Delimiter> {
        match kind {
            SpanKind::Bold => Some(Delimiter::Bold),
            SpanKind::Italic => Some(Delimiter::Italic),
            SpanKind::Strike => Some(Delimiter::Strike),
            SpanKind::Code => Some(Delimiter::Code),
            SpanKind::Pre { .. } => Some(Delimiter::Pre),
            SpanKind::Underline
            | SpanKind::TextLink { .. }
            | SpanKind::MentionName { .. }
            | SpanKind::CustomEmoji { .. }
            | SpanKind::Mention
            | SpanKind::Hashtag
            | SpanKind::Cashtag
            | SpanKind::BotCommand
            | SpanKind::Url
            | SpanKind::Email
            | SpanKind::Phone => None,
        }
    }

    /// Delimiter starting at the cursor, longest first.
    pub fn at(cur: &Cursor) -> Option<Delimiter> {
        Self::ALL.into_iter().find(|d| cur.starts_with(d.marker()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_marker_wins() {
        assert_eq!(Delimiter::at(&Cursor::from("```x```")), Some(Delimiter::Pre));
        assert_eq!(Delimiter::at(&Cursor::from("`x`")), Some(Delimiter::Code));
        assert_eq!(Delimiter::at(&Cursor::from("*x*")), None);
    }

    #[test]
    fn kinds_map_back_to_their_delimiter() {
        for d in Delimiter::ALL {
            assert_eq!(Delimiter::for_kind(&d.kind()), Some(d));
        }
        assert_eq!(Delimiter::for_kind(&SpanKind::Underline), None);
    }

    #[test]
    fn only_code_kinds_are_raw() {
        let raw: Vec<_> = Delimiter::ALL.into_iter().filter(|d| d.is_raw()).collect();
        assert_eq!(raw, vec![Delimiter::Pre, Delimiter::Code]);
    }
}
