use std::fmt;

use serde::Serialize;

use crate::error::DocumentError;
use crate::markup;
use crate::spans::{
    Span, SpanKind, adjust,
    json::{self, SpanRecord},
    platform::PlatformEntity,
};
use crate::text;

/// Text together with the spans formatting it.
///
/// A `Document` is an immutable value: every operation returns a new
/// document and never writes through to the one it was called on. The buffer
/// is kept as UTF-16 code units so span offsets line up with the messaging
/// platform's entity offsets.
///
/// After every public operation each span lies inside the buffer, is
/// non-empty and covers at least one non-whitespace unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub(crate) units: Vec<u16>,
    pub(crate) spans: Vec<Span>,
}

/// What kind of contact an external link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    ContactEmail,
    ContactPhone,
    ContactTelegram,
    Link,
}

/// A link a reader can follow out of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub link_text: String,
    pub link: String,
}

impl Document {
    /// Parses markup. Malformed markup never fails, it stays literal text.
    pub fn from_markup(markup: &str) -> Self {
        let parsed = markup::parse(markup);
        Self::normalized(parsed.units, parsed.spans)
    }

    /// Builds a document from plain text and explicit spans, without parsing.
    ///
    /// # Panics
    /// If a span reaches past the end of `plain`. Use
    /// [`Document::from_plain_and_json`] for untrusted span data.
    pub fn from_plain_and_spans(plain: &str, spans: Vec<Span>) -> Self {
        let units = text::encode(plain);
        for span in &spans {
            assert!(
                span.end() <= units.len(),
                "span out of bounds: {span:?} (text len: {})",
                units.len()
            );
        }
        Self::normalized(units, spans)
    }

    /// Builds a document from plain text and a JSON array of span records.
    pub fn from_plain_and_json(plain: &str, spans_json: &str) -> Result<Self, DocumentError> {
        let units = text::encode(plain);
        let spans = json::spans_from_json(spans_json)?;
        if let Some((index, span)) = spans
            .iter()
            .enumerate()
            .find(|(_, span)| span.end() > units.len())
        {
            return Err(DocumentError::InvalidSpanRecord {
                index,
                reason: format!(
                    "range {}..{} is outside text of length {}",
                    span.offset,
                    span.end(),
                    units.len()
                ),
            });
        }
        Ok(Self::normalized(units, spans))
    }

    /// Trims span edges and drops empty spans, then checks invariants.
    fn normalized(units: Vec<u16>, mut spans: Vec<Span>) -> Self {
        adjust::trim_edges(&units, &mut spans);
        adjust::prune(&units, &mut spans);
        Self::from_parts(units, spans)
    }

    pub(crate) fn from_parts(units: Vec<u16>, spans: Vec<Span>) -> Self {
        let doc = Self { units, spans };
        #[cfg(debug_assertions)]
        crate::invariants::check(&doc);
        doc
    }

    pub fn plain(&self) -> String {
        text::decode(&self.units)
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    pub fn to_markup(&self) -> String {
        markup::unparse_units(&self.units, &self.spans)
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn to_spans(&self) -> Vec<Span> {
        self.spans.clone()
    }

    pub fn span_records(&self) -> Vec<SpanRecord> {
        self.spans.iter().map(SpanRecord::from_span).collect()
    }

    pub fn to_json_spans(&self) -> Result<String, DocumentError> {
        json::spans_to_json(&self.spans)
    }

    /// Entities for the messaging platform. Kinds it cannot express are
    /// left out.
    pub fn to_platform_entities(&self) -> Vec<PlatformEntity> {
        self.spans
            .iter()
            .filter_map(PlatformEntity::from_span)
            .collect()
    }

    /// Length of the plain text in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Length of the markup rendering in UTF-16 code units.
    pub fn markup_len(&self) -> usize {
        text::utf16_len(&self.to_markup())
    }

    pub fn contains(&self, needle: &str) -> bool {
        let needle = text::encode(needle);
        needle.is_empty() || text::find(&self.units, &needle, 0).is_some()
    }

    /// Text covered by `span`.
    pub fn span_text(&self, span: &Span) -> String {
        text::slice_to_string(&self.units, span.range())
    }

    /// Targets of text links and the text of bare URLs, in span order.
    pub fn urls(&self) -> Vec<String> {
        self.spans
            .iter()
            .filter_map(|span| match &span.kind {
                SpanKind::TextLink { url } => Some(url.clone()),
                SpanKind::Url => Some(self.span_text(span)),
                _ => None,
            })
            .collect()
    }

    /// Contacts and links found in the document.
    pub fn external_links(&self) -> Vec<ExternalLink> {
        self.spans
            .iter()
            .filter_map(|span| {
                let content = self.span_text(span);
                let (link_type, link) = match &span.kind {
                    SpanKind::Email => (LinkType::ContactEmail, format!("mailto:{content}")),
                    SpanKind::Phone => (LinkType::ContactPhone, format!("tel:{content}")),
                    SpanKind::Mention => {
                        let name = content.strip_prefix('@').unwrap_or(&content).to_string();
                        return Some(ExternalLink {
                            link_type: LinkType::ContactTelegram,
                            link: format!("https://t.me/{name}"),
                            link_text: name,
                        });
                    }
                    SpanKind::MentionName { .. } | SpanKind::TextLink { .. } => {
                        let link = markup::kinds::link::target(&span.kind)?;
                        let link_type = if span.kind.is_link() {
                            LinkType::Link
                        } else {
                            LinkType::ContactTelegram
                        };
                        (link_type, link)
                    }
                    SpanKind::Url => (LinkType::Link, content.clone()),
                    _ => return None,
                };
                Some(ExternalLink {
                    link_type,
                    link_text: content,
                    link,
                })
            })
            .collect()
    }

    /// One line per span: `- Bold: "hello" offset:0 len:5`.
    pub fn describe_spans(&self) -> String {
        self.spans
            .iter()
            .map(|span| {
                format!(
                    "- {}: {:?} offset:{} len:{}\n",
                    span.kind.name(),
                    self.span_text(span),
                    span.offset,
                    span.length
                )
            })
            .collect()
    }
}

impl From<&str> for Document {
    fn from(markup: &str) -> Self {
        Self::from_markup(markup)
    }
}

impl fmt::Display for Document {
    /// Displays the markup rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn markup_round_trip_for_simple_text() {
        let doc = Document::from_markup("**hello** world");
        assert_eq!(doc.plain(), "hello world");
        assert_eq!(doc.to_markup(), "**hello** world");
        assert_eq!(doc.len(), 11);
        assert_eq!(doc.markup_len(), 15);
    }

    #[test]
    fn construction_trims_span_edges() {
        let doc = Document::from_markup("** hello **");
        assert_eq!(doc.spans(), &[Span::new(SpanKind::Bold, 1, 5)]);
        assert_eq!(doc.to_markup(), " **hello** ");
    }

    #[test]
    fn blank_spans_are_dropped() {
        assert_eq!(Document::from_markup("**\n**").to_markup(), "\n");
        assert_eq!(Document::from_markup("****").to_markup(), "****");
    }

    #[test]
    fn quotes_and_controls_are_trimmed_from_edges() {
        let s = " \n\t\r\\'\"\x07\x08\x0b\x0c";
        let markup = format!("**{s}__content__{s}**");
        assert_eq!(
            Document::from_markup(&markup).to_markup(),
            format!("{s}**__content**__{s}")
        );
    }

    #[test]
    fn from_plain_and_spans_skips_parsing() {
        let doc = Document::from_plain_and_spans("**x** y", vec![Span::new(SpanKind::Italic, 6, 1)]);
        assert_eq!(doc.plain(), "**x** y");
        assert_eq!(doc.spans().len(), 1);
    }

    #[test]
    #[should_panic(expected = "span out of bounds")]
    fn from_plain_and_spans_rejects_out_of_bounds() {
        Document::from_plain_and_spans("abc", vec![Span::new(SpanKind::Bold, 2, 5)]);
    }

    #[test]
    fn from_plain_and_json_reads_records() {
        let doc = Document::from_plain_and_json(
            "hello world",
            r#"[{"_":"MessageEntityBold","offset":0,"length":5}]"#,
        )
        .unwrap();
        assert_eq!(doc.to_markup(), "**hello** world");
    }

    #[test]
    fn from_plain_and_json_rejects_out_of_range() {
        let err = Document::from_plain_and_json("hi", r#"[{"kind":"bold","offset":1,"length":5}]"#)
            .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidSpanRecord { index: 0, .. }));
    }

    #[test]
    fn json_export_round_trips() {
        let doc = Document::from_markup("**a** [b](https://b.io) `c`");
        let json = doc.to_json_spans().unwrap();
        let back = Document::from_plain_and_json(&doc.plain(), &json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn platform_entities_skip_custom_emoji() {
        let doc = Document::from_markup("[x](emoji:1) **b**");
        let entities = doc.to_platform_entities();
        assert_eq!(entities.len(), 1);
        assert_eq!((entities[0].offset, entities[0].length), (2, 1));
    }

    #[test]
    fn contains_uses_plain_text() {
        let doc = Document::from_markup("**hello** world");
        assert!(doc.contains("o w"));
        assert!(!doc.contains("**"));
    }

    #[test]
    fn urls_lists_links_and_bare_urls() {
        let doc = Document::from_markup("[site](https://a.io) and https://b.io.");
        assert_eq!(doc.urls(), vec!["https://a.io", "https://b.io"]);
    }

    #[test]
    fn external_links_classify_contacts() {
        let doc = Document::from_plain_and_spans(
            "@hr mail@x.io +100 Ann",
            vec![
                Span::new(SpanKind::Mention, 0, 3),
                Span::new(SpanKind::Email, 4, 9),
                Span::new(SpanKind::Phone, 14, 4),
                Span::new(SpanKind::MentionName { user_id: 3 }, 19, 3),
            ],
        );
        let links: Vec<_> = doc
            .external_links()
            .into_iter()
            .map(|l| (l.link_type, l.link_text, l.link))
            .collect();
        assert_eq!(
            links,
            vec![
                (LinkType::ContactTelegram, "hr".into(), "https://t.me/hr".into()),
                (LinkType::ContactEmail, "mail@x.io".into(), "mailto:mail@x.io".into()),
                (LinkType::ContactPhone, "+100".into(), "tel:+100".into()),
                (LinkType::ContactTelegram, "Ann".into(), "tg://user?id=3".into()),
            ]
        );
    }

    #[test]
    fn describe_spans_lists_every_span() {
        let doc = Document::from_markup("**hello** [ёж hi](github.com)");
        assert_snapshot!(doc.describe_spans(), @r#"
        - Bold: "hello" offset:0 len:5
        - TextLink: "ёж hi" offset:6 len:5
        "#);
    }

    #[test]
    fn display_renders_markup() {
        assert_eq!(Document::from("__x__").to_string(), "__x__");
    }
}
