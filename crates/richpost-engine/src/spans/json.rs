use serde::{Deserialize, Serialize};

use super::{Span, SpanKind};
use crate::error::DocumentError;

/// Serialized form of one span.
///
/// Older stores wrote the kind under `_` using the platform's class names
/// (`MessageEntityBold`); both spellings are accepted on import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRecord {
    #[serde(alias = "_")]
    pub kind: String,
    pub offset: usize,
    pub length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<i64>,
}

impl SpanRecord {
    pub fn from_span(span: &Span) -> Self {
        let mut record = Self {
            kind: tag(&span.kind).to_string(),
            offset: span.offset,
            length: span.length,
            url: None,
            language: None,
            user_id: None,
            document_id: None,
        };
        match &span.kind {
            SpanKind::Pre { language } => record.language = language.clone(),
            SpanKind::TextLink { url } => record.url = Some(url.clone()),
            SpanKind::MentionName { user_id } => record.user_id = Some(*user_id),
            SpanKind::CustomEmoji { document_id } => record.document_id = Some(*document_id),
            _ => {}
        }
        record
    }

    /// Resolves the record into a span. `index` only feeds error messages.
    pub fn to_span(&self, index: usize) -> Result<Span, DocumentError> {
        let missing = |field: &str| DocumentError::InvalidSpanRecord {
            index,
            reason: format!("{} span without `{field}`", self.kind),
        };
        let kind = match normalize_tag(&self.kind) {
            "bold" => SpanKind::Bold,
            "italic" => SpanKind::Italic,
            "underline" => SpanKind::Underline,
            "strike" | "strikethrough" => SpanKind::Strike,
            "code" => SpanKind::Code,
            "pre" => SpanKind::Pre {
                language: self.language.clone().filter(|l| !l.is_empty()),
            },
            "text_link" | "text_url" => SpanKind::TextLink {
                url: self.url.clone().ok_or_else(|| missing("url"))?,
            },
            "mention_name" | "text_mention" => SpanKind::MentionName {
                user_id: self.user_id.ok_or_else(|| missing("user_id"))?,
            },
            "custom_emoji" => SpanKind::CustomEmoji {
                document_id: self.document_id.ok_or_else(|| missing("document_id"))?,
            },
            "mention" => SpanKind::Mention,
            "hashtag" => SpanKind::Hashtag,
            "cashtag" => SpanKind::Cashtag,
            "bot_command" => SpanKind::BotCommand,
            "url" => SpanKind::Url,
            "email" => SpanKind::Email,
            "phone" | "phone_number" => SpanKind::Phone,
            _ => return Err(DocumentError::UnknownSpanKind(self.kind.clone())),
        };
        Ok(Span::new(kind, self.offset, self.length))
    }
}

/// Canonical tag written on export.
fn tag(kind: &SpanKind) -> &'static str {
    match kind {
        SpanKind::Bold => "bold",
        SpanKind::Italic => "italic",
        SpanKind::Underline => "underline",
        SpanKind::Strike => "strike",
        SpanKind::Code => "code",
        SpanKind::Pre { .. } => "pre",
        SpanKind::TextLink { .. } => "text_link",
        SpanKind::MentionName { .. } => "mention_name",
        SpanKind::CustomEmoji { .. } => "custom_emoji",
        SpanKind::Mention => "mention",
        SpanKind::Hashtag => "hashtag",
        SpanKind::Cashtag => "cashtag",
        SpanKind::BotCommand => "bot_command",
        SpanKind::Url => "url",
        SpanKind::Email => "email",
        SpanKind::Phone => "phone",
    }
}

/// Maps legacy class names onto snake_case tags:
/// `MessageEntityTextUrl` becomes `text_url`.
fn normalize_tag(raw: &str) -> &str {
    match raw.strip_prefix("MessageEntity") {
        Some(class) => LEGACY
            .iter()
            .find(|(name, _)| *name == class)
            .map_or(raw, |(_, tag)| *tag),
        None => raw,
    }
}

const LEGACY: &[(&str, &str)] = &[
    ("Bold", "bold"),
    ("Italic", "italic"),
    ("Underline", "underline"),
    ("Strike", "strike"),
    ("Code", "code"),
    ("Pre", "pre"),
    ("TextUrl", "text_url"),
    ("MentionName", "mention_name"),
    ("CustomEmoji", "custom_emoji"),
    ("Mention", "mention"),
    ("Hashtag", "hashtag"),
    ("Cashtag", "cashtag"),
    ("BotCommand", "bot_command"),
    ("Url", "url"),
    ("Email", "email"),
    ("Phone", "phone"),
];

/// Parses a JSON array of span records.
pub fn spans_from_json(json: &str) -> Result<Vec<Span>, DocumentError> {
    let records: Vec<SpanRecord> = serde_json::from_str(json)?;
    records
        .iter()
        .enumerate()
        .map(|(index, record)| record.to_span(index))
        .collect()
}

/// Serializes spans as a JSON array of span records.
pub fn spans_to_json(spans: &[Span]) -> Result<String, DocumentError> {
    let records: Vec<SpanRecord> = spans.iter().map(SpanRecord::from_span).collect();
    Ok(serde_json::to_string(&records)?)
}
