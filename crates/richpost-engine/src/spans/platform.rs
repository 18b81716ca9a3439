use serde::{Deserialize, Serialize};

use super::{Span, SpanKind};

/// Entity types understood by the messaging platform's bot API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformEntityKind {
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Pre,
    TextLink,
    TextMention,
}

/// The `user` object of a `text_mention` entity. Only the id is known here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformUser {
    pub id: i64,
}

/// One entity in the shape the platform SDK expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEntity {
    #[serde(rename = "type")]
    pub kind: PlatformEntityKind,
    pub offset: usize,
    pub length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PlatformUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl PlatformEntity {
    /// Projects a span onto the platform's entity set.
    ///
    /// Returns `None` for kinds the platform cannot express.
    pub fn from_span(span: &Span) -> Option<Self> {
        let mut url = None;
        let mut user = None;
        let mut language = None;
        let kind = match &span.kind {
            SpanKind::Bold => PlatformEntityKind::Bold,
            SpanKind::Italic => PlatformEntityKind::Italic,
            SpanKind::Underline => PlatformEntityKind::Underline,
            SpanKind::Strike => PlatformEntityKind::Strikethrough,
            SpanKind::Code => PlatformEntityKind::Code,
            SpanKind::Pre { language: lang } => {
                language = lang.clone();
                PlatformEntityKind::Pre
            }
            SpanKind::TextLink { url: target } => {
                url = Some(target.clone());
                PlatformEntityKind::TextLink
            }
            SpanKind::MentionName { user_id } => {
                user = Some(PlatformUser { id: *user_id });
                PlatformEntityKind::TextMention
            }
            SpanKind::Mention => PlatformEntityKind::Mention,
            SpanKind::Hashtag => PlatformEntityKind::Hashtag,
            SpanKind::Cashtag => PlatformEntityKind::Cashtag,
            SpanKind::BotCommand => PlatformEntityKind::BotCommand,
            SpanKind::Url => PlatformEntityKind::Url,
            SpanKind::Email => PlatformEntityKind::Email,
            SpanKind::Phone => PlatformEntityKind::PhoneNumber,
            SpanKind::CustomEmoji { .. } => return None,
        };
        Some(Self {
            kind,
            offset: span.offset,
            length: span.length,
            url,
            user,
            language,
        })
    }
}
