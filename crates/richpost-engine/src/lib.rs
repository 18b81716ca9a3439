//! Rich text as plain UTF-16 text plus formatting spans.
//!
//! The engine parses a small markdown-like syntax into a [`Document`],
//! edits it while keeping every span attached to the text it formats, and
//! renders it back to markup, JSON span records or platform entities.

pub mod delivery;
pub mod editing;
pub mod error;
pub mod invariants;
pub mod markup;
pub mod spans;
pub mod text;

// Re-export key types for easier usage
pub use delivery::{
    DeliveryError, DeliveryOptions, PunctuationSplitter, SentenceSplitter, prepare_for_delivery,
};
pub use editing::{Document, ExternalLink, LinkType};
pub use error::DocumentError;
pub use spans::{
    Span, SpanKind,
    json::SpanRecord,
    platform::{PlatformEntity, PlatformEntityKind, PlatformUser},
};
pub use text::Range;
