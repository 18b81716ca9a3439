//! # Markup Kinds
//!
//! Types that own their syntax markers. The parser and unparser ask these
//! types for marker text; neither hardcodes `**` or `[`.
//!
//! - **`Delimiter`**: paired markers (`**`, `__`, `~~`, `` ` ``, ```` ``` ````)
//! - **`Link`**: `[text](target)` plus the deep-link target forms

pub mod delimiter;
pub mod link;

pub use delimiter::Delimiter;
pub use link::Link;
