//! # Editing
//!
//! The `Document` value type and the operations that rewrite it.
//!
//! - **`document`**: construction, export and queries
//! - **`ops`**: strip, replace, insert, concatenation, link removal and
//!   heading repair
//! - **`cleanup`**: `clear()` and its fixed normalisation tables
//!
//! Every operation takes `&self` and returns a new `Document`; spans are
//! shifted with the policies in [`crate::text::Range`] so each one keeps
//! covering the text it formatted.

pub mod cleanup;
pub mod document;
pub mod ops;

pub use document::{Document, ExternalLink, LinkType};
