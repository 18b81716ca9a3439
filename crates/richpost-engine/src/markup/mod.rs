//! # Markup
//!
//! Conversion between the delimiter syntax and plain text plus spans.
//!
//! - **`cursor`**: position tracking over a buffer that shrinks as markers
//!   are cut out
//! - **`kinds`**: types that own the marker strings
//! - **`parser`**: markup to `(plain, spans)`
//! - **`unparse`**: `(plain, spans)` back to markup
//!
//! `parse(unparse(plain, spans))` reproduces the same plain text and an
//! equivalent span set. The other direction is not guaranteed: unclosed
//! markers and blank spans do not survive parsing.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod unparse;

pub use parser::{Parsed, parse};
pub use unparse::{unparse, unparse_units};
