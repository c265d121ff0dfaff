//! Validated primitives shared by the patient search crates.
//!
//! - [`NonEmptyText`]: a trimmed string with at least one character, used for search terms.
//! - [`SearchField`]: the attribute a search term is matched against.

mod field;
mod text;

pub use field::SearchField;
pub use text::{NonEmptyText, TextError};
