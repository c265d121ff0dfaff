//! Search query value type.

use search_types::{NonEmptyText, SearchField, TextError};

/// An immutable (field, term) pair; the term is trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    field: SearchField,
    term: NonEmptyText,
}

impl SearchQuery {
    pub fn new(field: SearchField, term: NonEmptyText) -> Self {
        Self { field, term }
    }

    /// Build a query from raw control values.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] when `term` is blank after trimming.
    pub fn parse(field: &str, term: &str) -> Result<Self, TextError> {
        Ok(Self::new(SearchField::parse(field), NonEmptyText::new(term)?))
    }

    pub fn field(&self) -> &SearchField {
        &self.field
    }

    pub fn term(&self) -> &NonEmptyText {
        &self.term
    }
}
