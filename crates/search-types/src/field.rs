use serde::{Deserialize, Serialize};

/// The attribute a search term is matched against.
///
/// The widget's field selector hands back a raw string. Values outside the supported set are
/// kept as [`SearchField::Other`] rather than rejected: such a field matches nothing locally
/// and is never sent to a remote endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SearchField {
    /// Display name (given names + family name).
    Name,
    /// First external identifier value.
    Identifier,
    /// First contact point of kind `phone`.
    Phone,
    /// First contact point of kind `email`.
    Email,
    /// Anything else.
    Other(String),
}

impl SearchField {
    /// Fields offered when a widget is configured without an explicit list.
    pub const DEFAULTS: [SearchField; 4] = [
        SearchField::Name,
        SearchField::Identifier,
        SearchField::Phone,
        SearchField::Email,
    ];

    /// Parse a selector value. Never fails; unknown values become [`SearchField::Other`].
    pub fn parse(value: &str) -> Self {
        match value {
            "name" => SearchField::Name,
            "identifier" => SearchField::Identifier,
            "phone" => SearchField::Phone,
            "email" => SearchField::Email,
            other => SearchField::Other(other.to_string()),
        }
    }

    /// Wire/query-parameter name of the field.
    pub fn as_str(&self) -> &str {
        match self {
            SearchField::Name => "name",
            SearchField::Identifier => "identifier",
            SearchField::Phone => "phone",
            SearchField::Email => "email",
            SearchField::Other(raw) => raw,
        }
    }

    /// Human label shown in the field selector.
    pub fn label(&self) -> &str {
        match self {
            SearchField::Name => "Name",
            SearchField::Identifier => "Patient ID",
            SearchField::Phone => "Phone",
            SearchField::Email => "Email",
            SearchField::Other(raw) => raw,
        }
    }

    /// Whether a remote FHIR endpoint is queried for this field.
    pub fn is_remote_searchable(&self) -> bool {
        matches!(self, SearchField::Name | SearchField::Identifier)
    }
}

impl From<String> for SearchField {
    fn from(value: String) -> Self {
        SearchField::parse(&value)
    }
}

impl From<SearchField> for String {
    fn from(value: SearchField) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
