//! The fixed allow-list of searchable / projectable attributes.
//!
//! Search keys arrive from the outside as strings; this enum is the explicit
//! name-to-attribute dispatch table. `genre` is allow-listed for
//! compatibility with older data files even though current books never carry
//! it, so searching by it simply finds nothing.

use serde_json::Value as JsonValue;

use crate::domain::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Pages,
    Year,
    Title,
    Author,
    Uuid,
    Genre,
    LastReadDate,
    Language,
}

impl SearchKey {
    pub const ALLOWED: [SearchKey; 8] = [
        SearchKey::Pages,
        SearchKey::Year,
        SearchKey::Title,
        SearchKey::Author,
        SearchKey::Uuid,
        SearchKey::Genre,
        SearchKey::LastReadDate,
        SearchKey::Language,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchKey::Pages => "pages",
            SearchKey::Year => "year",
            SearchKey::Title => "title",
            SearchKey::Author => "author",
            SearchKey::Uuid => "uuid",
            SearchKey::Genre => "genre",
            SearchKey::LastReadDate => "last_read_date",
            SearchKey::Language => "language",
        }
    }

    pub fn parse(raw: &str) -> CatalogResult<SearchKey> {
        Self::ALLOWED
            .into_iter()
            .find(|key| key.as_str() == raw)
            .ok_or_else(|| {
                CatalogError::Validation(format!(
                    "Invalid key '{raw}'. Allowed keys for searching are {}.",
                    Self::allowed_names().join(", ")
                ))
            })
    }

    pub fn allowed_names() -> Vec<&'static str> {
        Self::ALLOWED.iter().map(|key| key.as_str()).collect()
    }

    /// `uuid` is an identity and compares for equality; every other key
    /// matches by case-sensitive substring on the stringified value.
    pub fn is_exact(self) -> bool {
        matches!(self, SearchKey::Uuid)
    }

    /// The present, non-null value of this attribute on an exported record.
    pub fn value_in(self, record: &JsonValue) -> Option<&JsonValue> {
        match record.get(self.as_str()) {
            None | Some(JsonValue::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// Stringified form used for substring matching (strings unquoted,
    /// numbers in their JSON rendering).
    pub fn text_of(value: &JsonValue) -> String {
        match value {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Whether `record` satisfies this key for `query`. A record with the
    /// attribute missing or null never matches.
    pub fn matches(self, record: &JsonValue, query: &str) -> bool {
        let Some(value) = self.value_in(record) else {
            return false;
        };
        let text = Self::text_of(value);
        if self.is_exact() {
            text == query
        } else {
            text.contains(query)
        }
    }
}
