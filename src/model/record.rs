//! Catalog record ("zone") types.

use serde::{Deserialize, Serialize};
use std::fmt;

// ===== RecordId =====

/// Stable numeric identifier of a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Exact comparison against the string form of the identifier.
    ///
    /// `"7"` matches `RecordId(7)`; `"07"` and `" 7"` do not.
    pub fn matches_str(self, raw: &str) -> bool {
        self.0.to_string() == raw
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== Record =====

/// One catalog entry.
///
/// `url` and `cover` are templates that may contain `{COVER_URL}` and
/// `{HTML_URL}` placeholders; they are resolved by
/// [`crate::config::TemplateContext`] before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier.
    pub id: RecordId,
    /// Display name; search and name sort use it.
    pub name: String,
    /// Document URL template, or an absolute `http(s)` URL.
    pub url: String,
    /// Cover image URL template. Empty when the list omits it.
    #[serde(default)]
    pub cover: String,
}

impl Record {
    /// Build a record from raw parts.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        url: impl Into<String>,
        cover: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(id),
            name: name.into(),
            url: url.into(),
            cover: cover.into(),
        }
    }

    /// True when the content URL points outside the catalog (starts with a
    /// network scheme) and should be navigated to instead of fetched.
    pub fn is_external(&self) -> bool {
        self.url.starts_with("http")
    }
}

/// Parse a JSON array of records.
pub fn parse_records(body: &str) -> Result<Vec<Record>, serde_json::Error> {
    serde_json::from_str(body)
}
