//! Sort selector values for the catalog grid.

use serde::Deserialize;
use std::fmt;

/// Ordering applied to the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep the order of the fetched record list.
    #[default]
    #[serde(alias = "default")]
    Unordered,
    /// Locale-style comparison of display names.
    Name,
    /// Ascending numeric identifier.
    Id,
}

impl SortKey {
    /// Parse a selector value. Anything other than `name` or `id` means
    /// "leave the order alone".
    pub fn parse(raw: &str) -> Self {
        match raw {
            "name" => SortKey::Name,
            "id" => SortKey::Id,
            _ => SortKey::Unordered,
        }
    }

    /// Next value in the selector: Unordered → Name → Id → Unordered.
    pub fn cycle(self) -> Self {
        match self {
            SortKey::Unordered => SortKey::Name,
            SortKey::Name => SortKey::Id,
            SortKey::Id => SortKey::Unordered,
        }
    }

    /// Label shown in the header.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Unordered => "Default",
            SortKey::Name => "Name",
            SortKey::Id => "ID",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
