//! Query pipeline: filter by name substring, then sort.
//!
//! [`apply`] is pure. It never touches pagination; callers reset the
//! [`crate::state::ViewController`] with the returned view.

use crate::model::{Record, SortKey};
use icu_collator::{Collator, CollatorError, CollatorOptions, Strength};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, warn};

// ===== FilteredView =====

/// Ordered subset of the full record set eligible for display.
///
/// Always recomputed from scratch, never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    records: Vec<Record>,
}

impl FilteredView {
    /// Number of records in the view.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in display order.
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Iterate in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl From<Vec<Record>> for FilteredView {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

// ===== Pipeline =====

/// Derive the filtered, sorted view of `records`.
///
/// Keeps every record whose lowercased name contains the lowercased
/// `search_text` (whitespace included, nothing trimmed), then orders the
/// result by `sort`. Both sorts are stable; [`SortKey::Unordered`] keeps the
/// input order.
pub fn apply(records: &[Record], search_text: &str, sort: SortKey) -> FilteredView {
    let needle = search_text.to_lowercase();

    let mut filtered: Vec<Record> = records
        .iter()
        .filter(|record| needle.is_empty() || record.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    match sort {
        SortKey::Name => match NameCollation::new() {
            Ok(collation) => filtered.sort_by(|a, b| collation.compare(&a.name, &b.name)),
            Err(err) => warn!(error = %err, "Name collation unavailable; keeping input order"),
        },
        SortKey::Id => filtered.sort_by_key(|record| record.id),
        SortKey::Unordered => {}
    }

    debug!(total = records.len(), matched = filtered.len(), ?sort, "Recomputed filtered view");

    FilteredView::from(filtered)
}

/// Locale-aware ordering of display names.
///
/// Root-locale collation at tertiary strength: accents and case only break
/// ties between names that are otherwise equal, and lowercase sorts before
/// uppercase. Only canonically identical names compare equal, so ties keep
/// their input order under a stable sort.
pub struct NameCollation {
    collator: Collator,
}

impl NameCollation {
    /// Build the root-locale collator.
    pub fn new() -> Result<Self, CollatorError> {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = Collator::try_new(&Default::default(), options)?;
        Ok(Self { collator })
    }

    /// Compare two names.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

impl fmt::Debug for NameCollation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameCollation").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
