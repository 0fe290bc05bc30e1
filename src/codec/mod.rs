//! Persisted-state blob codec.
//!
//! A blob is the JSON form of the key-value store, the reserved
//! [`SEPARATOR`], then the cookie header string:
//!
//! ```text
//! {"darkMode":"true"}
//!
//! |
//!
//! session=abc; theme=dark
//! ```
//!
//! Decoding is deliberately asymmetric. The key-value segment is strict: if
//! it does not parse, nothing is imported. Cookie entries are best-effort:
//! a malformed entry is reported and skipped.
//!
//! The separator is a plain literal and is not escaped. A JSON payload that
//! happens to contain it will split in the wrong place; escaping it would
//! break compatibility with existing `.data` files.

use crate::model::{CookieApplyWarning, DecodeError};
use serde_json::Value;
use std::collections::BTreeMap;

pub mod store;
pub mod transfer;

pub use store::{CookieJar, FileCookieJar, FileKeyValueStore, KeyValueStore};
pub use transfer::{ImportReport, export_file_name, export_to_dir, import_blob, import_file};

/// Reserved token between the key-value and cookie segments.
pub const SEPARATOR: &str = "\n\n|\n\n";

/// Delimiter between entries of a cookie header string.
pub const COOKIE_DELIMITER: &str = "; ";

/// One `name=value` cookie mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAssignment {
    /// Cookie name, never empty.
    pub name: String,
    /// Everything after the first `=`.
    pub value: String,
}

impl CookieAssignment {
    /// Parse a single `name=value` entry.
    ///
    /// The value is everything after the first `=` and may itself contain
    /// `=`. Surrounding whitespace on the name is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`CookieApplyWarning`] for entries without `=` or with an
    /// empty name.
    pub fn parse(entry: &str) -> Result<Self, CookieApplyWarning> {
        let (name, value) = entry
            .split_once('=')
            .ok_or_else(|| CookieApplyWarning::MissingEquals(entry.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CookieApplyWarning::EmptyName(entry.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// Mutations recovered from a blob, not yet applied to any store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedState {
    /// Key-value writes, in key order.
    pub kv_ops: Vec<(String, String)>,
    /// Well-formed cookie assignments, in blob order.
    pub cookie_ops: Vec<CookieAssignment>,
    /// Entries of the cookie segment that were skipped.
    pub cookie_warnings: Vec<CookieApplyWarning>,
}

impl DecodedState {
    /// Collect the key-value writes into a map.
    pub fn kv_map(&self) -> BTreeMap<String, String> {
        self.kv_ops.iter().cloned().collect()
    }
}

/// Serialize the key-value map and cookie header into one blob.
pub fn encode(kv: &BTreeMap<String, String>, cookie_header: &str) -> String {
    // A map of strings always serializes.
    let json = serde_json::to_string(kv).unwrap_or_else(|_| "{}".to_string());
    format!("{json}{SEPARATOR}{cookie_header}")
}

/// Split a blob back into store mutations.
///
/// Splits on the first [`SEPARATOR`]. The first part must be a JSON object;
/// string values are taken verbatim, any other value is stored as its JSON
/// text. A missing or empty second part yields no cookie mutations.
///
/// # Errors
///
/// Returns [`DecodeError`] when the key-value segment is not a JSON object.
/// No cookie operations are produced in that case.
pub fn decode(blob: &str) -> Result<DecodedState, DecodeError> {
    let (kv_segment, cookie_segment) = match blob.split_once(SEPARATOR) {
        Some((kv, cookies)) => (kv, Some(cookies)),
        None => (blob, None),
    };

    let Value::Object(object) = serde_json::from_str::<Value>(kv_segment)? else {
        return Err(DecodeError::NotAnObject);
    };

    let mut kv_ops: Vec<(String, String)> = object
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect();
    kv_ops.sort_by(|a, b| a.0.cmp(&b.0));

    let mut decoded = DecodedState {
        kv_ops,
        ..DecodedState::default()
    };

    if let Some(segment) = cookie_segment.filter(|s| !s.is_empty()) {
        for entry in segment.split(COOKIE_DELIMITER) {
            match CookieAssignment::parse(entry) {
                Ok(assignment) => decoded.cookie_ops.push(assignment),
                Err(warning) => decoded.cookie_warnings.push(warning),
            }
        }
    }

    Ok(decoded)
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
