//! Placeholder substitution for record URL and cover templates.
//!
//! Record templates reference two base locations through the literal tokens
//! `{COVER_URL}` and `{HTML_URL}`. A [`TemplateContext`] is built once from
//! configuration and then resolves any number of templates.

use crate::model::TemplateError;
use std::collections::HashMap;

/// Placeholder naming the cover image base location.
pub const COVER_URL: &str = "COVER_URL";

/// Placeholder naming the content document base location.
pub const HTML_URL: &str = "HTML_URL";

/// Placeholders every context must be able to resolve.
pub const REQUIRED_PLACEHOLDERS: [&str; 2] = [COVER_URL, HTML_URL];

/// Resolved placeholder values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    /// `(token, replacement)` pairs, token already wrapped in braces.
    values: Vec<(String, String)>,
}

impl TemplateContext {
    /// Build a context from a name → value map.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingPlaceholder`] if a required placeholder
    /// has no value. Extra entries in `values` are ignored.
    pub fn new(values: &HashMap<&str, String>) -> Result<Self, TemplateError> {
        let values = REQUIRED_PLACEHOLDERS
            .iter()
            .map(|&name| {
                values
                    .get(name)
                    .map(|value| (format!("{{{name}}}"), value.clone()))
                    .ok_or(TemplateError::MissingPlaceholder(name))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { values })
    }

    /// Convenience constructor from the two configured base locations.
    pub fn from_bases(cover_url: impl Into<String>, html_url: impl Into<String>) -> Self {
        Self {
            values: vec![
                (format!("{{{COVER_URL}}}"), cover_url.into()),
                (format!("{{{HTML_URL}}}"), html_url.into()),
            ],
        }
    }

    /// Replace every known placeholder in `template`.
    ///
    /// Templates without placeholders come back unchanged; unknown
    /// brace-delimited text is left as is.
    pub fn resolve(&self, template: &str) -> String {
        self.values
            .iter()
            .fold(template.to_string(), |acc, (token, value)| {
                acc.replace(token.as_str(), value)
            })
    }
}
