//! Error types for zonegrid.
//!
//! Every failure is handled at the boundary where it occurs. None of these
//! errors ever reach the query pipeline or pagination state, which remain
//! valid whatever a fetch or import does.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error for `main`
//!   - [`FetchError`] - record list or viewer document could not be retrieved
//!   - [`ImportError`] - state import failed as a whole
//!     - [`DecodeError`] - key-value segment of a state blob is malformed
//!     - [`StoreError`] - persisted stores could not be read or written
//!   - [`TemplateError`] - a required placeholder has no configured value
//!   - `std::io::Error` - terminal failures
//!
//! [`CookieApplyWarning`] is deliberately not an error: a malformed cookie
//! entry is skipped and the rest of the import carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Everything the binary can fail with outside the TUI loop converts into
/// this via `From`, so startup code composes with `?`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The record list could not be fetched or parsed.
    #[error("Failed to fetch: {0}")]
    Fetch(#[from] FetchError),

    /// A `--import` run failed before touching any store.
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    /// The key-value store or cookie jar could not be opened or saved.
    #[error("Persisted state error: {0}")]
    Store(#[from] StoreError),

    /// A placeholder base URL is missing from the configuration.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Terminal or TUI rendering error. Fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Network, file or parse failure retrieving the record list or a viewer
/// document.
///
/// Surfaced to the user as a visible message. There is no automatic retry.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request could not be completed.
    #[error("Request to {url} failed: {source}")]
    Http {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Request to {url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code returned.
        status: u16,
    },

    /// A local file source could not be read.
    #[error("Failed to read {path:?}: {source}")]
    Io {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The body was fetched but is not a JSON array of records.
    #[error("Malformed record list from {location}: {source}")]
    Parse {
        /// URL or path the body came from.
        location: String,
        /// Parser error, with line and column.
        #[source]
        source: serde_json::Error,
    },
}

/// The key-value segment of a state blob could not be decoded.
///
/// Aborts the entire import; no store is mutated.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The segment before the separator is not JSON at all.
    #[error("Key-value segment is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The segment parsed, but as an array, string, number or null.
    #[error("Key-value segment is JSON but not an object")]
    NotAnObject,
}

/// A single cookie assignment in an imported blob was malformed.
///
/// Skipped individually; never aborts the import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieApplyWarning {
    /// The entry has no `=` separating name from value.
    #[error("Cookie entry {0:?} has no '='")]
    MissingEquals(String),

    /// The entry starts with `=`.
    #[error("Cookie entry {0:?} has an empty name")]
    EmptyName(String),
}

/// Failure reading or writing the file-backed persisted stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file or its directory could not be read or written.
    #[error("Failed to access {path:?}: {source}")]
    Io {
        /// Store file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a JSON string map.
    #[error("Corrupt store file {path:?}: {source}")]
    Corrupt {
        /// Store file path.
        path: PathBuf,
        /// Parser or serializer error.
        #[source]
        source: serde_json::Error,
    },
}

/// Import of a state blob failed as a whole.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The import file could not be read.
    #[error("Failed to read import file {path:?}: {source}")]
    Read {
        /// File given to `--import` or the import prompt.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The blob did not decode; nothing was applied.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Saving the decoded pairs failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A template placeholder has no configured replacement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// No base URL for the named placeholder (given without braces).
    #[error("No value configured for placeholder {{{0}}}")]
    MissingPlaceholder(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn fetch_status_display_includes_url_and_code() {
        let err = FetchError::Status {
            url: "https://example.com/zones.json".to_string(),
            status: 404,
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/zones.json"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn fetch_parse_display_includes_location() {
        let source = serde_json::from_str::<Vec<u8>>("nope").unwrap_err();
        let err = FetchError::Parse {
            location: "zones.json".to_string(),
            source,
        };
        assert!(err.to_string().contains("Malformed record list from zones.json"));
    }

    #[test]
    fn decode_error_from_serde_json() {
        let source = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let err: DecodeError = source.into();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn import_error_is_transparent_over_decode() {
        let err: ImportError = DecodeError::NotAnObject.into();
        assert_eq!(err.to_string(), "Key-value segment is JSON but not an object");
    }

    #[test]
    fn cookie_warning_display_quotes_entry() {
        let warning = CookieApplyWarning::MissingEquals("bogus".to_string());
        assert!(warning.to_string().contains("\"bogus\""));
    }

    #[test]
    fn template_error_names_placeholder_in_braces() {
        let err = TemplateError::MissingPlaceholder("HTML_URL");
        assert_eq!(err.to_string(), "No value configured for placeholder {HTML_URL}");
    }

    #[test]
    fn app_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe broken");
        let app_err: AppError = io_err.into();
        let msg = app_err.to_string();
        assert!(msg.contains("Terminal error"));
        assert!(msg.contains("pipe broken"));
    }

    #[test]
    fn app_error_nests_store_error_through_import() {
        let store_err = StoreError::Io {
            path: PathBuf::from("/tmp/storage.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let app_err: AppError = ImportError::from(store_err).into();
        let msg = app_err.to_string();
        assert!(msg.contains("Import failed"));
        assert!(msg.contains("storage.json"));
    }
}
