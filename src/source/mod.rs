//! Record list and document sources.
//!
//! A location is either an HTTP(S) URL fetched with `reqwest`, or a local
//! file path. Both the record list and viewer documents go through the same
//! [`DocumentFetcher`] seam so the TUI can be driven by a fake in tests.

use crate::model::{FetchError, Record, parse_records};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

pub mod file;
pub mod http;

pub use http::HttpFetcher;

/// Where a resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Remote resource fetched over HTTP(S).
    Http(reqwest::Url),
    /// Local file.
    File(PathBuf),
}

impl Location {
    /// Classify a raw location string.
    ///
    /// Strings starting with `http://` or `https://` that parse as URLs are
    /// remote; everything else is treated as a file path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            if let Ok(url) = reqwest::Url::parse(raw) {
                return Location::Http(url);
            }
        }
        Location::File(PathBuf::from(raw))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Http(url) => write!(f, "{url}"),
            Location::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches the text body of a location.
///
/// Implementations must be shareable with the background threads that load
/// viewer documents.
pub trait DocumentFetcher: Send + Sync {
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport, status or I/O failure.
    fn fetch_text(&self, location: &Location) -> Result<String, FetchError>;
}

/// Default fetcher: HTTP(S) through `reqwest`, everything else from disk.
#[derive(Debug, Clone, Default)]
pub struct NetworkFetcher {
    http: HttpFetcher,
}

impl NetworkFetcher {
    /// Fetcher with a lazily built HTTP client.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentFetcher for NetworkFetcher {
    fn fetch_text(&self, location: &Location) -> Result<String, FetchError> {
        debug!(%location, "Fetching");
        match location {
            Location::Http(url) => self.http.get_text(url),
            Location::File(path) => file::read_text(path),
        }
    }
}

/// Fetch and parse the record list in one step.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] when the body is not a JSON array of
/// records, or whatever the fetcher reports.
pub fn load_records(
    fetcher: &dyn DocumentFetcher,
    location: &Location,
) -> Result<Vec<Record>, FetchError> {
    let body = fetcher.fetch_text(location)?;
    parse_records(&body).map_err(|source| FetchError::Parse {
        location: location.to_string(),
        source,
    })
}

/// Value of the `id` query parameter of a page URL, if any.
///
/// Only absolute URLs are understood; anything else yields `None`.
pub fn id_from_location(raw: &str) -> Option<String> {
    let url = reqwest::Url::parse(raw).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
}
