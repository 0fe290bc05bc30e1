//! Blocking HTTP(S) fetches.

use crate::model::FetchError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Url;
use tracing::debug;

const USER_AGENT_VALUE: &str = concat!("zonegrid/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over a lazily built `reqwest` blocking client.
///
/// Building the client is deferred to the first request so constructing a
/// fetcher never fails.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: std::sync::OnceLock<Client>,
}

impl HttpFetcher {
    fn client(&self, url: &Url) -> Result<&Client, FetchError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        Ok(self.client.get_or_init(|| client))
    }

    /// GET `url` and return the body as text.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] when the request cannot be sent or the body
    ///   cannot be read
    /// - [`FetchError::Status`] for any non-2xx response
    pub fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let client = self.client(url)?;
        let http_err = |source| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let response = client.get(url.clone()).send().map_err(http_err)?;
        let status = response.status();
        debug!(%url, %status, "HTTP response");

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(http_err)
    }
}
