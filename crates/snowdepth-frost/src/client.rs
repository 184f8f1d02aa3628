//! Authenticated Frost API client.
//!
//! [`FrostClient`] owns a `reqwest` connection pool, the base URL and
//! the client id. Each retrieval operation builds one URL, issues one
//! GET with HTTP Basic auth (client id as username, empty password)
//! and decodes the envelope. There is no retry and no paging loop; the
//! first error is returned unchanged.

use std::fmt;
use std::time::Duration;

use reqwest::Url;
use tracing::{debug, warn};

use crate::error::{FrostError, UpstreamErrorKind};
use crate::filter::{Filter, build_url};
use crate::model::{DataEnvelope, decode_response};

/// Default Frost API base URL.
pub const DEFAULT_BASE_URL: &str = "https://frost.met.no/";

const SOURCES_PATH: &str = "sources/v0.jsonld";
const OBSERVATIONS_PATH: &str = "observations/v0.jsonld";
const SECURE_HELLO_PATH: &str = "tests/secureHello";

/// Connection settings for a [`FrostClient`].
#[derive(Clone)]
pub struct FrostConfig {
    /// API base URL. Endpoint paths are resolved relative to it.
    pub base_url: Url,
    /// Frost client id. Every request fails with
    /// [`FrostError::Configuration`] while this is `None`.
    pub client_id: Option<String>,
    /// Whole-request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl fmt::Debug for FrostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrostConfig")
            .field("base_url", &self.base_url.as_str())
            .field("client_id", &self.client_id.as_ref().map(|_| "<set>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client for the Frost sources and observations endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct FrostClient {
    http: reqwest::Client,
    base_url: Url,
    client_id: Option<String>,
}

impl fmt::Debug for FrostClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrostClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_client_id", &self.client_id.is_some())
            .finish_non_exhaustive()
    }
}

impl FrostClient {
    /// Create a client from its configuration.
    ///
    /// A base URL without a trailing slash is treated as a directory,
    /// so `http://host/frost` serves `http://host/frost/sources/...`.
    ///
    /// # Errors
    ///
    /// Returns [`FrostError::Transport`] if the HTTP client cannot be
    /// built (e.g. the TLS backend fails to initialize).
    pub fn new(config: FrostConfig) -> Result<Self, FrostError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: with_trailing_slash(config.base_url),
            client_id: config.client_id.filter(|id| !id.is_empty()),
        })
    }

    /// The base URL requests are resolved against.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Query the sources (station) catalog.
    pub async fn sources(&self, filter: &Filter) -> Result<Vec<DataEnvelope>, FrostError> {
        self.fetch_data(SOURCES_PATH, filter).await
    }

    /// The whole sources catalog, unfiltered.
    pub async fn all_sources(&self) -> Result<Vec<DataEnvelope>, FrostError> {
        self.sources(&Filter::default()).await
    }

    /// Query observations.
    pub async fn observations(&self, filter: &Filter) -> Result<Vec<DataEnvelope>, FrostError> {
        self.fetch_data(OBSERVATIONS_PATH, filter).await
    }

    /// Call the authenticated hello endpoint and return its text.
    ///
    /// Useful for checking that the configured client id is accepted.
    pub async fn secure_hello(&self) -> Result<String, FrostError> {
        let url = build_url(&self.base_url, SECURE_HELLO_PATH, &Filter::default())?;
        let body = self.get(url).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn fetch_data(
        &self,
        path: &str,
        filter: &Filter,
    ) -> Result<Vec<DataEnvelope>, FrostError> {
        let url = build_url(&self.base_url, path, filter)?;
        let body = self.get(url).await?;
        let envelope = decode_response(&body)?;

        if envelope.has_more_pages() {
            debug!(
                path,
                returned = envelope.data.len(),
                total = envelope.total_item_count,
                "Frost reported more pages; only the first is used"
            );
        }

        Ok(envelope.data)
    }

    /// Issue one authenticated GET and return the raw body.
    async fn get(&self, url: Url) -> Result<Vec<u8>, FrostError> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or_else(|| FrostError::Configuration("Frost client id not set".to_owned()))?;

        debug!(%url, "Frost request");

        let response = self
            .http
            .get(url)
            .basic_auth(client_id, Some(""))
            .send()
            .await?;

        let status = response.status();
        if let Some(kind) = UpstreamErrorKind::from_status(status.as_u16()) {
            warn!(status = status.as_u16(), %kind, "Frost request rejected");
            return Err(FrostError::Upstream { kind });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
