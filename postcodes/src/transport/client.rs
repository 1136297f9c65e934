//! HTTP transport for the postcode web service.
//!
//! One request per call, no retries. A 404 on the postcode, nearest and
//! postcode-radius endpoints means "no data" and becomes
//! [`Lookup::NotFound`]; every other non-success status is an error.

use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

use crate::domain::{Distance, GeoPoint, Postcode};

use super::Transport;
use super::convert::{decode_list, decode_single};
use super::error::TransportError;
use super::types::Lookup;
use super::urls;

/// Default base URL for the postcode service.
pub const DEFAULT_BASE_URL: &str = "http://www.uk-postcodes.com/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the base URL.
const BASE_URL_VAR: &str = "POSTCODES_BASE_URL";

/// Environment variable overriding the request timeout (seconds).
const TIMEOUT_VAR: &str = "POSTCODES_TIMEOUT_SECS";

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the User-Agent header
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config pointing at the public service.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("postcodes/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Build a config from `POSTCODES_BASE_URL` and `POSTCODES_TIMEOUT_SECS`,
    /// using defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(url) = var(BASE_URL_VAR) {
            config.base_url = url;
        }

        if let Some(raw) = var(TIMEOUT_VAR) {
            match raw.trim().parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => warn!(
                    value = %raw,
                    default = DEFAULT_TIMEOUT_SECS,
                    "ignoring invalid {TIMEOUT_VAR}"
                ),
            }
        }

        config
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the postcode service.
#[derive(Debug, Clone)]
pub struct PostcodeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PostcodeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TransportError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;

        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidBaseUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response, TransportError> {
        debug!(%url, "requesting");
        Ok(self.http.get(url).send().await?)
    }

    /// Body of a successful response; any other status is an `Api` error.
    async fn read_body(response: reqwest::Response) -> Result<String, TransportError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "postcode service returned an error");
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }

    /// GET where a 404 is an error like any other status.
    async fn fetch_required(&self, url: Url) -> Result<String, TransportError> {
        Self::read_body(self.send(url).await?).await
    }

    /// GET where a 404 means "no data" and yields `None`.
    async fn fetch_optional(&self, url: Url) -> Result<Option<String>, TransportError> {
        let response = self.send(url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("not found");
            return Ok(None);
        }

        Self::read_body(response).await.map(Some)
    }
}

impl Transport for PostcodeClient {
    async fn fetch_by_postcode(&self, postcode: &Postcode) -> Result<Lookup, TransportError> {
        let url = urls::postcode_url(&self.base_url, postcode)?;
        match self.fetch_optional(url).await? {
            Some(body) => decode_single(&body),
            None => Ok(Lookup::NotFound),
        }
    }

    async fn fetch_nearest(&self, point: &GeoPoint) -> Result<Lookup, TransportError> {
        let url = urls::nearest_url(&self.base_url, point)?;
        match self.fetch_optional(url).await? {
            Some(body) => decode_single(&body),
            None => Ok(Lookup::NotFound),
        }
    }

    async fn fetch_by_postcode_radius(
        &self,
        postcode: &Postcode,
        distance: Distance,
    ) -> Result<Lookup, TransportError> {
        let url = urls::postcode_radius_url(&self.base_url, postcode, distance)?;
        match self.fetch_optional(url).await? {
            Some(body) => decode_list(&body),
            None => Ok(Lookup::NotFound),
        }
    }

    async fn fetch_by_geo_radius(
        &self,
        point: &GeoPoint,
        distance: Distance,
    ) -> Result<Lookup, TransportError> {
        let url = urls::geo_radius_url(&self.base_url, point, distance)?;
        decode_list(&self.fetch_required(url).await?)
    }
}
