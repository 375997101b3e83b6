//! HTTP client for the Detmir `/v2/products` endpoint.
//!
//! Wraps `reqwest` with typed error handling and the two-step category
//! fetch: read the total item count from the meta response, then request
//! the full listing in a single call with that count as the limit.

use std::time::Duration;

use reqwest::{header, Client, Url};

use crate::error::ScraperError;
use crate::parse::extract_json_payload;
use crate::types::RawProduct;

const DEFAULT_BASE_URL: &str = "https://api.detmir.ru";

/// Request profile presented to storefronts that filter plain API clients.
const BROWSER_PROFILE_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Request profile for a fetch, selected by configuration.
///
/// `Direct` sends a plain API-client profile. `BrowserProfile` sends
/// browser-like headers for storefronts that reject scraper fingerprints;
/// responses fetched this way may arrive wrapped in a rendering artifact,
/// which the payload extraction step strips either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Direct,
    BrowserProfile,
}

impl FetchMode {
    /// Parses a config string. Unrecognized values fall back to `Direct`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "browser" | "browser-profile" => Self::BrowserProfile,
            _ => Self::Direct,
        }
    }
}

/// Client for the Detmir product API.
///
/// Use [`DetmirClient::new`] for production or
/// [`DetmirClient::with_base_url`] to point at a mock server in tests.
pub struct DetmirClient {
    client: Client,
    base_url: Url,
    fetch_mode: FetchMode,
}

impl DetmirClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        fetch_mode: FetchMode,
    ) -> Result<Self, ScraperError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent, fetch_mode)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        fetch_mode: FetchMode,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends the endpoint path instead of replacing the last
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: base,
            fetch_mode,
        })
    }

    /// Fetches the full listing for a category: total count from the meta
    /// response first, then every item in one request with that count as the
    /// limit. The two requests are strictly sequential.
    ///
    /// # Errors
    ///
    /// Propagates any [`ScraperError`] from either step.
    pub async fn fetch_category(&self, category: &str) -> Result<Vec<RawProduct>, ScraperError> {
        let total = self.fetch_category_length(category).await?;
        tracing::debug!(category, total, "category meta fetched");
        self.fetch_category_page(category, total).await
    }

    /// Reads `meta.length`, the total number of items matching `category`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] / [`ScraperError::UnexpectedStatus`] on
    ///   transport failure or a non-2xx status.
    /// - [`ScraperError::MissingPayload`] when no JSON payload can be
    ///   extracted from the body.
    /// - [`ScraperError::Deserialize`] when the payload is not valid JSON.
    /// - [`ScraperError::MissingLength`] when the meta section carries no
    ///   usable length.
    pub async fn fetch_category_length(&self, category: &str) -> Result<u64, ScraperError> {
        let url = self.products_url(category, &ProductsQuery::Meta)?;
        let payload = self.request_payload(&url).await?;
        let body: serde_json::Value =
            serde_json::from_str(&payload).map_err(|e| ScraperError::Deserialize {
                context: format!("category meta for \"{category}\""),
                source: e,
            })?;

        body.get("meta")
            .and_then(|meta| meta.get("length"))
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| ScraperError::MissingLength {
                category: category.to_owned(),
            })
    }

    /// Fetches up to `limit` items for `category` and parses them as a list
    /// of [`RawProduct`].
    ///
    /// # Errors
    ///
    /// Same retrieval errors as [`Self::fetch_category_length`], minus
    /// `MissingLength`.
    pub async fn fetch_category_page(
        &self,
        category: &str,
        limit: u64,
    ) -> Result<Vec<RawProduct>, ScraperError> {
        let url = self.products_url(category, &ProductsQuery::Limit(limit))?;
        let payload = self.request_payload(&url).await?;
        serde_json::from_str(&payload).map_err(|e| ScraperError::Deserialize {
            context: format!("product list for \"{category}\""),
            source: e,
        })
    }

    /// Sends a GET request, asserts a 2xx status, and extracts the JSON
    /// payload from the body (stripping the rendering artifact if present).
    async fn request_payload(&self, url: &Url) -> Result<String, ScraperError> {
        let mut request = self.client.get(url.clone());
        request = match self.fetch_mode {
            FetchMode::Direct => request.header(header::ACCEPT, "application/json"),
            FetchMode::BrowserProfile => request
                .header(header::USER_AGENT, BROWSER_PROFILE_UA)
                .header(
                    header::ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                )
                .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9"),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        extract_json_payload(&body).ok_or_else(|| ScraperError::MissingPayload {
            url: url.to_string(),
        })
    }

    /// Builds the `/v2/products` URL for the given category filter and query
    /// variant. Query values are percent-encoded by `query_pairs_mut`.
    fn products_url(&self, category: &str, query: &ProductsQuery) -> Result<Url, ScraperError> {
        let mut url =
            self.base_url
                .join("v2/products")
                .map_err(|e| ScraperError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;

        let filter = format!("categories[].alias:{category}");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("filter", &filter);
            match query {
                ProductsQuery::Meta => {
                    pairs.append_pair("meta", "*");
                }
                ProductsQuery::Limit(limit) => {
                    pairs.append_pair("limit", &limit.to_string());
                }
            }
        }

        Ok(url)
    }
}

/// Second query parameter of a products request: ask for the meta section,
/// or for up to `n` items.
enum ProductsQuery {
    Meta,
    Limit(u64),
}
