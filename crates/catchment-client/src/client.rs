//! HTTP client for the outlet API.
//!
//! Exposes the five read operations the map consumes: the geocoded outlet
//! feed, free-text search, count-by-location, latest-closing outlets, and a
//! single outlet by ID. The first three are served either by the site's
//! `/api/*` proxy ([`Routing::Site`]) or straight from the backend
//! ([`Routing::Direct`]); the last two always go to the backend.

use std::time::Duration;

use catchment_core::{AppConfig, LocationSummary, Outlet};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Where the feed, search and location calls are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routing {
    /// Through the site proxy: `/api/outlets`, `/api/search/{q}`,
    /// `/api/location/{loc}` on the given origin.
    Site(Url),
    /// Straight to the backend: `/outlets`, `/outlets/search/{q}`,
    /// `/outlets/location/{loc}`.
    Direct,
}

/// Client for the outlet backend and the site proxy in front of it.
///
/// No retries are attempted; every failure is returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct OutletClient {
    client: Client,
    api_base: Url,
    routing: Routing,
}

impl OutletClient {
    /// Client that talks to the backend only.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidUrl`] if `api_base` is not an http(s) URL.
    pub fn direct(api_base: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http(timeout_secs, user_agent)?,
            api_base: parse_base(api_base)?,
            routing: Routing::Direct,
        })
    }

    /// Client that reads the feed, search and location routes through the
    /// site proxy at `site_base`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidUrl`] if either base is not an http(s) URL.
    pub fn via_site(
        api_base: &str,
        site_base: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http(timeout_secs, user_agent)?,
            api_base: parse_base(api_base)?,
            routing: Routing::Site(parse_base(site_base)?),
        })
    }

    /// Site-routed client built from the shared application config.
    ///
    /// # Errors
    ///
    /// See [`OutletClient::via_site`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::via_site(
            &config.api_base_url,
            &config.site_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    /// Fetches the outlet feed, optionally restricted to geocoded outlets.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] / [`ClientError::NotFound`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not an outlet array.
    pub async fn outlets(&self, geocoded_only: bool) -> Result<Vec<Outlet>, ClientError> {
        let mut url = match &self.routing {
            Routing::Site(site) => endpoint(site, &["api", "outlets"])?,
            Routing::Direct => endpoint(&self.api_base, &["outlets"])?,
        };
        url.query_pairs_mut()
            .append_pair("geocoded_only", if geocoded_only { "true" } else { "false" });
        self.get_json(url).await
    }

    /// Full-text search; `query` is sent verbatim as one path segment.
    ///
    /// # Errors
    ///
    /// Same as [`OutletClient::outlets`].
    pub async fn search(&self, query: &str) -> Result<Vec<Outlet>, ClientError> {
        let url = match &self.routing {
            Routing::Site(site) => endpoint(site, &["api", "search", query])?,
            Routing::Direct => endpoint(&self.api_base, &["outlets", "search", query])?,
        };
        self.get_json(url).await
    }

    /// Outlet count and list for a location name.
    ///
    /// # Errors
    ///
    /// Same as [`OutletClient::outlets`].
    pub async fn location(&self, location: &str) -> Result<LocationSummary, ClientError> {
        let url = match &self.routing {
            Routing::Site(site) => endpoint(site, &["api", "location", location])?,
            Routing::Direct => endpoint(&self.api_base, &["outlets", "location", location])?,
        };
        self.get_json(url).await
    }

    /// Outlets sharing the latest closing time.
    ///
    /// # Errors
    ///
    /// Same as [`OutletClient::outlets`].
    pub async fn latest_closing(&self) -> Result<Vec<Outlet>, ClientError> {
        let url = endpoint(&self.api_base, &["outlets", "latest-closing"])?;
        self.get_json(url).await
    }

    /// One outlet's full record.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotFound`] when the backend has no such outlet, otherwise
    /// the same as [`OutletClient::outlets`].
    pub async fn outlet(&self, id: i64) -> Result<Outlet, ClientError> {
        let url = endpoint(&self.api_base, &["outlets", &id.to_string()])?;
        self.get_json(url).await
    }

    /// Sends a GET request, maps non-2xx statuses to typed errors, and parses
    /// the body as `T`.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        tracing::debug!(%url, "outlet api request");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

fn build_http(timeout_secs: u64, user_agent: &str) -> Result<Client, ClientError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Parses a base URL and normalises it to end with exactly one slash.
fn parse_base(raw: &str) -> Result<Url, ClientError> {
    let normalised = format!("{}/", raw.trim().trim_end_matches('/'));
    let url = Url::parse(&normalised).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

/// Appends percent-encoded path segments to `base`.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl {
            url: base.to_string(),
            reason: "URL cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
