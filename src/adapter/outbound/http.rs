//! Shared HTTP plumbing for the upstream market data adapters.
//!
//! One `reqwest` client with a bounded timeout is shared by every source.
//! A request is attempted exactly once; transport errors, non-success
//! statuses and undecodable bodies all collapse into
//! [`MarketDataError::UpstreamUnavailable`] tagged with the source.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::Source;
use crate::error::MarketDataError;

/// Default per-request timeout for upstream calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin JSON-over-HTTP fetcher.
#[derive(Debug, Clone)]
pub struct JsonFetcher {
    http: HttpClient,
}

impl JsonFetcher {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("kimchi/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self { http }
    }

    /// GET `url` with `query` and decode the JSON body as `T`.
    pub async fn get_json<T>(
        &self,
        source: Source,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MarketDataError>
    where
        T: DeserializeOwned,
    {
        debug!(%source, url, "Upstream request");

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|err| MarketDataError::unavailable(source, describe(&err)))?;

        let response = response
            .error_for_status()
            .map_err(|err| MarketDataError::unavailable(source, describe(&err)))?;

        response
            .json::<T>()
            .await
            .map_err(|err| MarketDataError::unavailable(source, format!("malformed payload: {err}")))
    }
}

impl Default for JsonFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if let Some(status) = err.status() {
        format!("HTTP {status}")
    } else {
        err.to_string()
    }
}
