//! MediaWiki API client with rate limiting and retry
//!
//! A thin wrapper over `reqwest` exposing the two query operations the
//! analyzer needs: redirect resolution for a title, and enumeration of the
//! redirect backlinks pointing at a title. Requests are rate limited with
//! `governor` and retried with exponential backoff on transient failures.
//!
//! The endpoint comes from [`ApiConfig`], so tests point the client at a
//! wiremock server instead of the live API.

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::time::Duration;

/// Response shape for `action=query&redirects=1&titles=<t>`
#[derive(Debug, Deserialize)]
struct RedirectResponse {
    query: RedirectQuery,
}

#[derive(Debug, Deserialize)]
struct RedirectQuery {
    pages: HashMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    title: String,
}

/// Response shape for `action=query&list=backlinks&bltitle=<t>`
#[derive(Debug, Deserialize)]
struct BacklinksResponse {
    query: BacklinksQuery,
}

#[derive(Debug, Deserialize)]
struct BacklinksQuery {
    backlinks: Vec<BacklinkEntry>,
}

#[derive(Debug, Deserialize)]
struct BacklinkEntry {
    title: String,
}

/// MediaWiki API client
pub struct WikiClient {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// API endpoint URL
    endpoint: String,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,

    /// Maximum number of retry attempts for failed requests
    max_retries: u32,

    /// Base delay in milliseconds for exponential backoff
    base_delay_ms: u64,
}

impl WikiClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be created.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).gzip(true).build()?;

        let rate = NonZeroU32::new(config.requests_per_second)
            .unwrap_or(NonZeroU32::new(1).expect("1 is nonzero"));
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            rate_limiter,
            max_retries: config.max_retries,
            base_delay_ms: 1000,
        })
    }

    /// Resolve a title to its canonical form, following redirects
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if the response does not contain exactly
    /// one page entry. Disambiguation and batch responses both surface
    /// here; a count other than one is a hard error, never a silent skip.
    pub async fn resolve_title(&self, title: &str) -> Result<String> {
        let params = [
            ("action", "query"),
            ("redirects", "1"),
            ("format", "json"),
            ("titles", title),
        ];
        let response: RedirectResponse = self.get_json(&params).await?;

        let pages = response.query.pages;
        if pages.len() != 1 {
            return Err(Error::Lookup {
                title: title.to_string(),
                pages: pages.len(),
            });
        }
        let page = pages.into_values().next().expect("len checked above");
        tracing::debug!(title = %title, canonical = %page.title, "Resolved redirect");
        Ok(page.title)
    }

    /// List titles that redirect to `title`
    ///
    /// `limit` caps the result count in a single call; redirects beyond it
    /// are silently missed. The analyzer accepts that approximation.
    pub async fn redirect_backlinks(&self, title: &str, limit: u32) -> Result<Vec<String>> {
        let limit = limit.to_string();
        let params = [
            ("action", "query"),
            ("list", "backlinks"),
            ("format", "json"),
            ("blfilterredir", "redirects"),
            ("bllimit", limit.as_str()),
            ("bltitle", title),
        ];
        let response: BacklinksResponse = self.get_json(&params).await?;

        let titles: Vec<String> = response
            .query
            .backlinks
            .into_iter()
            .map(|entry| entry.title)
            .collect();
        tracing::debug!(title = %title, count = titles.len(), "Fetched redirect backlinks");
        Ok(titles)
    }

    /// Issue a GET request with rate limiting and retry, decoding JSON
    async fn get_json<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            // Exponential backoff for retries
            if attempt > 0 {
                let delay = self.base_delay_ms * 2_u64.pow(attempt - 1);
                tracing::debug!(attempt = attempt, delay_ms = delay, "Retrying API request");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            match self.client.get(&self.endpoint).query(params).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response.json().await?);
                    } else if Self::should_retry(status.as_u16()) {
                        last_error = Some(Error::ExternalService(format!(
                            "API returned status {status}"
                        )));
                        continue;
                    } else {
                        return Err(Error::ExternalService(format!(
                            "API returned status {status}"
                        )));
                    }
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(Error::ExternalService("request timed out".to_string()));
                    } else {
                        last_error = Some(Error::Http(e));
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::ExternalService("retries exhausted with no recorded error".to_string())
        }))
    }

    /// Status codes that warrant a retry: rate limiting and server errors
    fn should_retry(status: u16) -> bool {
        matches!(status, 429 | 500 | 502 | 503 | 504)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_retry() {
        assert!(WikiClient::should_retry(429));
        assert!(WikiClient::should_retry(500));
        assert!(WikiClient::should_retry(503));

        assert!(!WikiClient::should_retry(400));
        assert!(!WikiClient::should_retry(403));
        assert!(!WikiClient::should_retry(404));
        assert!(!WikiClient::should_retry(200));
    }

    #[test]
    fn test_client_creation() {
        let client = WikiClient::new(&ApiConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_redirect_response_decoding() {
        let body = r#"{"query":{"pages":{"32817":{"pageid":32817,"ns":0,"title":"Vladimir Putin"}}}}"#;
        let response: RedirectResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.query.pages.len(), 1);
        assert_eq!(
            response.query.pages.values().next().unwrap().title,
            "Vladimir Putin"
        );
    }

    #[test]
    fn test_backlinks_response_decoding() {
        let body = r#"{"query":{"backlinks":[{"pageid":1,"ns":0,"title":"Putin"},{"pageid":2,"ns":0,"title":"VVP"}]}}"#;
        let response: BacklinksResponse = serde_json::from_str(body).unwrap();
        let titles: Vec<_> = response
            .query
            .backlinks
            .iter()
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Putin", "VVP"]);
    }
}
