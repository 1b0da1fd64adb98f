use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, ClientBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::Scraper;
use crate::{HttpResponse, ScraperResult, StatsTracker};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum HttpScraperError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] header::InvalidHeaderName),
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}

#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
    headers: header::HeaderMap,
    timeout: Duration,
    stats: Arc<StatsTracker>,
}

impl HttpScraper {
    pub fn new() -> Result<Self, HttpScraperError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(DEFAULT_USER_AGENT),
        );

        Ok(Self {
            client: Self::build_client(&headers, DEFAULT_TIMEOUT)?,
            headers,
            timeout: DEFAULT_TIMEOUT,
            stats: Arc::new(StatsTracker::new()),
        })
    }

    /// Adds or replaces default headers. A `user-agent` entry overrides the
    /// built-in one.
    pub fn with_headers(mut self, headers: Vec<(&str, &str)>) -> Result<Self, HttpScraperError> {
        for (key, value) in headers {
            let name = header::HeaderName::from_bytes(key.as_bytes())?;
            let value = header::HeaderValue::from_str(value)?;
            self.headers.insert(name, value);
        }

        self.client = Self::build_client(&self.headers, self.timeout)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, HttpScraperError> {
        self.timeout = timeout;
        self.client = Self::build_client(&self.headers, self.timeout)?;
        Ok(self)
    }

    fn build_client(headers: &header::HeaderMap, timeout: Duration) -> Result<Client, HttpScraperError> {
        Ok(ClientBuilder::new()
            .default_headers(headers.clone())
            .timeout(timeout)
            .build()?)
    }

    fn extract_headers(response: &reqwest::Response) -> HashMap<String, String> {
        response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect()
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<HttpResponse> {
        let timestamp = Utc::now();
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(&response);
        let body = response.bytes().await?;

        Ok(HttpResponse {
            url: url.clone(),
            status,
            headers,
            body: body.to_vec(),
            timestamp,
        })
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}
