use crate::{HttpResponse, ScraperError, ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use super::Scraper;

#[derive(Clone, Debug)]
pub enum MockResponse {
    Page { status: u16, body: Vec<u8> },
    ConnectionFailure,
}

impl MockResponse {
    pub fn html(body: impl Into<String>) -> Self {
        MockResponse::Page {
            status: 200,
            body: body.into().into_bytes(),
        }
    }

    pub fn bytes(body: impl Into<Vec<u8>>) -> Self {
        MockResponse::Page {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        MockResponse::Page {
            status,
            body: Vec::new(),
        }
    }
}

/// In-memory site keyed by absolute URL. Each route plays its responses in
/// order and then keeps repeating the last one; unknown URLs answer 404.
#[derive(Clone, Default)]
pub struct MockScraper {
    routes: Arc<Mutex<HashMap<String, Vec<MockResponse>>>>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    stats: Arc<StatsTracker>,
}

impl MockScraper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: impl Into<String>) -> Self {
        self.with_responses(url, vec![MockResponse::html(body)])
    }

    pub fn with_responses(self, url: &str, responses: Vec<MockResponse>) -> Self {
        self.routes.lock().insert(url.to_string(), responses);
        self
    }

    /// Number of times `url` has been requested.
    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_single(&self, url: &Url) -> ScraperResult<HttpResponse> {
        let key = url.to_string();
        let index = {
            let mut hits = self.hits.lock();
            let count = hits.entry(key.clone()).or_insert(0);
            *count += 1;
            *count - 1
        };

        let response = self
            .routes
            .lock()
            .get(&key)
            .and_then(|responses| responses.get(index).or_else(|| responses.last()).cloned())
            .unwrap_or_else(|| MockResponse::status(404));

        match response {
            MockResponse::Page { status, body } => Ok(HttpResponse {
                url: url.clone(),
                status,
                headers: HashMap::new(),
                body,
                timestamp: Utc::now(),
            }),
            MockResponse::ConnectionFailure => Err(ScraperError::ConnectionError(format!(
                "connection refused: {}",
                url
            ))),
        }
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}
