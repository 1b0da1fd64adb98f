use crate::core::retry::RetryPolicy;
use crate::parser::Document;
use crate::{HttpResponse, ScraperError, ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;
use tokio::time::sleep;
use url::Url;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// One GET with no status check and no bookkeeping.
    async fn fetch_single(&self, url: &Url) -> ScraperResult<HttpResponse>;
    fn stats(&self) -> &StatsTracker;
    fn set_stats(&mut self, stats: Arc<StatsTracker>);

    /// Single-shot fetch. Any status outside 2xx becomes
    /// [`ScraperError::StatusError`].
    async fn fetch(&self, url: &Url) -> ScraperResult<HttpResponse> {
        let start_time = Utc::now();
        debug!("Fetching URL: {}", url);

        let response = match self.fetch_single(url).await {
            Ok(response) => response,
            Err(e) => {
                self.stats().record_failure();
                return Err(e);
            }
        };

        let duration = Utc::now().signed_duration_since(start_time);
        self.stats()
            .record_request(response.status, response.body.len(), duration);
        debug!(
            "Received response: status={}, body_length={}",
            response.status,
            response.body.len()
        );

        if !response.is_success() {
            return Err(ScraperError::StatusError {
                url: url.clone(),
                status: response.status,
            });
        }
        Ok(response)
    }

    async fn fetch_with_retry(
        &self,
        url: &Url,
        policy: &RetryPolicy,
    ) -> ScraperResult<HttpResponse> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let error = match self.fetch(url).await {
                Ok(response) => return Ok(response),
                Err(e) => e,
            };

            if !policy.should_retry(&error) {
                return Err(error);
            }
            if attempt >= policy.max_attempts {
                return Err(ScraperError::RetriesExhausted {
                    url: url.clone(),
                    attempts: attempt,
                    last: Box::new(error),
                });
            }

            self.stats().record_retry();
            warn!(
                "Retry triggered for URL: {} (attempt={}/{}, delay={:?}): {}",
                url, attempt, policy.max_attempts, policy.delay, error
            );
            sleep(policy.delay).await;
        }
    }
}

/// Fetches `url` and parses the body. Kept off the trait because the parsed
/// tree is not `Send`.
pub async fn fetch_document(scraper: &dyn Scraper, url: &Url) -> ScraperResult<Document> {
    Ok(scraper.fetch(url).await?.into_document())
}
