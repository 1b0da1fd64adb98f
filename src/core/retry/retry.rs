use std::time::Duration;

use crate::ScraperError;

const DEFAULT_RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Bounded retry with a fixed pause between attempts. Used only for cover
/// image downloads; page fetches are single-shot.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
            retry_statuses: DEFAULT_RETRY_STATUSES.to_vec(),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            ..Default::default()
        }
    }

    pub fn with_retry_statuses(mut self, statuses: Vec<u16>) -> Self {
        self.retry_statuses = statuses;
        self
    }

    /// Whether `error` is transient under this policy. Retry counting is up
    /// to the caller.
    pub fn should_retry(&self, error: &ScraperError) -> bool {
        match error {
            ScraperError::HttpError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ScraperError::ConnectionError(_) => true,
            ScraperError::StatusError { status, .. } => self.retry_statuses.contains(status),
            _ => false,
        }
    }
}

