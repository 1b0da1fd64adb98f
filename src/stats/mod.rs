use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ScrapingStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub retry_count: usize,
    pub bytes_downloaded: usize,
    pub status_codes: HashMap<u16, usize>,
    /// Requests that produced a response; the average is taken over these.
    pub timed_responses: usize,
    pub average_response_time: f64, // in milliseconds
    pub records_scraped: usize,
    pub skipped_pages: usize,
    pub images_saved: usize,
    pub images_failed: usize,
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<ScrapingStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(ScrapingStats {
                start_time: Utc::now(),
                end_time: None,
                total_requests: 0,
                successful_requests: 0,
                failed_requests: 0,
                retry_count: 0,
                bytes_downloaded: 0,
                status_codes: HashMap::new(),
                timed_responses: 0,
                average_response_time: 0.0,
                records_scraped: 0,
                skipped_pages: 0,
                images_saved: 0,
                images_failed: 0,
            })),
        }
    }

    pub fn record_request(&self, status: u16, size: usize, duration: Duration) {
        let mut stats = self.stats.write();
        stats.total_requests += 1;

        if (200..300).contains(&status) {
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }

        *stats.status_codes.entry(status).or_insert(0) += 1;
        stats.bytes_downloaded += size;

        stats.timed_responses += 1;
        let current_total = stats.average_response_time * (stats.timed_responses - 1) as f64;
        let new_duration = duration.num_milliseconds() as f64;
        stats.average_response_time = (current_total + new_duration) / stats.timed_responses as f64;
    }

    /// A request that never produced a response.
    pub fn record_failure(&self) {
        let mut stats = self.stats.write();
        stats.total_requests += 1;
        stats.failed_requests += 1;
    }

    pub fn record_retry(&self) {
        self.stats.write().retry_count += 1;
    }

    pub fn record_scraped(&self) {
        self.stats.write().records_scraped += 1;
    }

    pub fn record_skipped(&self) {
        self.stats.write().skipped_pages += 1;
    }

    pub fn record_image(&self, saved: bool) {
        let mut stats = self.stats.write();
        if saved {
            stats.images_saved += 1;
        } else {
            stats.images_failed += 1;
        }
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> ScrapingStats {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nScraping Statistics:");
        println!("===================");
        println!("Duration: {} seconds", duration.num_seconds());
        println!("Records Scraped: {}", stats.records_scraped);
        println!("Skipped Pages: {}", stats.skipped_pages);
        println!("Total Requests: {}", stats.total_requests);
        println!("Successful Requests: {}", stats.successful_requests);
        println!("Failed Requests: {}", stats.failed_requests);
        println!("Retry Count: {}", stats.retry_count);
        println!(
            "Images: {} saved, {} failed",
            stats.images_saved, stats.images_failed
        );
        println!(
            "Data Downloaded: {:.2} MB",
            stats.bytes_downloaded as f64 / 1_000_000.0
        );
        println!(
            "Average Response Time: {:.2}ms",
            stats.average_response_time
        );

        println!("\nStatus Codes:");
        let mut codes: Vec<_> = stats.status_codes.iter().collect();
        codes.sort();
        for (code, count) in codes {
            println!("  {}: {}", code, count);
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
