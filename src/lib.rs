pub mod core;
pub mod http;
pub mod parser;
pub mod record;
pub mod scrapers;
pub mod stats;
pub mod storage;

pub use core::{CrawlConfig, Crawler};
pub use core::{FieldError, FieldResult, ScraperError, ScraperResult};
pub use http::HttpResponse;
pub use record::ProductRecord;
pub use scrapers::{HttpScraper, Scraper};
pub use stats::StatsTracker;
pub use storage::StorageManager;
