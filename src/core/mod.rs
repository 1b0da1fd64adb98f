mod config;
mod crawler;
mod errors;
pub mod retry;
pub mod walker;

pub use config::{CrawlConfig, DEFAULT_IMAGE_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_ROOT_URL};
pub use crawler::Crawler;
pub use errors::{FieldError, FieldResult, ScraperError, ScraperResult};
