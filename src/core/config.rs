use std::path::PathBuf;
use url::Url;

use super::retry::RetryPolicy;
use crate::ScraperResult;

pub const DEFAULT_ROOT_URL: &str = "https://books.toscrape.com/";
pub const DEFAULT_OUTPUT_DIR: &str = "datas_csv";
pub const DEFAULT_IMAGE_DIR: &str = "book_images";

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub root_url: Url,
    pub output_dir: PathBuf,
    pub image_dir: PathBuf,
    pub download_images: bool,
    pub export_json: bool,
    /// Category names to crawl, compared case-insensitively. Empty means all.
    pub categories: Vec<String>,
    pub image_retry: RetryPolicy,
}

impl CrawlConfig {
    pub fn new(root_url: Url) -> Self {
        Self {
            root_url,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            download_images: true,
            export_json: false,
            categories: Vec::new(),
            image_retry: RetryPolicy::default(),
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = dir.into();
        self
    }

    pub fn with_images(mut self, download: bool) -> Self {
        self.download_images = download;
        self
    }

    pub fn with_json(mut self, export: bool) -> Self {
        self.export_json = export;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_image_retry(mut self, policy: RetryPolicy) -> Self {
        self.image_retry = policy;
        self
    }

    /// Directory part of the root URL; image paths are rebuilt from here.
    pub fn site_root(&self) -> ScraperResult<Url> {
        Ok(self.root_url.join("./")?)
    }

    pub fn wants_category(&self, name: &str) -> bool {
        self.categories.is_empty()
            || self
                .categories
                .iter()
                .any(|wanted| wanted.trim().eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_root_drops_page_name() {
        let config = CrawlConfig::new(Url::parse("https://books.toscrape.com/index.html").unwrap());
        assert_eq!(config.site_root().unwrap().as_str(), "https://books.toscrape.com/");

        let config = CrawlConfig::new(Url::parse("http://localhost:8000/mirror/").unwrap());
        assert_eq!(config.site_root().unwrap().as_str(), "http://localhost:8000/mirror/");
    }

    #[test]
    fn test_category_filter() {
        let root = Url::parse(DEFAULT_ROOT_URL).unwrap();

        let all = CrawlConfig::new(root.clone());
        assert!(all.wants_category("Poetry"));

        let some = CrawlConfig::new(root).with_categories(vec!["poetry".to_string()]);
        assert!(some.wants_category("Poetry"));
        assert!(!some.wants_category("Travel"));
    }
}
