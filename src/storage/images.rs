use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use super::base::category_key;
use crate::core::retry::RetryPolicy;
use crate::parser::clean_filename;
use crate::record::ProductRecord;
use crate::{Scraper, ScraperError, ScraperResult};

/// Saves cover images as `<base>/<category>/<upc>.jpg`.
#[derive(Debug, Clone)]
pub struct ImageStore {
    base_path: PathBuf,
    policy: RetryPolicy,
}

impl ImageStore {
    pub fn new<P: AsRef<Path>>(base_path: P, policy: RetryPolicy) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            policy,
        }
    }

    pub fn path_for(&self, category: Option<&str>, universal_code: &str) -> PathBuf {
        self.base_path
            .join(category_key(category))
            .join(format!("{}.jpg", clean_filename(universal_code)))
    }

    pub async fn save_cover(
        &self,
        scraper: &dyn Scraper,
        record: &ProductRecord,
    ) -> ScraperResult<PathBuf> {
        let image_url = record
            .image_url
            .as_deref()
            .ok_or(ScraperError::MissingField("image_url"))?;
        let code = record
            .universal_code
            .as_deref()
            .ok_or(ScraperError::MissingField("universal_code"))?;

        let url = Url::parse(image_url)?;
        let response = scraper.fetch_with_retry(&url, &self.policy).await?;

        let path = self.path_for(record.category.as_deref(), code);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &response.body)?;
        Ok(path)
    }
}
