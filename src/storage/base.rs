use async_trait::async_trait;

use crate::parser::clean_filename;
use crate::record::ProductRecord;
use crate::ScraperResult;

/// File stem used when a record has no category.
pub const UNCATEGORIZED: &str = "uncategorized";

#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn store(&self, record: &ProductRecord) -> ScraperResult<()>;

    async fn flush(&self) -> ScraperResult<()> {
        Ok(())
    }
}

/// Per-category file stem for `record`.
pub fn category_key(category: Option<&str>) -> String {
    match category.map(clean_filename) {
        Some(cleaned) if !cleaned.is_empty() => cleaned,
        _ => UNCATEGORIZED.to_string(),
    }
}
