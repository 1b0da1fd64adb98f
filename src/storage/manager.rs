use log::warn;

use super::{CsvStorage, JsonLinesStorage, StorageBackend};
use crate::core::CrawlConfig;
use crate::record::ProductRecord;
use crate::ScraperResult;

/// Fans every record out to the registered backends, in registration order.
#[derive(Default)]
pub struct StorageManager {
    storages: Vec<Box<dyn StorageBackend>>,
}

impl StorageManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// CSV always; JSON Lines when the config asks for it.
    pub fn from_config(config: &CrawlConfig) -> ScraperResult<Self> {
        let mut manager = Self::new().register_storage(CsvStorage::new(&config.output_dir)?);
        if config.export_json {
            manager = manager.register_storage(JsonLinesStorage::new(&config.output_dir)?);
        }
        Ok(manager)
    }

    pub fn register_storage<S: StorageBackend + 'static>(mut self, storage: S) -> Self {
        self.storages.push(Box::new(storage));
        self
    }

    pub fn len(&self) -> usize {
        self.storages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storages.is_empty()
    }

    /// Stores `record` everywhere it can. A failing backend is logged and
    /// skipped; returns how many backends accepted the record.
    pub async fn store(&self, record: &ProductRecord) -> usize {
        let mut stored = 0;
        for storage in &self.storages {
            match storage.store(record).await {
                Ok(()) => stored += 1,
                Err(e) => warn!(
                    "{} storage rejected {}: {}",
                    storage.name(),
                    record.source_url,
                    e
                ),
            }
        }
        stored
    }

    pub async fn flush(&self) {
        for storage in &self.storages {
            if let Err(e) = storage.flush().await {
                warn!("{} storage failed to flush: {}", storage.name(), e);
            }
        }
    }
}
