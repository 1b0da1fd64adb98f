use futures::{pin_mut, StreamExt};
use log::{debug, error, info, warn};
use std::sync::Arc;
use url::Url;

use super::config::CrawlConfig;
use super::walker;
use crate::record::ProductRecord;
use crate::scrapers::fetch_document;
use crate::stats::StatsTracker;
use crate::storage::{ImageStore, StorageManager};
use crate::{Scraper, ScraperResult};

/// Sequential driver: one request in flight at any time.
///
/// A product page that fails to load is skipped; a listing page that fails
/// ends that category. Only the root page is fatal.
pub struct Crawler {
    scraper: Box<dyn Scraper>,
    stats: Arc<StatsTracker>,
}

impl Crawler {
    pub fn new(scraper: Box<dyn Scraper>) -> Self {
        info!("Initializing crawler");
        let stats = Arc::new(StatsTracker::new());
        let mut scraper = scraper;
        scraper.set_stats(Arc::clone(&stats));

        Self { scraper, stats }
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub async fn scrape_product(&self, url: &Url, site_root: &Url) -> ScraperResult<ProductRecord> {
        let doc = fetch_document(self.scraper.as_ref(), url).await?;
        Ok(ProductRecord::from_document(url, &doc, site_root))
    }

    /// Walks every selected category and returns the records in discovery
    /// order, after handing each one to `storage`.
    pub async fn run(
        &self,
        config: &CrawlConfig,
        storage: &StorageManager,
    ) -> ScraperResult<Vec<ProductRecord>> {
        info!("Starting crawl of {}", config.root_url);
        let site_root = config.site_root()?;
        let images = config
            .download_images
            .then(|| ImageStore::new(&config.image_dir, config.image_retry.clone()));

        let categories = walker::list_categories(self.scraper.as_ref(), &config.root_url).await?;
        let mut records = Vec::new();

        for category in categories
            .into_iter()
            .filter(|category| config.wants_category(&category.name))
        {
            info!("Processing category: {} ({})", category.name, category.url);
            let products = walker::list_products(self.scraper.as_ref(), category.url.clone());
            pin_mut!(products);
            let mut found = 0;

            while let Some(next) = products.next().await {
                let product_url = match next {
                    Ok(url) => url,
                    Err(e) => {
                        warn!("Stopping category {} early: {}", category.name, e);
                        self.stats.record_skipped();
                        break;
                    }
                };

                let record = match self.scrape_product(&product_url, &site_root).await {
                    Ok(record) => record,
                    Err(e) => {
                        warn!("Skipping product {}: {}", product_url, e);
                        self.stats.record_skipped();
                        continue;
                    }
                };
                found += 1;
                self.stats.record_scraped();
                debug!("Scraped {:?}", record.title);

                storage.store(&record).await;

                if let Some(images) = &images {
                    match images.save_cover(self.scraper.as_ref(), &record).await {
                        Ok(path) => {
                            debug!("Saved cover image to {}", path.display());
                            self.stats.record_image(true);
                        }
                        Err(e) => {
                            error!("Cover image for {} not saved: {}", product_url, e);
                            self.stats.record_image(false);
                        }
                    }
                }

                records.push(record);
            }

            info!("Category {} done: {} products", category.name, found);
        }

        storage.flush().await;
        self.stats.finish();
        info!("Crawl completed. Total records: {}", records.len());
        Ok(records)
    }
}
