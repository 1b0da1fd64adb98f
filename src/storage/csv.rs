use async_trait::async_trait;
use log::info;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use super::base::{category_key, StorageBackend};
use crate::record::ProductRecord;
use crate::ScraperResult;

/// One CSV file per category, named after the cleaned category. The header
/// row is the record's field names; empty cells are missing fields.
///
/// Only the current category's file is held open. Categories arrive one after
/// another, so switching category closes the previous writer; a category seen
/// again later is appended to without a second header.
pub struct CsvStorage {
    base_path: PathBuf,
    state: Mutex<WriterState>,
}

#[derive(Default)]
struct WriterState {
    current: Option<(String, csv::Writer<File>)>,
    started: HashSet<String>,
}

impl CsvStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> ScraperResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            state: Mutex::new(WriterState::default()),
        })
    }

    pub fn path_for(&self, category: Option<&str>) -> PathBuf {
        self.base_path
            .join(format!("{}.csv", category_key(category)))
    }

    fn open(&self, state: &mut WriterState, key: &str, category: Option<&str>) -> ScraperResult<()> {
        if let Some((_, mut previous)) = state.current.take() {
            previous.flush()?;
        }

        let path = self.path_for(category);
        let writer = if state.started.contains(key) {
            let file = OpenOptions::new().append(true).open(&path)?;
            csv::WriterBuilder::new().has_headers(false).from_writer(file)
        } else {
            info!("Writing category CSV: {}", path.display());
            state.started.insert(key.to_string());
            csv::Writer::from_writer(File::create(&path)?)
        };
        state.current = Some((key.to_string(), writer));
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for CsvStorage {
    fn name(&self) -> &str {
        "csv"
    }

    async fn store(&self, record: &ProductRecord) -> ScraperResult<()> {
        let key = category_key(record.category.as_deref());
        let mut state = self.state.lock();

        if state.current.as_ref().map(|(current, _)| current) != Some(&key) {
            self.open(&mut state, &key, record.category.as_deref())?;
        }

        if let Some((_, writer)) = state.current.as_mut() {
            writer.serialize(record)?;
            writer.flush()?;
        }
        Ok(())
    }

    async fn flush(&self) -> ScraperResult<()> {
        if let Some((_, writer)) = self.state.lock().current.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}
