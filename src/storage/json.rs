use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::base::{category_key, StorageBackend};
use crate::record::ProductRecord;
use crate::ScraperResult;

/// JSON Lines twin of the CSV export: `<category>.jsonl`, one object per
/// record, missing fields as `null`. Only the current category's file is open.
pub struct JsonLinesStorage {
    base_path: PathBuf,
    state: Mutex<FileState>,
}

#[derive(Default)]
struct FileState {
    current: Option<(String, BufWriter<File>)>,
    started: HashSet<String>,
}

impl JsonLinesStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> ScraperResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            state: Mutex::new(FileState::default()),
        })
    }

    pub fn path_for(&self, category: Option<&str>) -> PathBuf {
        self.base_path
            .join(format!("{}.jsonl", category_key(category)))
    }
}

#[async_trait]
impl StorageBackend for JsonLinesStorage {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn store(&self, record: &ProductRecord) -> ScraperResult<()> {
        let key = category_key(record.category.as_deref());
        let mut state = self.state.lock();

        if state.current.as_ref().map(|(current, _)| current) != Some(&key) {
            if let Some((_, mut previous)) = state.current.take() {
                previous.flush()?;
            }
            let path = self.path_for(record.category.as_deref());
            let file = if state.started.insert(key.clone()) {
                File::create(path)?
            } else {
                OpenOptions::new().append(true).open(path)?
            };
            state.current = Some((key, BufWriter::new(file)));
        }

        if let Some((_, file)) = state.current.as_mut() {
            serde_json::to_writer(&mut *file, record)?;
            file.write_all(b"\n")?;
        }
        Ok(())
    }

    async fn flush(&self) -> ScraperResult<()> {
        if let Some((_, file)) = self.state.lock().current.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}
