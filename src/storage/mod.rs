pub mod base;
pub mod csv;
pub mod images;
pub mod json;
pub mod manager;

pub use self::csv::CsvStorage;
pub use base::{category_key, StorageBackend, UNCATEGORIZED};
pub use images::ImageStore;
pub use json::JsonLinesStorage;
pub use manager::StorageManager;
