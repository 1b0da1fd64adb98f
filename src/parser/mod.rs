pub mod document;
pub mod listing;
pub mod product;
pub mod selectors;
pub mod text;

pub use document::Document;
pub use text::clean_filename;
