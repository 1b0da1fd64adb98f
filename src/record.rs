use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::FieldResult;
use crate::parser::{product, Document};

/// One scraped product page. Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub source_url: String,
    pub title: Option<String>,
    pub universal_code: Option<String>,
    pub price_including_tax: Option<f64>,
    pub price_excluding_tax: Option<f64>,
    pub availability_count: Option<u32>,
    pub rating: Option<u8>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl ProductRecord {
    /// Runs every field extractor on `doc`. A failed field is logged and left
    /// empty; it never affects the other fields.
    pub fn from_document(source_url: &Url, doc: &Document, site_root: &Url) -> Self {
        Self {
            source_url: source_url.to_string(),
            title: field(source_url, "title", product::title(doc)),
            universal_code: field(source_url, "universal_code", product::universal_code(doc)),
            price_including_tax: field(
                source_url,
                "price_including_tax",
                product::price_including_tax(doc),
            ),
            price_excluding_tax: field(
                source_url,
                "price_excluding_tax",
                product::price_excluding_tax(doc),
            ),
            availability_count: field(
                source_url,
                "availability_count",
                product::availability_count(doc),
            ),
            rating: field(source_url, "rating", product::rating(doc)),
            category: field(source_url, "category", product::category(doc)),
            image_url: field(
                source_url,
                "image_url",
                product::image_url(doc, site_root).map(String::from),
            ),
            description: field(source_url, "description", product::description(doc)),
        }
    }
}

fn field<T>(url: &Url, name: &str, result: FieldResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("{}: no {} ({})", url, name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_root() -> Url {
        Url::parse("https://books.toscrape.com/").unwrap()
    }

    #[test]
    fn test_partial_page_still_builds_a_record() {
        let url = Url::parse("https://books.toscrape.com/catalogue/odd_1/index.html").unwrap();
        let doc = Document::parse(
            url.clone(),
            r#"<html><body>
                 <h1>Odd Book</h1>
                 <p class="star-rating Eleven"></p>
                 <table><tr><th>UPC</th><td>abc123</td></tr>
                        <tr><th>Type</th><td>Books</td></tr>
                        <tr><th>Excl</th><td>N/A</td></tr></table>
               </body></html>"#,
        );

        let record = ProductRecord::from_document(&url, &doc, &site_root());

        assert_eq!(
            record,
            ProductRecord {
                source_url: url.to_string(),
                title: Some("odd book".to_string()),
                universal_code: Some("abc123".to_string()),
                price_including_tax: None,
                price_excluding_tax: None,
                availability_count: None,
                rating: Some(0),
                category: None,
                image_url: None,
                description: None,
            }
        );
    }

    #[test]
    fn test_blank_page_yields_only_the_url() {
        let url = Url::parse("https://books.toscrape.com/catalogue/blank/index.html").unwrap();
        let doc = Document::parse(url.clone(), "");

        let record = ProductRecord::from_document(&url, &doc, &site_root());

        assert_eq!(record.source_url, url.as_str());
        assert!(record.title.is_none());
        assert!(record.rating.is_none());
        assert!(record.image_url.is_none());
    }
}
