//! CSS selectors for the catalogue's page layout.
//!
//! Listing and product pages share the same theme, so every structural
//! assumption the extractors make lives here.

use scraper::Selector;
use std::sync::LazyLock;

fn parse(css: &str) -> Selector {
    Selector::parse(css).expect("hardcoded selector is valid")
}

/// Selectors for the root page and category listing pages.
pub mod listing {
    use super::*;

    /// Side navigation; the first link is the aggregate "Books" entry.
    pub static CATEGORY_LINK: LazyLock<Selector> = LazyLock::new(|| parse("ul.nav-list li a"));

    pub static PRODUCT_LINK: LazyLock<Selector> =
        LazyLock::new(|| parse("article.product_pod h3 a"));

    pub static NEXT_PAGE: LazyLock<Selector> = LazyLock::new(|| parse("li.next a"));
}

/// Selectors for a single product page.
pub mod product {
    use super::*;

    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| parse("h1"));

    /// Rows of the product information table: UPC, type, price excl. tax,
    /// price incl. tax, tax, availability, reviews.
    pub static TABLE_ROW: LazyLock<Selector> = LazyLock::new(|| parse("tr"));

    pub static TABLE_CELL: LazyLock<Selector> = LazyLock::new(|| parse("td"));

    pub static AVAILABILITY: LazyLock<Selector> =
        LazyLock::new(|| parse("p.instock.availability"));

    pub static STAR_RATING: LazyLock<Selector> = LazyLock::new(|| parse("p.star-rating"));

    pub static BREADCRUMB_LINK: LazyLock<Selector> = LazyLock::new(|| parse("ul.breadcrumb a"));

    pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| parse("img"));

    pub static DESCRIPTION: LazyLock<Selector> =
        LazyLock::new(|| parse("#product_description ~ p"));
}

pub const UPC_ROW: usize = 0;
pub const PRICE_EXCL_TAX_ROW: usize = 2;
pub const PRICE_INCL_TAX_ROW: usize = 3;
pub const CATEGORY_CRUMB: usize = 2;
