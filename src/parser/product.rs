//! Field extractors for a product page.
//!
//! Each function reads one field from a parsed page and never panics; the
//! record builder decides what a failure turns into.

use url::Url;

use super::document::{element_text, Document};
use super::selectors::{self, product};
use super::text::normalize_description;
use crate::core::{FieldError, FieldResult};

const RATING_WORDS: [(&str, u8); 5] = [("One", 1), ("Two", 2), ("Three", 3), ("Four", 4), ("Five", 5)];

pub fn title(doc: &Document) -> FieldResult<String> {
    let element = doc
        .select_first(&product::TITLE)
        .ok_or(FieldError::Missing("h1"))?;
    non_empty(element_text(element), "h1").map(|title| title.to_lowercase())
}

pub fn universal_code(doc: &Document) -> FieldResult<String> {
    table_cell(doc, selectors::UPC_ROW)
}

pub fn price_excluding_tax(doc: &Document) -> FieldResult<f64> {
    parse_price(&table_cell(doc, selectors::PRICE_EXCL_TAX_ROW)?)
}

pub fn price_including_tax(doc: &Document) -> FieldResult<f64> {
    parse_price(&table_cell(doc, selectors::PRICE_INCL_TAX_ROW)?)
}

pub fn availability_count(doc: &Document) -> FieldResult<u32> {
    let element = doc
        .select_first(&product::AVAILABILITY)
        .ok_or(FieldError::Missing("p.instock.availability"))?;
    parse_availability(&element.text().collect::<String>())
}

/// A missing element is an error; a present element with an unknown word is
/// rated 0.
pub fn rating(doc: &Document) -> FieldResult<u8> {
    let element = doc
        .select_first(&product::STAR_RATING)
        .ok_or(FieldError::Missing("p.star-rating"))?;
    let word = element
        .value()
        .attr("class")
        .and_then(|classes| classes.split_whitespace().nth(1))
        .ok_or(FieldError::Missing("p.star-rating word"))?;
    Ok(rating_from_word(word))
}

pub fn category(doc: &Document) -> FieldResult<String> {
    let element = doc
        .select_nth(&product::BREADCRUMB_LINK, selectors::CATEGORY_CRUMB)
        .ok_or(FieldError::Missing("ul.breadcrumb a"))?;
    non_empty(element_text(element), "ul.breadcrumb a")
}

/// Cover image URL. The `src` climbs out of the product directory with
/// `../`, so it is rebuilt from `site_root` instead of the page URL.
pub fn image_url(doc: &Document, site_root: &Url) -> FieldResult<Url> {
    let src = doc
        .select_first(&product::IMAGE)
        .and_then(|element| element.value().attr("src"))
        .ok_or(FieldError::Missing("img[src]"))?;
    resolve_from_root(site_root, src)
}

pub fn description(doc: &Document) -> FieldResult<String> {
    let element = doc
        .select_first(&product::DESCRIPTION)
        .ok_or(FieldError::Missing("#product_description ~ p"))?;
    non_empty(
        normalize_description(&element.text().collect::<String>()),
        "#product_description ~ p",
    )
}

fn table_cell(doc: &Document, row: usize) -> FieldResult<String> {
    doc.select_nth(&product::TABLE_ROW, row)
        .and_then(|tr| tr.select(&product::TABLE_CELL).next())
        .map(element_text)
        .ok_or(FieldError::Missing("tr td"))
        .and_then(|text| non_empty(text, "tr td"))
}

/// Blank text counts as missing, so a field is either text or `None`.
fn non_empty(text: String, field: &'static str) -> FieldResult<String> {
    if text.is_empty() {
        Err(FieldError::Missing(field))
    } else {
        Ok(text)
    }
}

/// Drops exactly one leading character (the currency glyph) and parses the
/// rest.
pub fn parse_price(text: &str) -> FieldResult<f64> {
    let mut chars = text.trim().chars();
    chars.next();
    let amount = chars.as_str();
    amount
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FieldError::conversion(text, "not a decimal amount"))
}

/// Parses `In stock (N available)` into `N`.
pub fn parse_availability(text: &str) -> FieldResult<u32> {
    let count = text
        .replace("In stock", "")
        .replace(&['(', ')'][..], "")
        .replace("available", "");
    count
        .trim()
        .parse::<u32>()
        .map_err(|e| FieldError::conversion(text, e))
}

pub fn rating_from_word(word: &str) -> u8 {
    RATING_WORDS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, value)| *value)
        .unwrap_or(0)
}

fn resolve_from_root(site_root: &Url, src: &str) -> FieldResult<Url> {
    let path = src.replace("../", "");
    site_root
        .join(path.trim_start_matches('/'))
        .map_err(|e| FieldError::conversion(src, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_URL: &str =
        "https://books.toscrape.com/catalogue/a-light-in-the-attic_1000/index.html";

    const PRODUCT_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<ul class="breadcrumb">
  <li><a href="../../index.html">Home</a></li>
  <li><a href="../category/books_1/index.html">Books</a></li>
  <li><a href="../category/books/poetry_23/index.html">Poetry</a></li>
  <li class="active">A Light in the Attic</li>
</ul>
<div class="row">
  <div class="item active"><img src="../../media/cache/fe/72/fe72.jpg" alt="A Light in the Attic" /></div>
  <div class="col-sm-6 product_main">
    <h1>A Light in the Attic</h1>
    <p class="price_color">£51.77</p>
    <p class="instock availability">
        <i class="icon-ok"></i>
        In stock (22 available)
    </p>
    <p class="star-rating Three">
        <i class="icon-star"></i>
    </p>
  </div>
</div>
<div id="product_description" class="sub-header"><h2>Product Description</h2></div>
<p>It's hard to imagine a world without &amp;amp; A Light in the Attic. This now-classic / collection ...more</p>
<table class="table table-striped">
  <tr><th>UPC</th><td>a897fe39b1053632</td></tr>
  <tr><th>Product Type</th><td>Books</td></tr>
  <tr><th>Price (excl. tax)</th><td>£51.77</td></tr>
  <tr><th>Price (incl. tax)</th><td>£53.00</td></tr>
  <tr><th>Tax</th><td>£1.23</td></tr>
  <tr><th>Availability</th><td>In stock (22 available)</td></tr>
  <tr><th>Number of reviews</th><td>0</td></tr>
</table>
</body></html>"#;

    fn page(body: &str) -> Document {
        Document::parse(Url::parse(PRODUCT_URL).unwrap(), body)
    }

    fn site_root() -> Url {
        Url::parse("https://books.toscrape.com/").unwrap()
    }

    #[test]
    fn test_full_product_page() {
        let doc = page(PRODUCT_PAGE);

        assert_eq!(title(&doc).unwrap(), "a light in the attic");
        assert_eq!(universal_code(&doc).unwrap(), "a897fe39b1053632");
        assert_eq!(price_excluding_tax(&doc).unwrap(), 51.77);
        assert_eq!(price_including_tax(&doc).unwrap(), 53.0);
        assert_eq!(availability_count(&doc).unwrap(), 22);
        assert_eq!(rating(&doc).unwrap(), 3);
        assert_eq!(category(&doc).unwrap(), "Poetry");
        assert_eq!(
            image_url(&doc, &site_root()).unwrap().as_str(),
            "https://books.toscrape.com/media/cache/fe/72/fe72.jpg"
        );
        assert_eq!(
            description(&doc).unwrap(),
            "It's hard to imagine a world without & A Light in the Attic. This now-classic collection ...more"
        );
    }

    #[test]
    fn test_empty_page_fails_every_field() {
        let doc = page("<html><body><p>nothing here</p></body></html>");

        assert_eq!(title(&doc), Err(FieldError::Missing("h1")));
        assert!(universal_code(&doc).is_err());
        assert!(price_excluding_tax(&doc).is_err());
        assert!(price_including_tax(&doc).is_err());
        assert!(availability_count(&doc).is_err());
        assert!(rating(&doc).is_err());
        assert!(category(&doc).is_err());
        assert!(image_url(&doc, &site_root()).is_err());
        assert!(description(&doc).is_err());
    }

    #[test]
    fn test_availability_shapes() {
        assert_eq!(parse_availability("In stock (22 available)"), Ok(22));
        assert_eq!(parse_availability("\n   In stock (1 available)\n  "), Ok(1));
        assert_eq!(parse_availability("In stock (0 available)"), Ok(0));
        assert!(parse_availability("Out of stock").is_err());
        assert!(parse_availability("In stock").is_err());
        assert!(parse_availability("In stock (many available)").is_err());
        assert!(parse_availability("In stock (-3 available)").is_err());
    }

    #[test]
    fn test_rating_words() {
        for (word, expected) in [("One", 1), ("Two", 2), ("Three", 3), ("Four", 4), ("Five", 5)] {
            let doc = page(&format!(r#"<p class="star-rating {}"></p>"#, word));
            assert_eq!(rating(&doc), Ok(expected), "word {}", word);
        }
    }

    #[test]
    fn test_rating_unknown_word_is_zero() {
        let doc = page(r#"<p class="star-rating Zero"></p>"#);
        assert_eq!(rating(&doc), Ok(0));

        let doc = page(r#"<p class="star-rating five"></p>"#);
        assert_eq!(rating(&doc), Ok(0));
    }

    #[test]
    fn test_rating_absent_is_error() {
        let doc = page(r#"<p class="price_color">£10.00</p>"#);
        assert_eq!(rating(&doc), Err(FieldError::Missing("p.star-rating")));

        let doc = page(r#"<p class="star-rating"></p>"#);
        assert!(rating(&doc).is_err());
    }

    #[test]
    fn test_price_conversion() {
        assert_eq!(parse_price("£51.77"), Ok(51.77));
        assert_eq!(parse_price("$0.99"), Ok(0.99));
        assert_eq!(parse_price(" £10 "), Ok(10.0));
        assert!(parse_price("N/A").is_err());
        assert!(parse_price("").is_err());
        assert!(parse_price("£").is_err());
        // Only one glyph is dropped.
        assert!(parse_price("££1.00").is_err());
    }

    #[test]
    fn test_category_is_third_crumb() {
        let doc = page(
            r#"<ul class="breadcrumb">
                 <li><a href="/">Home</a></li>
                 <li><a href="/fiction">Fiction</a></li>
                 <li><a href="/short">Short Stories</a></li>
                 <li class="active">Some Book</li>
               </ul>"#,
        );
        assert_eq!(category(&doc).unwrap(), "Short Stories");
    }

    #[test]
    fn test_category_short_breadcrumb() {
        let doc = page(r#"<ul class="breadcrumb"><li><a href="/">Home</a></li><li><a href="/b">Books</a></li></ul>"#);
        assert!(category(&doc).is_err());
    }

    #[test]
    fn test_image_url_resolves_against_site_root() {
        let doc = page(r#"<img src="../../media/cache/x.jpg">"#);
        assert_eq!(
            image_url(&doc, &site_root()).unwrap().as_str(),
            "https://books.toscrape.com/media/cache/x.jpg"
        );

        let nested_root = Url::parse("http://localhost:8080/shop/").unwrap();
        assert_eq!(
            image_url(&doc, &nested_root).unwrap().as_str(),
            "http://localhost:8080/shop/media/cache/x.jpg"
        );
    }

    #[test]
    fn test_image_without_src() {
        let doc = page(r#"<img alt="cover">"#);
        assert_eq!(
            image_url(&doc, &site_root()),
            Err(FieldError::Missing("img[src]"))
        );
    }

    #[test]
    fn test_title_is_lowercased() {
        let doc = page("<h1>  A Light in the Attic </h1>");
        assert_eq!(title(&doc).unwrap(), "a light in the attic");
    }

    #[test]
    fn test_blank_text_is_missing() {
        let doc = page(
            r#"<h1>  </h1>
<ul class="breadcrumb"><li><a>Home</a></li><li><a>Books</a></li><li><a> </a></li></ul>
<div id="product_description"></div><p>   </p>
<table><tr><td> </td></tr></table>"#,
        );

        assert_eq!(title(&doc), Err(FieldError::Missing("h1")));
        assert_eq!(category(&doc), Err(FieldError::Missing("ul.breadcrumb a")));
        assert_eq!(
            description(&doc),
            Err(FieldError::Missing("#product_description ~ p"))
        );
        assert_eq!(universal_code(&doc), Err(FieldError::Missing("tr td")));
    }
}
