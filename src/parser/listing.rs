use url::Url;

use super::document::{element_text, Document};
use super::selectors::listing;

/// One entry of the root page's category navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    pub name: String,
    pub url: Url,
}

/// Categories linked from the root page's side navigation, minus the leading
/// aggregate entry.
pub fn categories(doc: &Document) -> Vec<CategoryLink> {
    doc.html()
        .select(&listing::CATEGORY_LINK)
        .skip(1)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let url = doc.url().join(href).ok()?;
            Some(CategoryLink {
                name: element_text(element),
                url,
            })
        })
        .collect()
}

/// Product pages listed on one listing page, resolved against that page.
pub fn product_links(doc: &Document) -> Vec<Url> {
    doc.links(&listing::PRODUCT_LINK)
}

/// The "next" pagination target, resolved against the current page.
pub fn next_page(doc: &Document) -> Option<Url> {
    doc.links(&listing::NEXT_PAGE).into_iter().next()
}
