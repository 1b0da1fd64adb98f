//! Category and listing traversal.
//!
//! Both operations borrow a [`Scraper`] rather than owning page state, so the
//! same fetcher can serve the walker, the product extractor and the image
//! store in turn.

use futures::stream::{self, Stream};
use log::{debug, warn};
use std::collections::{HashSet, VecDeque};
use url::Url;

use crate::parser::listing::{self, CategoryLink};
use crate::scrapers::{fetch_document, Scraper};
use crate::ScraperResult;

/// Every category on the root page except the aggregate first entry.
pub async fn list_categories(
    scraper: &dyn Scraper,
    root_url: &Url,
) -> ScraperResult<Vec<CategoryLink>> {
    let doc = fetch_document(scraper, root_url).await?;
    let categories = listing::categories(&doc);
    debug!("Found {} categories on {}", categories.len(), root_url);
    Ok(categories)
}

struct ListingState {
    pending: VecDeque<Url>,
    next_page: Option<Url>,
    visited_pages: HashSet<Url>,
}

/// Product URLs of one category, in listing order, fetched one listing page
/// at a time as the stream is polled. A listing page that cannot be fetched
/// is yielded as an error and ends the stream.
pub fn list_products<'a>(
    scraper: &'a dyn Scraper,
    category_url: Url,
) -> impl Stream<Item = ScraperResult<Url>> + 'a {
    let state = ListingState {
        pending: VecDeque::new(),
        next_page: Some(category_url),
        visited_pages: HashSet::new(),
    };

    stream::unfold(state, move |mut state| async move {
        loop {
            if let Some(url) = state.pending.pop_front() {
                return Some((Ok(url), state));
            }

            let page_url = state.next_page.take()?;
            if !state.visited_pages.insert(page_url.clone()) {
                warn!("Pagination loops back to {}, stopping", page_url);
                return None;
            }

            match fetch_listing_page(scraper, &page_url).await {
                Ok((products, next_page)) => {
                    debug!(
                        "Listing page {}: {} products, next={:?}",
                        page_url,
                        products.len(),
                        next_page.as_ref().map(Url::as_str)
                    );
                    state.pending.extend(products);
                    state.next_page = next_page;
                }
                Err(e) => return Some((Err(e), state)),
            }
        }
    })
}

async fn fetch_listing_page(
    scraper: &dyn Scraper,
    page_url: &Url,
) -> ScraperResult<(Vec<Url>, Option<Url>)> {
    let doc = fetch_document(scraper, page_url).await?;
    Ok((listing::product_links(&doc), listing::next_page(&doc)))
}
