use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A parsed page together with the URL it was served from, so relative links
/// can be resolved without any extra state.
pub struct Document {
    url: Url,
    html: Html,
}

impl Document {
    /// Best-effort parse; html5ever recovers from any malformed input.
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    pub fn select_nth(&self, selector: &Selector, index: usize) -> Option<ElementRef<'_>> {
        self.html.select(selector).nth(index)
    }

    /// Every `href` under `selector`, resolved against this page's URL.
    /// Links that cannot be joined are dropped.
    pub fn links(&self, selector: &Selector) -> Vec<Url> {
        self.html
            .select(selector)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| self.url.join(href).ok())
            .collect()
    }
}

/// Concatenated text of an element, trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
