use chrono::prelude::*;
use std::collections::HashMap;
use url::Url;

use crate::parser::Document;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: Url,
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub timestamp: DateTime<Utc>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text. Invalid UTF-8 is replaced rather than rejected so a
    /// broken page still reaches the parser.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn into_document(self) -> Document {
        let text = self.text();
        Document::parse(self.url, &text)
    }
}
