//! A saved chat page: the parsed document plus the URL it came from.

use scraper::{Html, Selector};
use url::Url;

/// A parsed page handed to detection and extraction.
///
/// URL parsing failure is not an error; a page without a recognizable host
/// simply cannot satisfy host-based detection.
pub struct Page {
    document: Html,
    url: String,
    host: Option<String>,
}

impl Page {
    pub fn parse(html: &str, url: impl Into<String>) -> Self {
        let url = url.into();
        let host = Url::parse(&url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned));
        Self {
            document: Html::parse_document(html),
            url,
            host,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.document.select(selector)
    }

    pub fn has_match(&self, selector: &Selector) -> bool {
        self.document.select(selector).next().is_some()
    }
}
