use std::collections::HashMap;

use async_trait::async_trait;

use super::{FetchError, Fetcher, Page};

/// Fetcher backed by canned pages, for tests and offline runs. URLs with
/// no entry fail with [`FetchError::NotFound`].
#[derive(Debug, Default)]
pub struct CannedFetcher {
    pages: HashMap<String, Page>,
}

impl CannedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page under `url`.
    pub fn insert(&mut self, url: &str, body: &str, links: &[&str]) {
        self.pages.insert(
            url.to_string(),
            Page {
                body: body.to_string(),
                links: links.iter().map(|link| link.to_string()).collect(),
            },
        );
    }

    /// Small site with a link cycle and one dead link, enough to exercise
    /// dedup, fan-in ordering and failure reporting.
    pub fn sample_site() -> Self {
        let mut fetcher = Self::new();
        fetcher.insert(
            "https://example.com/",
            "Example Domain",
            &["https://example.com/docs/", "https://example.com/blog/"],
        );
        fetcher.insert(
            "https://example.com/docs/",
            "Documentation",
            &[
                "https://example.com/",
                "https://example.com/blog/",
                "https://example.com/docs/api/",
                "https://example.com/docs/guide/",
            ],
        );
        fetcher.insert(
            "https://example.com/docs/api/",
            "API Reference",
            &["https://example.com/", "https://example.com/docs/"],
        );
        fetcher.insert(
            "https://example.com/docs/guide/",
            "User Guide",
            &["https://example.com/", "https://example.com/docs/"],
        );
        fetcher.insert(
            "https://example.com/blog/",
            "Blog",
            &["https://example.com/", "https://example.com/missing/"],
        );
        fetcher
    }
}

#[async_trait]
impl Fetcher for CannedFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}
