use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use url::Url;

use super::{FetchError, Fetcher, Page};

/// Fetcher that downloads live pages over HTTP.
///
/// The body summary is the document title; outbound links are the
/// same-host anchor targets, resolved to absolute URLs in document order.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Failed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Failed {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let html = response.text().await.map_err(|e| FetchError::Failed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(parse_page(&html, url))
    }
}

// Parsing happens after the response body has been fully read; scraper's
// document type is not Send and must not live across an await.
fn parse_page(html: &str, page_url: &str) -> Page {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("title").unwrap();
    let body = document
        .select(&title_selector)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| page_url.to_string());

    let base = match Url::parse(page_url) {
        Ok(base) => base,
        Err(_) => return Page { body, links: Vec::new() },
    };

    let link_selector = Selector::parse("a[href]").unwrap();
    let mut links = Vec::new();
    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(link) = resolve_link(&base, href) else {
            continue;
        };
        if !links.contains(&link) {
            links.push(link);
        }
    }

    Page { body, links }
}

// Resolves a possibly-relative href against the page URL, keeping only
// same-host http(s) targets.
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }
    if resolved.host_str() != base.host_str() {
        return None;
    }
    resolved.set_fragment(None);
    Some(resolved.to_string())
}
