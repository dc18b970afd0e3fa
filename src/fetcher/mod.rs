mod canned;
mod http;

pub use canned::CannedFetcher;
pub use http::HttpFetcher;

use async_trait::async_trait;
use thiserror::Error;

/// A page as the crawler sees it: a content summary and the outbound links
/// found on it, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub body: String,
    pub links: Vec<String>,
}

/// Why a fetch produced no page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No content exists for the URL.
    #[error("not found: {0}")]
    NotFound(String),
    /// The request was attempted but could not be completed.
    #[error("fetch failed for {url}: {reason}")]
    Failed { url: String, reason: String },
}

/// Page-fetching capability injected into the crawler.
///
/// Implementations decide what the body summary is and which outbound
/// links to report; the crawler only relies on the link order being stable
/// for identical input.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError>;
}
