//! Bounded-depth concurrent web crawler.
//!
//! Given a start URL, a [`Fetcher`] capability and a depth budget, the
//! crawler visits reachable pages, fetches each URL at most once, and
//! reports one result line per attempted page on an ordered stream.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crawl_cli::{crawl, sink, CannedFetcher};
//!
//! let fetcher = Arc::new(CannedFetcher::sample_site());
//! let stream = crawl("https://example.com/", 4, fetcher);
//! let lines = sink::render(stream).await;
//! ```

pub mod config;
pub mod crawler;
pub mod fetcher;
pub mod sink;
pub mod visited;

pub use config::{ConfigLoader, CrawlConfig};
pub use crawler::{CrawlEvent, CrawlStream, crawl};
pub use fetcher::{CannedFetcher, FetchError, Fetcher, HttpFetcher, Page};
pub use visited::VisitedSet;
