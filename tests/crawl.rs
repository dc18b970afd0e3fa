use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;

use crawl_cli::{CannedFetcher, CrawlEvent, FetchError, Fetcher, Page, crawl};

/// Wrapper that counts fetch attempts per URL, to pin down the
/// fetched-at-most-once guarantee.
struct CountingFetcher {
    inner: CannedFetcher,
    hits: Mutex<HashMap<String, usize>>,
}

impl CountingFetcher {
    fn new(inner: CannedFetcher) -> Self {
        Self { inner, hits: Mutex::new(HashMap::new()) }
    }

    fn hits_for(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    fn max_hits(&self) -> usize {
        self.hits.lock().unwrap().values().copied().max().unwrap_or(0)
    }
}

#[async_trait]
impl Fetcher for CountingFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        *self.hits.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
        self.inner.fetch(url).await
    }
}

// a links to b and c; b links back to a; c has no entry and fails.
fn linked_site() -> CannedFetcher {
    let mut fetcher = CannedFetcher::new();
    fetcher.insert(
        "https://site.test/a",
        "Page A",
        &["https://site.test/b", "https://site.test/c"],
    );
    fetcher.insert("https://site.test/b", "Page B", &["https://site.test/a"]);
    fetcher
}

fn found(url: &str, body: &str) -> CrawlEvent {
    CrawlEvent::Found { url: url.to_string(), body: body.to_string() }
}

#[tokio::test]
async fn depth_zero_yields_an_empty_closed_stream() {
    let events = crawl("https://site.test/a", 0, Arc::new(linked_site()))
        .collect::<Vec<_>>()
        .await;
    assert!(events.is_empty());
}

#[tokio::test]
async fn depth_one_fetches_only_the_start_page() {
    let events = crawl("https://site.test/a", 1, Arc::new(linked_site()))
        .collect::<Vec<_>>()
        .await;
    assert_eq!(events, vec![found("https://site.test/a", "Page A")]);
}

#[tokio::test]
async fn failing_start_url_reports_exactly_one_line() {
    let events = crawl("https://site.test/missing", 3, Arc::new(linked_site()))
        .collect::<Vec<_>>()
        .await;
    assert_eq!(
        events,
        vec![CrawlEvent::Failed(FetchError::NotFound(
            "https://site.test/missing".to_string()
        ))]
    );
}

#[tokio::test]
async fn depth_two_merges_children_in_launch_order() {
    // a's own line first, then b's branch (its backlink to a is already
    // claimed and produces nothing), then c's failure.
    let events = crawl("https://site.test/a", 2, Arc::new(linked_site()))
        .collect::<Vec<_>>()
        .await;
    assert_eq!(
        events,
        vec![
            found("https://site.test/a", "Page A"),
            found("https://site.test/b", "Page B"),
            CrawlEvent::Failed(FetchError::NotFound("https://site.test/c".to_string())),
        ]
    );
}

#[tokio::test]
async fn backlink_does_not_refetch_the_start_page() {
    let fetcher = Arc::new(CountingFetcher::new(linked_site()));
    let events = crawl("https://site.test/a", 2, Arc::clone(&fetcher) as Arc<dyn Fetcher>)
        .collect::<Vec<_>>()
        .await;

    assert_eq!(events.len(), 3);
    assert_eq!(fetcher.hits_for("https://site.test/a"), 1);
    assert_eq!(fetcher.hits_for("https://site.test/b"), 1);
    assert_eq!(fetcher.hits_for("https://site.test/c"), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn each_url_is_fetched_at_most_once_under_parallelism() {
    let fetcher = Arc::new(CountingFetcher::new(CannedFetcher::sample_site()));
    let events = crawl("https://example.com/", 5, Arc::clone(&fetcher) as Arc<dyn Fetcher>)
        .collect::<Vec<_>>()
        .await;

    // Five real pages plus the one dead link, each attempted exactly once.
    assert_eq!(fetcher.max_hits(), 1);
    assert_eq!(events.len(), 6);
    let failures = events
        .iter()
        .filter(|event| matches!(event, CrawlEvent::Failed(_)))
        .count();
    assert_eq!(failures, 1);
}

#[tokio::test]
async fn reruns_produce_identical_order() {
    let first = crawl("https://example.com/", 4, Arc::new(CannedFetcher::sample_site()))
        .collect::<Vec<_>>()
        .await;
    let second = crawl("https://example.com/", 4, Arc::new(CannedFetcher::sample_site()))
        .collect::<Vec<_>>()
        .await;

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[tokio::test]
async fn duplicate_links_on_one_page_spawn_a_single_branch() {
    let mut site = CannedFetcher::new();
    site.insert(
        "https://site.test/",
        "Home",
        &["https://site.test/page", "https://site.test/page"],
    );
    site.insert("https://site.test/page", "Page", &[]);

    let fetcher = Arc::new(CountingFetcher::new(site));
    let events = crawl("https://site.test/", 2, Arc::clone(&fetcher) as Arc<dyn Fetcher>)
        .collect::<Vec<_>>()
        .await;

    assert_eq!(
        events,
        vec![found("https://site.test/", "Home"), found("https://site.test/page", "Page")]
    );
    assert_eq!(fetcher.hits_for("https://site.test/page"), 1);
}

#[tokio::test]
async fn failed_fetches_are_not_retried_by_later_branches() {
    let mut site = CannedFetcher::new();
    site.insert(
        "https://site.test/",
        "Home",
        &["https://site.test/p1", "https://site.test/p2"],
    );
    site.insert("https://site.test/p1", "P1", &["https://site.test/dead"]);
    site.insert("https://site.test/p2", "P2", &["https://site.test/dead"]);

    let fetcher = Arc::new(CountingFetcher::new(site));
    let events = crawl("https://site.test/", 3, Arc::clone(&fetcher) as Arc<dyn Fetcher>)
        .collect::<Vec<_>>()
        .await;

    let failures = events
        .iter()
        .filter(|event| matches!(event, CrawlEvent::Failed(_)))
        .count();
    assert_eq!(failures, 1);
    assert_eq!(fetcher.hits_for("https://site.test/dead"), 1);
}

#[tokio::test]
async fn branch_failures_do_not_stop_siblings() {
    let mut site = CannedFetcher::new();
    site.insert(
        "https://site.test/",
        "Home",
        &[
            "https://site.test/dead",
            "https://site.test/alive",
        ],
    );
    site.insert("https://site.test/alive", "Alive", &[]);

    let events = crawl("https://site.test/", 3, Arc::new(site))
        .collect::<Vec<_>>()
        .await;
    assert_eq!(
        events,
        vec![
            found("https://site.test/", "Home"),
            CrawlEvent::Failed(FetchError::NotFound("https://site.test/dead".to_string())),
            found("https://site.test/alive", "Alive"),
        ]
    );
}
