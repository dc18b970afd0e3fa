use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::fetcher::{FetchError, Fetcher};
use crate::visited::VisitedSet;

/// One unit of crawl output: either a fetched page summary or the failure
/// that ended a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    Found { url: String, body: String },
    Failed(FetchError),
}

impl fmt::Display for CrawlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlEvent::Found { url, body } => write!(f, "found: {} {:?}", url, body),
            CrawlEvent::Failed(err) => write!(f, "{}", err),
        }
    }
}

/// Ordered stream of result lines for one crawl run. Closes once every
/// branch has finished.
pub type CrawlStream = UnboundedReceiverStream<CrawlEvent>;

/// Starts a crawl at `start_url` with a budget of `max_depth` link hops.
///
/// Each reachable URL is fetched at most once across all branches. A
/// budget of zero yields an immediately-closed empty stream. The stream
/// order is the tree's launch order: every branch's own line precedes the
/// lines forwarded from its children, and children appear in the order
/// their links appeared on the page.
pub fn crawl(start_url: &str, max_depth: usize, fetcher: Arc<dyn Fetcher>) -> CrawlStream {
    let (tx, rx) = mpsc::unbounded_channel();
    if max_depth == 0 {
        return UnboundedReceiverStream::new(rx);
    }

    let visited = Arc::new(VisitedSet::new());
    // The set is fresh, so the root claim always wins.
    visited.try_claim(start_url);

    let root = crawl_branch(start_url.to_string(), max_depth, fetcher, Arc::clone(&visited), tx);
    tokio::spawn(async move {
        root.await;
        tracing::debug!("Crawl tree finished: {} URLs claimed", visited.len());
    });

    UnboundedReceiverStream::new(rx)
}

// One branch of the crawl tree. Runs only for URLs already claimed on its
// behalf, with depth >= 1. Boxed because the future recurses through
// tokio::spawn.
fn crawl_branch(
    url: String,
    depth: usize,
    fetcher: Arc<dyn Fetcher>,
    visited: Arc<VisitedSet>,
    tx: mpsc::UnboundedSender<CrawlEvent>,
) -> BoxFuture<'static, ()> {
    async move {
        let page = match fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(err) => {
                // A failed fetch ends this branch only; the URL stays
                // claimed, so no sibling retries it.
                tracing::warn!("Fetch failed for {}: {}", url, err);
                let _ = tx.send(CrawlEvent::Failed(err));
                return;
            }
        };
        let _ = tx.send(CrawlEvent::Found { url, body: page.body });

        if depth <= 1 {
            return;
        }

        // Fan-out: one task per newly claimed link, each with its own
        // channel. Links that lost their claim to another branch get no
        // slot at all.
        let mut children = Vec::new();
        for link in page.links {
            if !visited.try_claim(&link) {
                tracing::debug!("Already claimed, skipping: {}", link);
                continue;
            }
            let (child_tx, child_rx) = mpsc::unbounded_channel();
            let handle = tokio::spawn(crawl_branch(
                link,
                depth - 1,
                Arc::clone(&fetcher),
                Arc::clone(&visited),
                child_tx,
            ));
            children.push((handle, child_rx));
        }

        // Fan-in: forward every child's lines in launch order, not
        // completion order. Draining blocks on each child until its whole
        // subtree is done.
        for (handle, mut child_rx) in children {
            while let Some(event) = child_rx.recv().await {
                let _ = tx.send(event);
            }
            let _ = handle.await;
        }
    }
    .boxed()
}
