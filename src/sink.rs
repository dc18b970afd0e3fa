use futures::{Stream, StreamExt};

use crate::crawler::CrawlEvent;

/// Drains a crawl's output stream to stdout, one rendered line per event,
/// and returns the number of lines written. Diagnostics stay on tracing;
/// the rendered lines are the product.
pub async fn render<S>(mut stream: S) -> usize
where
    S: Stream<Item = CrawlEvent> + Unpin,
{
    let mut lines = 0;
    while let Some(event) = stream.next().await {
        println!("{event}");
        lines += 1;
    }
    lines
}
