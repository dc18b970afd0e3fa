use std::collections::HashSet;
use std::sync::Mutex;

/// Set of URLs already claimed for fetching, shared by every branch of a
/// crawl run.
///
/// The membership check and the insert happen as one step under the lock,
/// so exactly one caller ever wins a given URL. Entries are never removed;
/// the set lives as long as the run.
#[derive(Debug, Default)]
pub struct VisitedSet {
    claimed: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically marks `url` visited. Returns true when this caller made
    /// the claim and now owns the right to fetch it, false when an earlier
    /// caller already did. A claim cannot be released.
    pub fn try_claim(&self, url: &str) -> bool {
        let mut claimed = self.claimed.lock().unwrap();
        if claimed.contains(url) {
            return false;
        }
        claimed.insert(url.to_string());
        true
    }

    /// Number of URLs claimed so far.
    pub fn len(&self) -> usize {
        self.claimed.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
