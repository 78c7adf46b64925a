pub mod subscriptions;

pub use subscriptions::{load_subscriptions, read_subscriptions, MAX_LINE_LEN};

use crate::domain::{FeedData, FeedEntry, Item};

/// In-memory, ordered list of subscribed feeds.
///
/// Entries are fixed at startup; only their `feed` changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct FeedStore {
    entries: Vec<FeedEntry>,
}

impl FeedStore {
    pub fn new(entries: Vec<FeedEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FeedEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Items of the feed at `index`; empty while the feed is absent.
    pub fn items(&self, index: usize) -> &[Item] {
        self.get(index).map(FeedEntry::items).unwrap_or(&[])
    }

    /// Store a fetched feed, replacing any earlier one.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn set_feed(&mut self, index: usize, feed: FeedData) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.feed = Some(feed);
                true
            }
            None => false,
        }
    }

    /// `(index, url)` of every entry, for dispatching fetches.
    pub fn subscriptions(&self) -> Vec<(usize, String)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, entry.url.clone()))
            .collect()
    }
}
