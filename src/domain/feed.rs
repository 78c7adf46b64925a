use crate::domain::Item;

/// A parsed feed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedData {
    pub title: String,
    pub items: Vec<Item>,
}

/// One subscription line and, once fetched, its feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub url: String,
    pub feed: Option<FeedData>,
}

impl FeedEntry {
    pub fn new(url: String) -> Self {
        Self { url, feed: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.feed.is_some()
    }

    /// Feed title, or the raw URL while the feed is absent or untitled.
    pub fn display_title(&self) -> &str {
        match &self.feed {
            Some(feed) if !feed.title.is_empty() => &feed.title,
            _ => &self.url,
        }
    }

    pub fn items(&self) -> &[Item] {
        self.feed
            .as_ref()
            .map(|feed| feed.items.as_slice())
            .unwrap_or(&[])
    }
}
