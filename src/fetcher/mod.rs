pub mod http_fetcher;
pub mod parallel;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::FeedData;

/// Retrieves and parses one feed.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<FeedData>;
}
