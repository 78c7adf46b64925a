use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;

use crate::domain::FeedData;
use crate::fetcher::Fetcher;

pub const DEFAULT_WORKERS: usize = 10;

/// A fetched feed, addressed by its position in the feed store.
#[derive(Debug)]
pub struct FetchCompletion {
    pub index: usize,
    pub feed: FeedData,
}

/// Spawns one task per feed and reports successes on a channel.
///
/// At most `workers` requests are in flight at once. Failed fetches are
/// logged and produce no message, so the entry keeps what it showed before.
#[derive(Clone)]
pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
    runtime: Handle,
    completions: mpsc::UnboundedSender<FetchCompletion>,
}

impl ParallelFetcher {
    /// Must be called from within a tokio runtime; tasks are spawned onto it.
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        completions: mpsc::UnboundedSender<FetchCompletion>,
    ) -> Self {
        Self::with_workers(fetcher, completions, DEFAULT_WORKERS)
    }

    pub fn with_workers(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        completions: mpsc::UnboundedSender<FetchCompletion>,
        workers: usize,
    ) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
            runtime: Handle::current(),
            completions,
        }
    }

    /// Start a fetch for every `(index, url)` pair without waiting for any.
    pub fn spawn_all(&self, subscriptions: Vec<(usize, String)>) -> Vec<JoinHandle<()>> {
        subscriptions
            .into_iter()
            .map(|(index, url)| self.spawn(index, url))
            .collect()
    }

    pub fn spawn(&self, index: usize, url: String) -> JoinHandle<()> {
        let fetcher = self.fetcher.clone();
        let semaphore = self.semaphore.clone();
        let completions = self.completions.clone();

        self.runtime.spawn(async move {
            let Ok(_permit) = semaphore.acquire().await else {
                return;
            };

            tracing::debug!("Fetching {}", url);
            match fetcher.fetch(&url).await {
                Ok(feed) => {
                    tracing::info!("Fetched {} ({} items)", url, feed.items.len());
                    if completions.send(FetchCompletion { index, feed }).is_err() {
                        tracing::debug!("UI closed before {} arrived", url);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {}", url, e);
                }
            }
        })
    }
}
