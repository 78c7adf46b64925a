use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::error::Result;
use crate::config::{Config, Keymap};
use crate::domain::FeedEntry;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::store::load_subscriptions;

/// Everything the reader needs before the terminal is taken over.
pub struct AppContext {
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub subscriptions: Vec<FeedEntry>,
    pub config: Config,
    pub keymap: Keymap,
}

impl AppContext {
    /// Load from `mrss` in the platform config directory.
    pub fn load() -> Result<Self> {
        Self::from_dir(&Config::default_dir()?)
    }

    pub fn from_dir(dir: &Path) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new()?);
        Self::with_fetcher(dir, fetcher)
    }

    /// The subscription list is read first; a missing or malformed list
    /// fails before anything else is touched.
    pub fn with_fetcher(dir: &Path, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let subscriptions = load_subscriptions(&Config::urls_path(dir))?;
        let config = Config::load(dir)?;
        let keymap = config.keybindings.keymap()?;

        Ok(Self {
            fetcher,
            subscriptions,
            config,
            keymap,
        })
    }

    /// `<data dir>/mrss/mrss.log`, creating the directory if needed.
    pub fn log_path() -> Option<PathBuf> {
        let dir = dirs::data_dir()?.join("mrss");
        std::fs::create_dir_all(&dir).ok()?;
        Some(dir.join("mrss.log"))
    }
}
