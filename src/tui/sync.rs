//! Serialized access to the UI.
//!
//! The input loop and the fetch-completion consumer each take the single
//! [`Session`] lock, mutate, repaint and release. Nothing touches the state
//! or the terminal without holding it.

use std::sync::{Arc, Mutex, MutexGuard};

use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::{MrssError, Result};
use crate::config::ColorConfig;
use crate::fetcher::parallel::FetchCompletion;
use crate::store::FeedStore;
use crate::tui::app::{AppState, Effect};
use crate::tui::event::Action;
use crate::tui::layout;

/// Everything the lock guards.
pub struct Session<B: Backend> {
    pub state: AppState,
    pub feeds: FeedStore,
    pub colors: ColorConfig,
    terminal: Terminal<B>,
}

impl<B: Backend> Session<B> {
    /// Start in the feed list, sized to the terminal.
    pub fn new(terminal: Terminal<B>, feeds: FeedStore, colors: ColorConfig) -> Result<Self> {
        let size = terminal.size()?;
        Ok(Self {
            state: AppState::new(size.width, size.height),
            feeds,
            colors,
            terminal,
        })
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Clear, render the current mode and flush.
    fn draw(&mut self) -> Result<()> {
        let Self {
            state,
            feeds,
            colors,
            terminal,
        } = self;
        terminal.draw(|frame| layout::render(frame, state, feeds, colors))?;
        Ok(())
    }
}

/// Cloneable handle to the locked [`Session`].
pub struct Synchronizer<B: Backend> {
    session: Arc<Mutex<Session<B>>>,
}

impl<B: Backend> Clone for Synchronizer<B> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
        }
    }
}

impl<B: Backend> Synchronizer<B> {
    pub fn new(session: Session<B>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Session<B>>> {
        self.session.lock().map_err(|_| MrssError::StatePoisoned)
    }

    pub fn redraw(&self) -> Result<()> {
        self.lock()?.draw()
    }

    /// Apply a user action and repaint, unless the action ends the session.
    pub fn handle_action(&self, action: Action) -> Result<Effect> {
        let mut session = self.lock()?;
        let Session { state, feeds, .. } = &mut *session;
        let effect = state.apply(action, feeds);

        if effect != Effect::Exit {
            session.draw()?;
        }
        Ok(effect)
    }

    pub fn resize(&self, width: u16, height: u16) -> Result<()> {
        let mut session = self.lock()?;
        session.state.resize(width, height);
        session.draw()
    }

    /// Store a fetched feed and repaint.
    pub fn apply_fetched(&self, completion: FetchCompletion) -> Result<()> {
        let FetchCompletion { index, feed } = completion;
        let mut session = self.lock()?;

        if !session.feeds.set_feed(index, feed) {
            tracing::warn!("Dropping fetch result for unknown feed {}", index);
            return Ok(());
        }
        let Session { state, feeds, .. } = &mut *session;
        state.reconcile(feeds);

        session.draw()
    }

    pub fn subscriptions(&self) -> Result<Vec<(usize, String)>> {
        Ok(self.lock()?.feeds.subscriptions())
    }

    /// Run `f` against the session while holding the lock.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut Session<B>) -> R) -> Result<R> {
        Ok(f(&mut *self.lock()?))
    }
}

/// Apply fetch completions one at a time until every sender is gone.
///
/// Returns the first render failure; fetch failures never reach here.
pub fn spawn_completion_consumer<B>(
    sync: Synchronizer<B>,
    mut completions: mpsc::UnboundedReceiver<FetchCompletion>,
) -> JoinHandle<Result<()>>
where
    B: Backend + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(completion) = completions.recv().await {
            if let Err(e) = sync.apply_fetched(completion) {
                tracing::error!("Redraw after fetch failed: {}", e);
                return Err(e);
            }
        }
        Ok(())
    })
}
