pub mod app;
pub mod event;
pub mod layout;
pub mod sync;

use std::io::{self, Stdout};
use std::ops::ControlFlow;
use std::time::Duration;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::{AppContext, MrssError, Result};
use crate::config::Keymap;
use crate::fetcher::parallel::ParallelFetcher;
use crate::store::FeedStore;

use self::app::Effect;
use self::event::{AppEvent, EventHandler};
use self::sync::{spawn_completion_consumer, Session, Synchronizer};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// How often the input loop wakes up without input to check on the fetch consumer.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Run the full-screen reader until the user quits.
pub async fn run(ctx: AppContext) -> Result<()> {
    install_panic_hook();
    let terminal = setup_terminal()?;
    let result = run_app(terminal, ctx).await;
    let restored = restore_terminal();
    result.and(restored)
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}

/// Leave raw mode before the default hook prints the panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

async fn run_app(terminal: Tui, ctx: AppContext) -> Result<()> {
    let AppContext {
        fetcher,
        subscriptions,
        config,
        keymap,
    } = ctx;

    let session = Session::new(terminal, FeedStore::new(subscriptions), config.colors)?;
    let sync = Synchronizer::new(session);

    let (tx, rx) = mpsc::unbounded_channel();
    let consumer = spawn_completion_consumer(sync.clone(), rx);
    let dispatcher = ParallelFetcher::new(fetcher, tx);
    dispatcher.spawn_all(sync.subscriptions()?);

    // Input blocks on the terminal, so it gets a thread of its own.
    tokio::task::spawn_blocking(move || input_loop(&sync, &dispatcher, &keymap, &consumer))
        .await
        .unwrap_or_else(|e| std::panic::resume_unwind(e.into_panic()))
}

fn input_loop<B: Backend>(
    sync: &Synchronizer<B>,
    dispatcher: &ParallelFetcher,
    keymap: &Keymap,
    consumer: &JoinHandle<Result<()>>,
) -> Result<()> {
    let events = EventHandler::new(TICK_RATE);
    sync.redraw()?;

    loop {
        match events.next()? {
            AppEvent::Key(key) => {
                let effect = sync.handle_action(keymap.get_action(&key))?;
                if perform(effect, sync, dispatcher)?.is_break() {
                    return Ok(());
                }
            }
            AppEvent::Resize(width, height) => sync.resize(width, height)?,
            AppEvent::Tick => {
                // The consumer only stops early when a redraw failed.
                if consumer.is_finished() {
                    return Err(MrssError::Terminal(io::Error::other(
                        "redraw after feed update failed",
                    )));
                }
            }
        }
    }
}

/// Carry out what a key press asked for beyond the state change itself.
fn perform<B: Backend>(
    effect: Effect,
    sync: &Synchronizer<B>,
    dispatcher: &ParallelFetcher,
) -> Result<ControlFlow<()>> {
    match effect {
        Effect::None => {}
        Effect::Exit => return Ok(ControlFlow::Break(())),
        Effect::RefreshAll => {
            tracing::info!("Refreshing all feeds");
            dispatcher.spawn_all(sync.subscriptions()?);
        }
        Effect::OpenLink(link) => {
            if let Err(e) = open::that_detached(&link) {
                tracing::warn!("Failed to open {}: {}", link, e);
            }
        }
    }
    Ok(ControlFlow::Continue(()))
}
