//! # mrss
//!
//! A minimal full-screen feed reader: a list of feeds, a list of items, and
//! an item body, navigated with the keyboard.
//!
//! ## Architecture
//!
//! ```text
//! urls file → FeedStore ← fetch tasks ─┐
//!                 ↑                    │ FetchCompletion
//!   keys → AppState::apply    Synchronizer (one lock) → render
//! ```
//!
//! Every feed is fetched on its own task at startup. Key presses and
//! finished fetches both go through the [`Synchronizer`](tui::sync::Synchronizer),
//! which mutates the state and repaints while holding a single lock.
//!
//! ## Usage
//!
//! ```bash
//! # Linux; other platforms use their own config directory
//! mkdir -p ~/.config/mrss
//! echo https://blog.rust-lang.org/feed.xml >> ~/.config/mrss/urls
//! mrss
//! ```

/// Application context and error types.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration: the config directory, colors and keybindings.
///
/// Loads `mrss/config.toml` from the platform config directory.
pub mod config;

/// Core domain models.
///
/// - [`FeedEntry`](domain::FeedEntry): a subscription and its feed, once fetched
/// - [`FeedData`](domain::FeedData) and [`Item`](domain::Item): parsed feed content
pub mod domain;

/// Feed fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for fetching one feed
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): one task per feed, results over a channel
pub mod fetcher;

/// Hard-wrapping of item bodies into fixed-width lines.
pub mod formatter;

/// Feed parsing and normalization.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0, and JSON Feed 1.0 into
/// [`FeedData`](domain::FeedData).
pub mod normalizer;

/// In-memory feed store and the subscription list loader.
pub mod store;

/// Terminal user interface.
///
/// Three views (feeds, items, item body) built on ratatui.
pub mod tui;
