//! Navigation state: which view is shown, what is selected, and where the
//! viewport sits.
//!
//! `offset` is the screen row of the selected entry. It follows the cursor
//! down until the cursor reaches the last visible row, after which the list
//! scrolls underneath it. In the item body view the viewport instead scrolls
//! line by line through [`OpenItem::scroll`].

use crate::formatter::{body_width, format_item};
use crate::store::FeedStore;
use crate::tui::event::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    FeedList,
    ItemList,
    ItemBody,
}

/// Side effects the event loop performs on behalf of [`AppState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Exit,
    RefreshAll,
    OpenLink(String),
}

/// The item shown in [`Mode::ItemBody`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenItem {
    pub title: String,
    pub lines: Vec<String>,
    /// Index of the first body line on screen.
    pub scroll: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: Mode,
    pub feed_index: usize,
    pub item_index: usize,
    pub offset: usize,
    pub open_item: Option<OpenItem>,
    pub width: u16,
    pub height: u16,
}

impl AppState {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            mode: Mode::FeedList,
            feed_index: 0,
            item_index: 0,
            offset: 0,
            open_item: None,
            width,
            height,
        }
    }

    /// Apply one user action. Out-of-range movement is clamped silently.
    pub fn apply(&mut self, action: Action, feeds: &FeedStore) -> Effect {
        match action {
            Action::Activate => self.activate(feeds),
            Action::Dismiss => return self.dismiss(),
            Action::MoveDown => self.move_down(feeds),
            Action::MoveUp => self.move_up(),
            Action::PageDown => self.page_down(feeds),
            Action::PageUp => self.page_up(),
            Action::GotoTop => self.goto_top(),
            Action::GotoBottom => self.goto_bottom(feeds),
            Action::RefreshAll => return Effect::RefreshAll,
            Action::OpenLink => return self.selected_link(feeds),
            Action::Exit => return Effect::Exit,
            Action::None => {}
        }
        Effect::None
    }

    /// Index of the highlighted entry in the current list view.
    pub fn selected_index(&self) -> usize {
        match self.mode {
            Mode::FeedList => self.feed_index,
            Mode::ItemList | Mode::ItemBody => self.item_index,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.last_row());
    }

    /// Pull indices back into range after a feed was replaced.
    pub fn reconcile(&mut self, feeds: &FeedStore) {
        self.feed_index = self.feed_index.min(feeds.len().saturating_sub(1));
        if self.mode != Mode::FeedList {
            let items = feeds.items(self.feed_index).len();
            self.item_index = self.item_index.min(items.saturating_sub(1));
        }
        self.offset = self.offset.min(self.selected_index()).min(self.last_row());
    }

    fn activate(&mut self, feeds: &FeedStore) {
        match self.mode {
            Mode::FeedList => {
                if feeds.get(self.feed_index).is_some_and(|e| e.is_loaded()) {
                    self.offset = 0;
                    self.item_index = 0;
                    self.mode = Mode::ItemList;
                    tracing::debug!("Opened feed {}", self.feed_index);
                }
            }
            Mode::ItemList => {
                if let Some(item) = feeds.items(self.feed_index).get(self.item_index) {
                    let formatted = format_item(item, body_width(self.width));
                    self.open_item = Some(OpenItem {
                        title: formatted.title,
                        lines: formatted.lines,
                        scroll: 0,
                    });
                    self.offset = 0;
                    self.mode = Mode::ItemBody;
                    tracing::debug!("Opened item {} of feed {}", self.item_index, self.feed_index);
                }
            }
            Mode::ItemBody => {}
        }
    }

    fn dismiss(&mut self) -> Effect {
        match self.mode {
            Mode::FeedList => return Effect::Exit,
            Mode::ItemList => {
                self.mode = Mode::FeedList;
                self.offset = 0;
            }
            Mode::ItemBody => {
                self.open_item = None;
                self.mode = Mode::ItemList;
                self.offset = 0;
            }
        }
        Effect::None
    }

    fn move_down(&mut self, feeds: &FeedStore) {
        if let Some(open) = self.body_mut() {
            if open.scroll + 1 < open.lines.len() {
                open.scroll += 1;
            }
            return;
        }

        let index = self.selected_index();
        if index + 1 < self.list_len(feeds) {
            self.set_selected(index + 1);
            if self.offset < self.last_row() {
                self.offset += 1;
            }
        }
    }

    fn move_up(&mut self) {
        // The offset decays even when the cursor is already at the top.
        self.offset = self.offset.saturating_sub(1);

        if let Some(open) = self.body_mut() {
            open.scroll = open.scroll.saturating_sub(1);
            return;
        }
        let index = self.selected_index();
        self.set_selected(index.saturating_sub(1));
    }

    fn page_down(&mut self, feeds: &FeedStore) {
        let page = self.body_page();
        if let Some(open) = self.body_mut() {
            open.scroll = (open.scroll + page).min(open.lines.len().saturating_sub(1));
            return;
        }

        let last = self.list_len(feeds).saturating_sub(1);
        let index = (self.selected_index() + self.list_page()).min(last);
        self.set_selected(index);
    }

    fn page_up(&mut self) {
        let page = self.body_page();
        if let Some(open) = self.body_mut() {
            open.scroll = open.scroll.saturating_sub(page);
            return;
        }

        let index = self.selected_index().saturating_sub(self.list_page());
        self.set_selected(index);
        self.offset = self.offset.min(index);
    }

    fn goto_top(&mut self) {
        self.offset = 0;
        if let Some(open) = self.body_mut() {
            open.scroll = 0;
            return;
        }
        self.set_selected(0);
    }

    fn goto_bottom(&mut self, feeds: &FeedStore) {
        if let Some(open) = self.body_mut() {
            open.scroll = open.lines.len().saturating_sub(1);
            return;
        }

        let index = self.list_len(feeds).saturating_sub(1);
        self.set_selected(index);
        self.offset = self.last_row().min(index);
    }

    fn selected_link(&self, feeds: &FeedStore) -> Effect {
        if self.mode == Mode::FeedList {
            return Effect::None;
        }
        feeds
            .items(self.feed_index)
            .get(self.item_index)
            .and_then(|item| item.link())
            .map(|link| Effect::OpenLink(link.to_string()))
            .unwrap_or(Effect::None)
    }

    fn body_mut(&mut self) -> Option<&mut OpenItem> {
        match self.mode {
            Mode::ItemBody => self.open_item.as_mut(),
            _ => None,
        }
    }

    fn list_len(&self, feeds: &FeedStore) -> usize {
        match self.mode {
            Mode::FeedList => feeds.len(),
            Mode::ItemList | Mode::ItemBody => feeds.items(self.feed_index).len(),
        }
    }

    fn set_selected(&mut self, index: usize) {
        match self.mode {
            Mode::FeedList => self.feed_index = index,
            Mode::ItemList | Mode::ItemBody => self.item_index = index,
        }
    }

    fn last_row(&self) -> usize {
        (self.height as usize).saturating_sub(1)
    }

    /// List views keep the cursor row and one row of context.
    fn list_page(&self) -> usize {
        (self.height as usize).saturating_sub(2).max(1)
    }

    /// The body view also loses a row to the title bar.
    fn body_page(&self) -> usize {
        (self.height as usize).saturating_sub(3).max(1)
    }

    #[cfg(test)]
    pub(crate) fn invariants_hold(&self, feeds: &FeedStore) -> bool {
        let len = self.list_len(feeds);
        let index_ok = len == 0 || self.selected_index() < len;
        let feed_ok = feeds.is_empty() || self.feed_index < feeds.len();
        let offset_ok = self.offset <= self.selected_index() && self.offset <= self.last_row();
        let body_ok = (self.mode == Mode::ItemBody) == self.open_item.is_some();
        index_ok && feed_ok && offset_ok && body_ok
    }
}
