use ratatui::{buffer::Buffer, layout::Rect, Frame};

use crate::config::ColorConfig;
use crate::store::FeedStore;
use crate::tui::app::{AppState, Mode, OpenItem};

/// Column where list entries start; column 0 carries the placeholder marker.
const LIST_INDENT: u16 = 2;

pub fn render(frame: &mut Frame, state: &AppState, feeds: &FeedStore, colors: &ColorConfig) {
    let area = frame.area();
    let buf = frame.buffer_mut();

    match state.mode {
        Mode::FeedList => {
            let rows = feeds
                .entries()
                .iter()
                .map(|entry| (entry.display_title(), !entry.is_loaded()));
            render_list(buf, area, rows, state, colors);
        }
        Mode::ItemList => {
            let rows = feeds
                .items(state.feed_index)
                .iter()
                .map(|item| (item.display_title(), false));
            render_list(buf, area, rows, state, colors);
        }
        Mode::ItemBody => {
            if let Some(open) = &state.open_item {
                render_body(buf, area, open, colors);
            }
        }
    }
}

/// Draw `(text, is_placeholder)` rows so the selected one sits on row `state.offset`.
fn render_list<'a>(
    buf: &mut Buffer,
    area: Rect,
    rows: impl Iterator<Item = (&'a str, bool)>,
    state: &AppState,
    colors: &ColorConfig,
) {
    if area.width <= LIST_INDENT {
        return;
    }

    let selected = state.selected_index();
    let start = selected.saturating_sub(state.offset);
    let text_width = (area.width - LIST_INDENT) as usize;

    for (row, (i, (text, placeholder))) in rows
        .enumerate()
        .skip(start)
        .take(area.height as usize)
        .enumerate()
    {
        let y = area.y + row as u16;

        let style = if i == selected {
            buf.set_style(Rect::new(area.x, y, area.width, 1), colors.inverse());
            colors.inverse()
        } else {
            colors.normal()
        };

        if placeholder {
            buf.set_style(Rect::new(area.x, y, 1, 1), colors.inverse());
        }

        buf.set_stringn(area.x + LIST_INDENT, y, text, text_width, style);
    }
}

fn render_body(buf: &mut Buffer, area: Rect, open: &OpenItem, colors: &ColorConfig) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    buf.set_style(Rect::new(area.x, area.y, area.width, 1), colors.title());
    buf.set_stringn(
        area.x + 1,
        area.y,
        &open.title,
        area.width.saturating_sub(1) as usize,
        colors.title(),
    );

    let visible = area.height.saturating_sub(1) as usize;
    for (row, line) in open.lines.iter().skip(open.scroll).take(visible).enumerate() {
        let y = area.y + 1 + row as u16;
        buf.set_stringn(area.x, y, line, area.width as usize, colors.normal());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeedData, FeedEntry, Item};
    use crate::tui::event::Action;
    use ratatui::{backend::TestBackend, style::Color, Terminal};

    fn draw(state: &AppState, feeds: &FeedStore) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(state.width, state.height)).unwrap();
        terminal
            .draw(|frame| render(frame, state, feeds, &ColorConfig::default()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn feeds() -> FeedStore {
        let mut store = FeedStore::new(vec![
            FeedEntry::new("http://a".into()),
            FeedEntry::new("http://b".into()),
            FeedEntry::new("http://c".into()),
        ]);
        store.set_feed(
            1,
            FeedData {
                title: "Bravo".into(),
                items: vec![
                    Item::new("first"),
                    Item {
                        title: "second".into(),
                        content: "héllo wörld".into(),
                        link: "http://b/2".into(),
                        published_at: None,
                    },
                ],
            },
        );
        store
    }

    #[test]
    fn test_feed_list_shows_titles_and_placeholders() {
        let feeds = feeds();
        let state = AppState::new(20, 5);
        let buf = draw(&state, &feeds);

        assert_eq!(row(&buf, 0), "  http://a");
        assert_eq!(row(&buf, 1), "  Bravo");
        assert_eq!(row(&buf, 2), "  http://c");
        assert_eq!(row(&buf, 3), "");

        // Selected row is inverse across the full width.
        assert_eq!(buf[(19, 0)].bg, Color::Black);
        assert_eq!(buf[(2, 0)].fg, Color::White);
        // Placeholder marker on an unselected row.
        assert_eq!(buf[(0, 2)].bg, Color::Black);
        assert_eq!(buf[(2, 2)].fg, Color::Black);
        assert_eq!(buf[(0, 1)].bg, Color::Reset);
    }

    #[test]
    fn test_list_scrolls_with_offset() {
        let feeds = FeedStore::new((0..10).map(|i| FeedEntry::new(format!("u{}", i))).collect());
        let mut state = AppState::new(10, 3);
        for _ in 0..5 {
            state.apply(Action::MoveDown, &feeds);
        }
        assert_eq!((state.feed_index, state.offset), (5, 2));

        let buf = draw(&state, &feeds);
        assert_eq!(row(&buf, 0), "  u3");
        assert_eq!(row(&buf, 1), "  u4");
        assert_eq!(row(&buf, 2), "  u5");
        assert_eq!(buf[(9, 2)].bg, Color::Black);
    }

    #[test]
    fn test_item_list() {
        let feeds = feeds();
        let mut state = AppState::new(20, 5);
        for action in [Action::MoveDown, Action::Activate, Action::MoveDown] {
            state.apply(action, &feeds);
        }

        let buf = draw(&state, &feeds);
        assert_eq!(row(&buf, 0), "  first");
        assert_eq!(row(&buf, 1), "  second");
        assert_eq!(buf[(0, 1)].bg, Color::Black);
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
    }

    #[test]
    fn test_item_body() {
        let feeds = feeds();
        let mut state = AppState::new(20, 6);
        for action in [Action::MoveDown, Action::Activate, Action::MoveDown, Action::Activate] {
            state.apply(action, &feeds);
        }

        let buf = draw(&state, &feeds);
        assert_eq!(row(&buf, 0), " second");
        assert!(buf[(1, 0)].modifier.contains(ratatui::style::Modifier::BOLD));
        assert_eq!(buf[(19, 0)].bg, Color::Black);
        assert_eq!(row(&buf, 1), "Date: unknown");
        assert_eq!(row(&buf, 2), "Link: http://b/2");
        assert_eq!(row(&buf, 3), "");
        assert_eq!(row(&buf, 4), "héllo wörld");

        state.apply(Action::MoveDown, &feeds);
        let buf = draw(&state, &feeds);
        assert_eq!(row(&buf, 1), "Link: http://b/2");
    }

    #[test]
    fn test_narrow_terminal_does_not_panic() {
        let feeds = feeds();
        let state = AppState::new(2, 1);
        let buf = draw(&state, &feeds);
        assert_eq!(row(&buf, 0), "");
    }
}
