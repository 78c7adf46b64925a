use chrono::Utc;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{MrssError, Result};
use crate::domain::{FeedData, Item};

/// Converts RSS, Atom and JSON Feed documents into [`FeedData`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<FeedData> {
        let feed = parser::parse(body).map_err(|e| MrssError::FeedParse(e.to_string()))?;

        let title = feed
            .title
            .map(|t| decode_html_entities(&t.content).into_owned())
            .unwrap_or_default();

        let items = feed
            .entries
            .into_iter()
            .map(|entry| {
                // Full content when present, otherwise the summary.
                let content = entry
                    .content
                    .and_then(|c| c.body)
                    .or_else(|| entry.summary.map(|s| s.content))
                    .map(|b| decode_html_entities(&b).into_owned())
                    .unwrap_or_default();

                Item {
                    title: entry
                        .title
                        .map(|t| decode_html_entities(&t.content).into_owned())
                        .unwrap_or_default(),
                    content,
                    link: entry
                        .links
                        .first()
                        .map(|l| l.href.clone())
                        .unwrap_or_default(),
                    published_at: entry
                        .published
                        .or(entry.updated)
                        .map(|dt| dt.with_timezone(&Utc)),
                }
            })
            .collect();

        Ok(FeedData { title, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed &amp; Friends</title>
    <description>A test feed</description>
    <item>
      <title>Test Item 1</title>
      <link>https://example.com/item1</link>
      <guid>item-1</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>This is item 1</description>
    </item>
    <item>
      <title>Test Item 2</title>
      <link>https://example.com/item2</link>
      <guid>item-2</guid>
      <description>This is item 2</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Test Feed</title>
  <entry>
    <title>Atom Entry 1</title>
    <link href="https://example.com/atom1"/>
    <id>atom-entry-1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <summary>This is Atom entry 1</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let feed = Normalizer::new().normalize(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(feed.title, "Test Feed & Friends");
        assert_eq!(feed.items.len(), 2);
        assert_eq!(feed.items[0].title, "Test Item 1");
        assert_eq!(feed.items[0].link, "https://example.com/item1");
        assert!(feed.items[0].content.contains("This is item 1"));
        assert!(feed.items[0].published_at.is_some());
        assert!(feed.items[1].published_at.is_none());
    }

    #[test]
    fn test_parse_atom() {
        let feed = Normalizer::new().normalize(ATOM_SAMPLE.as_bytes()).unwrap();

        assert_eq!(feed.title, "Atom Test Feed");
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].link, "https://example.com/atom1");
        assert!(feed.items[0].content.contains("This is Atom entry 1"));
        assert!(feed.items[0].published_at.is_some());
    }

    #[test]
    fn test_parse_garbage() {
        let err = Normalizer::new().normalize(b"not a feed").unwrap_err();
        assert!(matches!(err, MrssError::FeedParse(_)));
    }
}
