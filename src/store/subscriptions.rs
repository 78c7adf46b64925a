//! Subscription list parsing.
//!
//! The `urls` file holds one feed URL per line. Blank lines are skipped and
//! each line must fit, with its terminator, in [`MAX_LINE_LEN`] bytes.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::config::ConfigError;
use crate::domain::FeedEntry;

pub const MAX_LINE_LEN: usize = 2048;

/// Read the subscription file at `path`.
pub fn load_subscriptions(path: &Path) -> Result<Vec<FeedEntry>, ConfigError> {
    let file = File::open(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_subscriptions(BufReader::new(file), path)
}

/// Parse subscription lines from `reader` into placeholder entries.
///
/// `path` only labels I/O errors.
pub fn read_subscriptions<R: BufRead>(
    mut reader: R,
    path: &Path,
) -> Result<Vec<FeedEntry>, ConfigError> {
    let mut entries = Vec::new();
    let mut buf = Vec::with_capacity(MAX_LINE_LEN);
    let mut line = 0;

    loop {
        buf.clear();
        line += 1;

        let n = (&mut reader)
            .take(MAX_LINE_LEN as u64)
            .read_until(b'\n', &mut buf)
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        if n == 0 {
            break;
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
        } else if n == MAX_LINE_LEN {
            return Err(ConfigError::LineTooLong {
                line,
                max: MAX_LINE_LEN,
            });
        }

        let text = std::str::from_utf8(&buf).map_err(|_| ConfigError::Encoding { line })?;
        let url = text.trim();
        if url.is_empty() {
            continue;
        }

        entries.push(FeedEntry::new(url.to_string()));
    }

    tracing::debug!("Loaded {} subscriptions", entries.len());
    Ok(entries)
}
