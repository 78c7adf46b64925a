pub mod feed;
pub mod item;

pub use feed::{FeedData, FeedEntry};
pub use item::Item;
