//! Data models for the feed data crate.

mod feed;
mod table;

pub use feed::{FeedRow, NavPoint, NormalizedFeed};
pub use table::RawTable;
