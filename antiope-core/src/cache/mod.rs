//! Feed content cache
//!
//! Fetched articles are cached per category with an explicit
//! time-to-live so that re-visiting a feed page inside the window does
//! not refetch. The cache is owned by the sequencer, aged by the tick
//! stream, and written only by accepted fetch outcomes.

pub mod feed;

pub use feed::{Article, ArticleSet, FeedCache, FEED_TTL_MS, MAX_ARTICLES, MAX_ARTICLE_LINES};
