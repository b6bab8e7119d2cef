//! Incremental fuzzy-search sessions over static or asynchronous sources.
//!
//! A [`Session`] owns the state behind one search UI: the live query, the
//! cached external result set, the in-flight fetch, and the ranked list it
//! pushes into a [`ResultSink`]. On every edit it picks the cheapest correct
//! path to an up-to-date list: re-rank a static source synchronously, re-rank
//! the cache locally when the query merely extends the one that produced it,
//! or cancel the running fetch and schedule a debounced new one.
//!
//! Scoring and ranking live in `loupe-matcher`; this crate supplies the
//! orchestration, the [`Source`] adapter boundary, and a [`CommandSource`]
//! adapter for external search programs.

mod cache;
mod session;
mod sink;
mod source;
mod types;

pub use cache::{Clock, ListingCache, SystemClock};
pub use session::{Session, SessionOptions};
pub use sink::ResultSink;
pub use source::{CommandSource, DynamicSource, Fetch, FetchEvent, FetchSender, FetchStatus, QUERY_PLACEHOLDER, Source, SourceError};
pub use types::{Candidate, RankedRow};
