mod command;

pub use command::{CommandSource, QUERY_PLACEHOLDER};

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use crate::cache::ListingCache;
use crate::types::Candidate;

/// Error starting a fetch.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	/// The backing tool could not start. Surfaced to the sink once per
	/// session as an empty ranked list plus a notice.
	#[error("search source unavailable: {0}")]
	Unavailable(String),
}

/// Terminal status of a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
	Completed,
	/// The fetch died after possibly-partial delivery. Whatever it already
	/// streamed stays cached and displayed.
	Failed(String),
}

/// Events delivered by an in-flight fetch.
#[derive(Debug, Clone)]
pub enum FetchEvent {
	/// A batch of candidates, in source order.
	Batch(Vec<Candidate>),
	/// Terminal event; no batches follow it.
	Done(FetchStatus),
}

/// Cancellable handle to an in-flight fetch, held by the session.
#[derive(Debug)]
pub struct Fetch {
	pub(crate) events: mpsc::UnboundedReceiver<FetchEvent>,
	cancel: CancellationToken,
}

impl Fetch {
	/// Connected producer/handle pair for source implementations.
	pub fn channel() -> (FetchSender, Self) {
		let (tx, events) = mpsc::unbounded_channel();
		let cancel = CancellationToken::new();
		(
			FetchSender {
				tx,
				cancel: cancel.clone(),
			},
			Self { events, cancel },
		)
	}

	/// Requests termination. Best-effort and non-blocking; the producer is
	/// expected to stop on its own time.
	pub(crate) fn kill(&self) {
		self.cancel.cancel();
	}
}

/// Producer side of a fetch, held by the source implementation.
#[derive(Debug, Clone)]
pub struct FetchSender {
	tx: mpsc::UnboundedSender<FetchEvent>,
	cancel: CancellationToken,
}

impl FetchSender {
	/// Delivers a batch. Returns false once the session stopped listening.
	pub fn batch(&self, candidates: Vec<Candidate>) -> bool {
		self.tx.send(FetchEvent::Batch(candidates)).is_ok()
	}

	/// Delivers the terminal status.
	pub fn done(&self, status: FetchStatus) -> bool {
		self.tx.send(FetchEvent::Done(status)).is_ok()
	}

	/// Resolves when the fetch is superseded by a newer query or the session
	/// closes.
	pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
		self.cancel.cancelled()
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}
}

/// Asynchronous candidate producer, queried once per debounced edit.
///
/// # Precondition
///
/// The session's refinement policy assumes the source narrows monotonically
/// under query-prefix extension: the results for `"ab"` must be a superset of
/// the results for `"abc"`. Substring and regex style backends satisfy this; a
/// backend doing its own fuzzy matching does not, and must be exposed as
/// [`Source::Static`] snapshots instead.
pub trait DynamicSource: Send + Sync {
	fn fetch(&self, query: &str) -> Result<Fetch, SourceError>;
}

/// Where a session's candidates come from, resolved once at construction.
#[derive(Clone)]
pub enum Source {
	/// Fixed, already-available list; every edit re-ranks it synchronously.
	Static(Arc<[Candidate]>),
	/// Asynchronous producer; edits go through the cache/debounce policy.
	Dynamic(Arc<dyn DynamicSource>),
}

impl Source {
	pub fn from_static(candidates: impl IntoIterator<Item = Candidate>) -> Self {
		Self::Static(candidates.into_iter().collect())
	}

	pub fn dynamic(source: impl DynamicSource + 'static) -> Self {
		Self::Dynamic(Arc::new(source))
	}

	/// Static source served through an owned TTL cache: a fresh entry under
	/// `key` is reused, anything else is produced and stored.
	pub fn cached_static(cache: &mut ListingCache, key: &str, produce: impl FnOnce() -> Vec<Candidate>) -> Self {
		Self::Static(cache.get_or_insert_with(key, produce))
	}
}

impl std::fmt::Debug for Source {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Static(candidates) => f.debug_tuple("Static").field(&candidates.len()).finish(),
			Self::Dynamic(_) => f.debug_tuple("Dynamic").finish(),
		}
	}
}
