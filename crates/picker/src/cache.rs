use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::types::Candidate;

/// Time source for cache expiry. Injectable so tests drive expiry manually.
pub trait Clock: Send + Sync {
	fn now(&self) -> Instant;
}

/// [`Clock`] backed by the system monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> Instant {
		Instant::now()
	}
}

/// Owned cache for an expensive static listing (e.g. a working-directory file
/// walk), bounded by a TTL and keyed by an explicit invalidation key.
///
/// Sessions and source constructors receive this object explicitly; nothing
/// in the crate keeps ambient module-level cache state.
pub struct ListingCache {
	ttl: Duration,
	clock: Arc<dyn Clock>,
	entry: Option<CacheEntry>,
}

struct CacheEntry {
	key: String,
	stamped_at: Instant,
	candidates: Arc<[Candidate]>,
}

impl ListingCache {
	pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
		Self {
			ttl,
			clock,
			entry: None,
		}
	}

	pub fn with_system_clock(ttl: Duration) -> Self {
		Self::new(ttl, Arc::new(SystemClock))
	}

	/// Cached listing for `key`, if present and fresh.
	pub fn get(&self, key: &str) -> Option<Arc<[Candidate]>> {
		let entry = self.entry.as_ref()?;
		if entry.key != key || self.clock.now().duration_since(entry.stamped_at) >= self.ttl {
			return None;
		}
		Some(Arc::clone(&entry.candidates))
	}

	/// Replaces the cached listing, stamping it with the current time.
	pub fn insert(&mut self, key: impl Into<String>, candidates: impl Into<Arc<[Candidate]>>) -> Arc<[Candidate]> {
		let candidates = candidates.into();
		self.entry = Some(CacheEntry {
			key: key.into(),
			stamped_at: self.clock.now(),
			candidates: Arc::clone(&candidates),
		});
		candidates
	}

	/// Cached listing for `key`, producing and storing one on miss, key
	/// change, or expiry.
	pub fn get_or_insert_with(&mut self, key: &str, produce: impl FnOnce() -> Vec<Candidate>) -> Arc<[Candidate]> {
		if let Some(hit) = self.get(key) {
			return hit;
		}
		self.insert(key, produce())
	}

	/// Drops any cached listing.
	pub fn invalidate(&mut self) {
		self.entry = None;
	}
}
