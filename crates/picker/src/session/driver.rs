use std::sync::Arc;

use loupe_matcher::{Config, match_list};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use super::{SessionCmd, SessionOptions};
use crate::sink::ResultSink;
use crate::source::{Fetch, FetchEvent, FetchStatus, Source, SourceError};
use crate::types::{Candidate, RankedRow};

/// Owns all mutable state for one session and runs its event loop.
pub(crate) struct SessionDriver<S: ResultSink> {
	source: Source,
	options: SessionOptions,
	sink: S,
	config: Config,

	query: String,
	/// 1-based selection cursor, 0 while the display list is empty.
	selected: usize,
	/// Query that produced the cached external result set; lags the live
	/// query while refinement keeps ranking locally.
	cache_query: Option<String>,
	cache: Vec<Candidate>,
	/// Streamed batches not yet folded into the cache; flushed on a fixed
	/// interval to avoid redraw storms.
	pending: Vec<Candidate>,
	display: Vec<RankedRow>,
	in_flight: Option<Fetch>,
	debounce_deadline: Option<Instant>,
	flush_deadline: Option<Instant>,
	unavailable_reported: bool,
}

enum Step {
	Cmd(Option<SessionCmd>),
	Fetch(Option<FetchEvent>),
	DebounceElapsed,
	FlushElapsed,
}

impl<S: ResultSink> SessionDriver<S> {
	pub(crate) fn new(source: Source, options: SessionOptions, sink: S) -> Self {
		Self {
			source,
			options,
			sink,
			config: Config::default(),
			query: String::new(),
			selected: 0,
			cache_query: None,
			cache: Vec::new(),
			pending: Vec::new(),
			display: Vec::new(),
			in_flight: None,
			debounce_deadline: None,
			flush_deadline: None,
			unavailable_reported: false,
		}
	}

	pub(crate) async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<SessionCmd>) {
		debug!(title = %self.options.title, source = ?self.source, "search session opened");

		// Initial push: static sources show the empty-query pass-through
		// immediately, dynamic ones start blank.
		match &self.source {
			Source::Static(_) => self.rerank_static(),
			Source::Dynamic(_) => self.push_display(),
		}

		loop {
			let step = tokio::select! {
				biased;

				cmd = cmd_rx.recv() => Step::Cmd(cmd),
				event = recv_fetch_event(&mut self.in_flight) => Step::Fetch(event),
				() = sleep_until_opt(self.debounce_deadline) => Step::DebounceElapsed,
				() = sleep_until_opt(self.flush_deadline) => Step::FlushElapsed,
			};

			match step {
				Step::Cmd(Some(SessionCmd::SetQuery(text))) => self.handle_set_query(text),
				Step::Cmd(Some(SessionCmd::MoveSelection(delta))) => self.handle_move_selection(delta),
				Step::Cmd(Some(SessionCmd::Confirm)) => self.handle_confirm(),
				Step::Cmd(Some(SessionCmd::Close) | None) => break,
				Step::Fetch(event) => self.handle_fetch_event(event),
				Step::DebounceElapsed => {
					self.debounce_deadline = None;
					self.launch_fetch();
				}
				Step::FlushElapsed => {
					self.flush_deadline = None;
					self.absorb_pending();
					self.rerank_cache();
				}
			}
		}

		self.shutdown();
	}

	fn handle_set_query(&mut self, text: String) {
		if text == self.query {
			return;
		}
		self.query = text;
		self.selected = 1;

		match &self.source {
			Source::Static(_) => self.rerank_static(),
			Source::Dynamic(_) => self.refine(),
		}
	}

	/// Decides the cheapest correct reaction to a dynamic-source query edit.
	fn refine(&mut self) {
		if self.query.is_empty() {
			// Terminal reset: nothing to show, nothing worth fetching.
			self.kill_in_flight();
			self.debounce_deadline = None;
			self.cache_query = None;
			self.cache.clear();
			self.pending.clear();
			self.display.clear();
			self.push_display();
			return;
		}

		let refinable = self
			.cache_query
			.as_ref()
			.is_some_and(|cached| self.query.starts_with(cached.as_str()));
		if refinable {
			// The cached set is a superset of what the extended query can
			// match; rank it locally and leave any in-flight stream running.
			trace!(query = %self.query, cache_query = ?self.cache_query, "refining cached results");
			self.debounce_deadline = None;
			self.absorb_pending();
			self.rerank_cache();
			return;
		}

		// The cache cannot answer this query. Kill the fetch now; the old
		// display stays up until fresh data arrives.
		self.kill_in_flight();
		self.debounce_deadline = Some(Instant::now() + self.options.debounce);
		trace!(query = %self.query, "debouncing external fetch");
	}

	fn launch_fetch(&mut self) {
		let Source::Dynamic(source) = &self.source else {
			return;
		};
		let source = Arc::clone(source);

		// Supersede whatever is still running before the new fetch starts.
		self.kill_in_flight();
		self.cache_query = Some(self.query.clone());
		self.cache.clear();
		self.pending.clear();

		debug!(query = %self.query, "launching external fetch");
		match source.fetch(&self.query) {
			Ok(fetch) => self.in_flight = Some(fetch),
			Err(SourceError::Unavailable(reason)) => {
				self.display.clear();
				self.push_display();
				if !self.unavailable_reported {
					self.unavailable_reported = true;
					warn!(%reason, "search source unavailable");
					self.sink.notice(&reason);
				}
			}
		}
	}

	fn handle_fetch_event(&mut self, event: Option<FetchEvent>) {
		match event {
			Some(FetchEvent::Batch(candidates)) => {
				self.pending.extend(candidates);
				if self.flush_deadline.is_none() {
					self.flush_deadline = Some(Instant::now() + self.options.flush_interval);
				}
			}
			Some(FetchEvent::Done(status)) => {
				self.in_flight = None;
				self.finish_fetch(status);
			}
			// Producer dropped without a terminal event; treat it as
			// completion so the tail of the stream still lands.
			None => {
				self.in_flight = None;
				self.finish_fetch(FetchStatus::Completed);
			}
		}
	}

	fn finish_fetch(&mut self, status: FetchStatus) {
		// The final flush is unconditional: no pending data is dropped.
		self.flush_deadline = None;
		self.absorb_pending();
		self.rerank_cache();

		match status {
			FetchStatus::Completed => {
				debug!(cache_query = ?self.cache_query, cached = self.cache.len(), "fetch complete");
			}
			FetchStatus::Failed(reason) => {
				// Partial results stay cached and displayed.
				warn!(%reason, "fetch failed");
				self.sink.notice(&reason);
			}
		}
	}

	fn handle_move_selection(&mut self, delta: isize) {
		let len = self.display.len();
		if len == 0 {
			return;
		}
		let current = self.selected.max(1) as isize - 1;
		let next = (current + delta).rem_euclid(len as isize) as usize;
		self.selected = next + 1;
		self.sink.ranked_list_changed(&self.display, self.selected);
	}

	fn handle_confirm(&mut self) {
		if self.selected == 0 {
			return;
		}
		if let Some(row) = self.display.get(self.selected - 1) {
			let candidate = row.candidate.clone();
			debug!(candidate = candidate.value(), "selection confirmed");
			self.sink.confirmed(&candidate, &self.query);
		}
	}

	fn kill_in_flight(&mut self) {
		if let Some(fetch) = self.in_flight.take() {
			debug!(cache_query = ?self.cache_query, "killing in-flight fetch");
			fetch.kill();
		}
		// Whatever already streamed belongs to the cache it was fetched for.
		self.absorb_pending();
		self.flush_deadline = None;
	}

	fn absorb_pending(&mut self) {
		if !self.pending.is_empty() {
			self.cache.append(&mut self.pending);
		}
	}

	fn rerank_static(&mut self) {
		let Source::Static(candidates) = &self.source else {
			return;
		};
		let candidates = Arc::clone(candidates);
		self.display = rank_rows(&self.query, &candidates, self.options.max_results, &self.config);
		self.push_display();
	}

	fn rerank_cache(&mut self) {
		self.display = rank_rows(&self.query, &self.cache, self.options.max_results, &self.config);
		self.push_display();
	}

	fn push_display(&mut self) {
		self.selected = if self.display.is_empty() {
			0
		} else {
			self.selected.clamp(1, self.display.len())
		};
		trace!(rows = self.display.len(), selected = self.selected, "ranked list changed");
		self.sink.ranked_list_changed(&self.display, self.selected);
	}

	fn shutdown(&mut self) {
		debug!(title = %self.options.title, "search session closed");
		self.kill_in_flight();
		self.debounce_deadline = None;
		self.flush_deadline = None;
	}
}

/// Ranks candidates against the live query. Always derived from the freshest
/// `(cache, query)` pair; event arrival order never leaks into the output.
fn rank_rows(query: &str, candidates: &[Candidate], limit: usize, config: &Config) -> Vec<RankedRow> {
	let displays: Vec<&str> = candidates.iter().map(Candidate::display).collect();
	match_list(query, &displays, limit, config)
		.into_iter()
		.map(|m| RankedRow {
			candidate: candidates[m.index as usize].clone(),
			score: m.score,
		})
		.collect()
}

async fn recv_fetch_event(in_flight: &mut Option<Fetch>) -> Option<FetchEvent> {
	match in_flight {
		Some(fetch) => fetch.events.recv().await,
		None => std::future::pending().await,
	}
}

async fn sleep_until_opt(deadline: Option<Instant>) {
	match deadline {
		Some(at) => tokio::time::sleep_until(at).await,
		None => std::future::pending().await,
	}
}
