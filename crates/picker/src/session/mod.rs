//! Search session control surface.
//!
//! [`Session::open`] spawns a driver task owning all per-session state; the
//! handle's methods are fire-and-forget commands to it. One driver, one task:
//! no two callbacks for a session ever run concurrently, and ordering between
//! "query changed" and "data arrived" never matters because the display list
//! is always re-derived from the freshest `(cache, live query)` pair.

mod driver;


use std::time::Duration;

use tokio::sync::mpsc;

use crate::sink::ResultSink;
use crate::source::Source;
use driver::SessionDriver;

/// Session tuning knobs.
#[derive(Debug, Clone)]
pub struct SessionOptions {
	/// Cap on the ranked list length.
	pub max_results: usize,
	/// Pause required after a non-refinable edit before an external fetch
	/// fires. Irrelevant for static sources.
	pub debounce: Duration,
	/// Coalescing interval for streamed batches; bounds redraw frequency
	/// under high-rate delivery.
	pub flush_interval: Duration,
	/// Cosmetic title for the shell to display alongside the results.
	pub title: String,
}

impl Default for SessionOptions {
	fn default() -> Self {
		Self {
			max_results: 200,
			debounce: Duration::from_millis(120),
			flush_interval: Duration::from_millis(25),
			title: String::new(),
		}
	}
}

pub(crate) enum SessionCmd {
	SetQuery(String),
	MoveSelection(isize),
	Confirm,
	Close,
}

/// Handle to a live search session.
///
/// Methods are no-ops once the session has closed; closing twice is fine.
/// Dropping the last handle closes the session the same way [`Session::close`]
/// does.
pub struct Session {
	cmd_tx: mpsc::UnboundedSender<SessionCmd>,
}

impl Session {
	/// Opens a session over `source`, pushing ranked lists into `sink`.
	///
	/// Must be called within a tokio runtime; the driver runs as a task on it.
	/// The sink receives the initial (empty-query) list immediately.
	pub fn open<S: ResultSink>(source: Source, options: SessionOptions, sink: S) -> Self {
		let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
		let driver = SessionDriver::new(source, options, sink);
		tokio::spawn(driver.run(cmd_rx));
		Self { cmd_tx }
	}

	/// Replaces the query; the driver re-ranks, refines the cache, or
	/// schedules a debounced fetch as appropriate.
	pub fn set_query(&self, text: impl Into<String>) {
		let _ = self.cmd_tx.send(SessionCmd::SetQuery(text.into()));
	}

	/// Moves the selection cursor by `delta`, wrapping cyclically.
	pub fn move_selection(&self, delta: isize) {
		let _ = self.cmd_tx.send(SessionCmd::MoveSelection(delta));
	}

	/// Reports the selected candidate to the sink. No-op on an empty list.
	pub fn confirm(&self) {
		let _ = self.cmd_tx.send(SessionCmd::Confirm);
	}

	/// Closes the session: cancels any in-flight fetch, stops pending timers,
	/// and releases the driver.
	pub fn close(&self) {
		let _ = self.cmd_tx.send(SessionCmd::Close);
	}
}
