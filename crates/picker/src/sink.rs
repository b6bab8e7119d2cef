use crate::types::{Candidate, RankedRow};

/// Consumer of a session's ranked output. The shell implements this to render
/// the result list; the session never calls it after close.
pub trait ResultSink: Send + 'static {
	/// Invoked on every re-rank and selection change. `selected` is the
	/// 1-based selection cursor, 0 when the list is empty.
	fn ranked_list_changed(&mut self, rows: &[RankedRow], selected: usize);

	/// Invoked when the user confirms the selected candidate.
	fn confirmed(&mut self, candidate: &Candidate, query: &str);

	/// Informational notices (source unavailable, fetch failure). Failures
	/// never propagate as faults; this is the only failure surface.
	fn notice(&mut self, message: &str);
}
