use std::sync::Arc;

/// One item eligible for ranking.
///
/// The display string is the haystack scored against the query; the value is
/// the opaque payload handed back on confirmation. Both are resolved once at
/// construction, never re-derived per render.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
	value: Arc<str>,
	display: Arc<str>,
}

impl Candidate {
	/// Candidate whose display string is the value itself.
	pub fn new(value: impl Into<Arc<str>>) -> Self {
		let value = value.into();
		Self {
			display: Arc::clone(&value),
			value,
		}
	}

	/// Candidate with a display string distinct from its value.
	pub fn with_display(value: impl Into<Arc<str>>, display: impl Into<Arc<str>>) -> Self {
		Self {
			value: value.into(),
			display: display.into(),
		}
	}

	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn display(&self) -> &str {
		&self.display
	}
}

/// A candidate paired with its score for the query that produced the list.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedRow {
	pub candidate: Candidate,
	pub score: f32,
}
