//! Ordered-subsequence fuzzy scoring and ranking.
//!
//! A candidate matches when every query character appears in it, in order but not
//! necessarily contiguously, compared case-insensitively. Matches are scored by a
//! dynamic-programming alignment that rewards locality: runs of consecutive
//! matched characters and matches sitting on path, word, extension, or camel-case
//! boundaries. Skipped haystack characters cost a small gap penalty.
//!
//! [`score`] ranks a single haystack against a query; [`match_list`] ranks a whole
//! candidate list, filters out non-matches, and truncates to a limit.

mod alignment;
mod prefilter;
mod rank;

pub use alignment::score;
pub use rank::match_list;
#[cfg(feature = "parallel_sort")]
pub use rank::match_list_parallel;

/// Score reserved for a case-insensitive full-string match between query and
/// haystack. Strictly greater than any score a non-exact match can accumulate,
/// so exact matches always sort first.
pub const EXACT_MATCH_SCORE: f32 = f32::INFINITY;

/// Bonus and penalty table for the alignment.
///
/// The consecutive-run bonus must stay strictly larger than every positional
/// bonus: a contiguous run of matched characters outranks the same characters
/// scattered across boundaries. Gap penalties are negative and small in
/// magnitude, with interior gaps costing slightly more than gaps trailing the
/// last matched query character.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scoring {
	/// Bonus for extending a contiguous run of matched characters.
	pub bonus_consecutive: f32,
	/// Bonus for the first haystack character or one following a path separator.
	pub bonus_path: f32,
	/// Bonus for a character following `_`, `-`, or space.
	pub bonus_word: f32,
	/// Bonus for an uppercase character following a lowercase one.
	pub bonus_camel: f32,
	/// Bonus for a character following `.`.
	pub bonus_dot: f32,
	/// Penalty per skipped haystack character between matches.
	pub gap_inner: f32,
	/// Penalty per skipped haystack character after the last match.
	pub gap_trailing: f32,
}

impl Default for Scoring {
	fn default() -> Self {
		Self {
			bonus_consecutive: 1.0,
			bonus_path: 0.9,
			bonus_word: 0.8,
			bonus_camel: 0.7,
			bonus_dot: 0.6,
			gap_inner: -0.01,
			gap_trailing: -0.005,
		}
	}
}

/// Matcher configuration.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
	pub scoring: Scoring,
}

/// A ranked candidate, identified by its position in the input slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
	pub index: u32,
	pub score: f32,
}
