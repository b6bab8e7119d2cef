#[cfg(feature = "parallel_sort")]
mod parallel;

#[cfg(feature = "parallel_sort")]
pub use parallel::match_list_parallel;

use std::cmp::Ordering;

use crate::alignment::score;
use crate::{Config, Match};

pub(crate) struct Ranked<'a> {
	index: u32,
	score: f32,
	len: usize,
	haystack: &'a str,
}

impl<'a> Ranked<'a> {
	pub(crate) fn new(index: usize, score: f32, haystack: &'a str) -> Self {
		Self {
			index: index as u32,
			score,
			len: haystack.chars().count(),
			haystack,
		}
	}

	fn into_match(self) -> Match {
		Match {
			index: self.index,
			score: self.score,
		}
	}
}

/// Strict total order over ranked candidates: score descending, then display
/// length ascending, then lexicographic, then input position. Re-ranking the
/// same input is deterministic and idempotent.
pub(crate) fn compare(a: &Ranked<'_>, b: &Ranked<'_>) -> Ordering {
	b.score
		.total_cmp(&a.score)
		.then(a.len.cmp(&b.len))
		.then_with(|| a.haystack.cmp(b.haystack))
		.then(a.index.cmp(&b.index))
}

/// Ranks `haystacks` against `needle` and returns at most `limit` matches,
/// best first. Non-matching candidates are dropped.
///
/// An empty needle matches everything: the first `limit` candidates come back
/// in their original order at score 0, without a scoring pass.
pub fn match_list<S: AsRef<str>>(needle: &str, haystacks: &[S], limit: usize, config: &Config) -> Vec<Match> {
	if needle.is_empty() {
		return pass_through(haystacks, limit);
	}

	let mut ranked: Vec<Ranked<'_>> = haystacks
		.iter()
		.enumerate()
		.filter_map(|(index, haystack)| {
			let haystack = haystack.as_ref();
			score(needle, haystack, &config.scoring).map(|score| Ranked::new(index, score, haystack))
		})
		.collect();

	ranked.sort_unstable_by(compare);
	ranked.truncate(limit);
	ranked.into_iter().map(Ranked::into_match).collect()
}

pub(crate) fn pass_through<S: AsRef<str>>(haystacks: &[S], limit: usize) -> Vec<Match> {
	haystacks
		.iter()
		.take(limit)
		.enumerate()
		.map(|(index, _)| Match {
			index: index as u32,
			score: 0.0,
		})
		.collect()
}
