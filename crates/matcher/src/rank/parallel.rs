use rayon::prelude::*;

use super::{Ranked, compare, pass_through};
use crate::alignment::score;
use crate::{Config, Match};

/// [`match_list`](super::match_list) with rayon-parallel scoring and sorting.
/// Identical output; worthwhile for candidate lists in the tens of thousands.
pub fn match_list_parallel<S: AsRef<str> + Sync>(needle: &str, haystacks: &[S], limit: usize, config: &Config) -> Vec<Match> {
	if needle.is_empty() {
		return pass_through(haystacks, limit);
	}

	let mut ranked: Vec<Ranked<'_>> = haystacks
		.par_iter()
		.enumerate()
		.filter_map(|(index, haystack)| {
			let haystack = haystack.as_ref();
			score(needle, haystack, &config.scoring).map(|score| Ranked::new(index, score, haystack))
		})
		.collect();

	ranked.par_sort_unstable_by(compare);
	ranked.truncate(limit);
	ranked.into_iter().map(Ranked::into_match).collect()
}
