use crate::prefilter::{fold, is_subsequence};
use crate::{EXACT_MATCH_SCORE, Scoring};

/// Scores `haystack` against `needle`, or `None` when the candidate does not
/// contain the query as an ordered subsequence.
///
/// A case-insensitive full-string match scores [`EXACT_MATCH_SCORE`], strictly
/// above anything a non-exact match can reach. An empty needle scores 0 on any
/// haystack; callers ranking whole lists should short-circuit that case instead
/// (see [`match_list`](crate::match_list)).
pub fn score(needle: &str, haystack: &str, scoring: &Scoring) -> Option<f32> {
	if needle.is_empty() {
		return Some(0.0);
	}

	let needle_chars: Vec<char> = needle.chars().map(fold).collect();
	let haystack_chars: Vec<char> = haystack.chars().collect();
	let n = needle_chars.len();
	let m = haystack_chars.len();

	if n > m {
		return None;
	}
	if n == m && needle_chars.iter().copied().eq(haystack_chars.iter().copied().map(fold)) {
		return Some(EXACT_MATCH_SCORE);
	}
	if !is_subsequence(needle, haystack) {
		return None;
	}

	let bonus = positional_bonuses(&haystack_chars, scoring);
	let haystack_folded: Vec<char> = haystack_chars.iter().copied().map(fold).collect();

	// Two states per cell: `best[j]` is the best alignment of the needle prefix
	// using the haystack up to position j; `run[j]` is the best alignment that
	// ends with a match exactly at j. Rows are rolled, one per needle character.
	let mut best_prev = vec![0.0f32; m + 1];
	let mut run_prev = vec![f32::NEG_INFINITY; m + 1];
	let mut best_curr = vec![f32::NEG_INFINITY; m + 1];
	let mut run_curr = vec![f32::NEG_INFINITY; m + 1];

	for i in 1..=n {
		let gap_penalty = if i == n { scoring.gap_trailing } else { scoring.gap_inner };
		let needle_char = needle_chars[i - 1];
		best_curr[0] = f32::NEG_INFINITY;
		run_curr[0] = f32::NEG_INFINITY;

		for j in 1..=m {
			if needle_char == haystack_folded[j - 1] {
				// Start a fresh match at j, or extend a consecutive run.
				let fresh = best_prev[j - 1] + bonus[j - 1];
				let run = fresh.max(run_prev[j - 1] + scoring.bonus_consecutive);
				run_curr[j] = run;
				best_curr[j] = run.max(best_curr[j - 1] + gap_penalty);
			} else {
				run_curr[j] = f32::NEG_INFINITY;
				best_curr[j] = best_curr[j - 1] + gap_penalty;
			}
		}

		std::mem::swap(&mut best_prev, &mut best_curr);
		std::mem::swap(&mut run_prev, &mut run_curr);
	}

	let total = best_prev[m];
	total.is_finite().then_some(total)
}

/// Locality bonus for matching at each haystack position, computed from the
/// original casing of the preceding character.
fn positional_bonuses(haystack: &[char], scoring: &Scoring) -> Vec<f32> {
	let mut bonus = Vec::with_capacity(haystack.len());
	let mut prev: Option<char> = None;
	for &curr in haystack {
		bonus.push(match prev {
			None | Some('/' | '\\') => scoring.bonus_path,
			Some('_' | '-' | ' ') => scoring.bonus_word,
			Some('.') => scoring.bonus_dot,
			Some(p) if p.is_lowercase() && curr.is_uppercase() => scoring.bonus_camel,
			Some(_) => 0.0,
		});
		prev = Some(curr);
	}
	bonus
}

#[cfg(test)]
mod tests;
