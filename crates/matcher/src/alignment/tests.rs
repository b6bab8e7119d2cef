use super::*;

fn get_score(needle: &str, haystack: &str) -> f32 {
	score(needle, haystack, &Scoring::default()).unwrap_or_else(|| panic!("expected '{needle}' to match '{haystack}'"))
}

fn assert_close(actual: f32, expected: f32) {
	assert!((actual - expected).abs() < 1e-4, "expected {expected}, got {actual}");
}

#[test]
fn exact_match_scores_maximal() {
	assert_eq!(get_score("abc", "abc"), EXACT_MATCH_SCORE);
	assert_eq!(get_score("ABC", "abc"), EXACT_MATCH_SCORE);
	assert_eq!(get_score("main.lua", "MAIN.LUA"), EXACT_MATCH_SCORE);
}

#[test]
fn exact_match_beats_any_bonus_accumulation() {
	let stacked = score("ab", "a/a-a.aB_ab", &Scoring::default()).expect("must match");
	assert!(stacked < EXACT_MATCH_SCORE);
	assert_eq!(get_score("ab", "ab"), EXACT_MATCH_SCORE);
}

#[test]
fn needle_longer_than_haystack_is_no_match() {
	assert_eq!(score("abcd", "abc", &Scoring::default()), None);
	assert_eq!(score("a", "", &Scoring::default()), None);
}

#[test]
fn missing_character_is_no_match() {
	assert_eq!(score("cfg", "main.lua", &Scoring::default()), None);
	assert_eq!(score("cba", "abcd", &Scoring::default()), None);
}

#[test]
fn empty_needle_scores_zero() {
	assert_eq!(score("", "anything", &Scoring::default()), Some(0.0));
}

#[test]
fn prefix_run_scores_bonus_plus_consecutives() {
	let s = Scoring::default();
	// "Foo" in "FooBar": initial-position bonus, two consecutive extensions,
	// three trailing gaps.
	let expected = s.bonus_path + 2.0 * s.bonus_consecutive + 3.0 * s.gap_trailing;
	assert_close(get_score("Foo", "FooBar"), expected);
}

#[test]
fn consecutive_run_beats_scattered_match() {
	assert!(get_score("abc", "xabcx") > get_score("abc", "xaxbxcx"));
	assert!(get_score("ab", "zab") > get_score("ab", "azzb"));
}

#[test]
fn boundary_bonuses() {
	let s = Scoring::default();
	assert_close(get_score("b", "a/b"), s.bonus_path);
	assert_close(get_score("b", "a_b"), s.bonus_word);
	assert_close(get_score("b", "a-b"), s.bonus_word);
	assert_close(get_score("b", "a b"), s.bonus_word);
	assert_close(get_score("b", "a.b"), s.bonus_dot);
	assert_close(get_score("b", "aB"), s.bonus_camel);
	assert_close(get_score("b", "ab"), 0.0);
}

#[test]
fn boundary_bonuses_are_ordered() {
	assert!(get_score("b", "a/b") > get_score("b", "a_b"));
	assert!(get_score("b", "a_b") > get_score("b", "aB"));
	assert!(get_score("b", "aB") > get_score("b", "a.b"));
	assert!(get_score("b", "a.b") > get_score("b", "ab"));
}

#[test]
fn first_character_gets_path_bonus() {
	let s = Scoring::default();
	assert_close(get_score("a", "abc"), s.bonus_path + 2.0 * s.gap_trailing);
	assert_close(get_score("m", "main.lua"), s.bonus_path + 7.0 * s.gap_trailing);
}

#[test]
fn interior_gaps_cost_more_than_trailing_gaps() {
	let s = Scoring::default();
	// One interior gap between the matches vs one trailing gap after them.
	let interior = get_score("ac", "abc");
	let trailing = get_score("ab", "abc");
	assert_close(interior, s.bonus_path + s.gap_inner);
	assert_close(trailing, s.bonus_path + s.bonus_consecutive + s.gap_trailing);
	assert!(interior < trailing);
}

#[test]
fn camel_case_boundary_is_rewarded() {
	assert!(get_score("d", "forDist") > get_score("d", "fordist"));
}

#[test]
fn unicode_flows_through() {
	assert_eq!(get_score("über", "über"), EXACT_MATCH_SCORE);
	assert!(score("ü", "grün", &Scoring::default()).is_some());
	assert_eq!(score("ü", "green", &Scoring::default()), None);
}
