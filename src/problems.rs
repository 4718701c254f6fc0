//! Sliding-window problems built on the engines in [`crate::window`].
//!
//! String problems operate on `char`s, so reported windows are char
//! indices, not byte offsets.

use tracing::debug;

use crate::error::{ScanError, ScanResult};
use crate::window::state::{Coverage, Frequency, RunningProduct, RunningSum};
use crate::window::variable::{Best, Objective, Scanner};
use crate::window::Window;

/// A window over a string plus the text it covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Match {
    pub window: Window,
    pub text: String,
}

impl Match {
    fn from_chars(chars: &[char], window: Window) -> Self {
        Self {
            window,
            text: window.slice(chars).iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

// =============================================================================
// Milestone 1: Longest window under a constraint
// =============================================================================

/// Longest window whose slice satisfies `predicate`.
///
/// `predicate` must be monotone: if a window satisfies it, so does every
/// sub-window. Ties keep the leftmost window. When no non-empty window
/// satisfies `predicate` (including empty input) the result is `[0, 0)`.
pub fn longest_window_satisfying<T, P>(sequence: &[T], predicate: P) -> Window
where
    P: Fn(&[T]) -> bool,
{
    let mut best = Best::longest();
    Scanner::new(sequence, (), Objective::Longest).scan(
        |_, window| predicate(window.slice(sequence)),
        |_, window| {
            best.offer(window);
        },
    );
    best.get().unwrap_or_default()
}

fn longest_by_frequency<P>(s: &str, valid: P) -> Match
where
    P: Fn(&Frequency<char>, Window) -> bool,
{
    let chars: Vec<char> = s.chars().collect();
    let mut best = Best::longest();
    Scanner::new(&chars, Frequency::<char>::new(), Objective::Longest).scan(valid, |_, window| {
        best.offer(window);
    });
    Match::from_chars(&chars, best.get().unwrap_or_default())
}

pub fn longest_substring_without_repeat(s: &str) -> Match {
    longest_by_frequency(s, |freq, _| !freq.has_duplicates())
}

pub fn longest_with_at_most_k_distinct(s: &str, k: usize) -> Match {
    longest_by_frequency(s, |freq, _| freq.distinct() <= k)
}

/// Longest run of one repeated character after replacing at most `k` others.
pub fn longest_repeating_replacement(s: &str, k: usize) -> Match {
    longest_by_frequency(s, |freq, window| window.len() - freq.max_count() <= k)
}

// =============================================================================
// Milestone 2: Shortest window meeting a constraint
// =============================================================================

/// Shortest substring of `s` containing every char of `t`, counting
/// multiplicity.
pub fn min_window_substring(s: &str, t: &str) -> ScanResult<Option<String>> {
    if t.is_empty() {
        return Err(ScanError::EmptyInput("pattern"));
    }
    let chars: Vec<char> = s.chars().collect();
    let required: Vec<char> = t.chars().collect();

    let mut best = Best::shortest();
    Scanner::new(&chars, Coverage::new(&required), Objective::Shortest).scan(
        |coverage, _| coverage.is_covered(),
        |_, window| {
            best.offer(window);
        },
    );
    Ok(best
        .get()
        .map(|window| window.slice(&chars).iter().collect()))
}

/// Shortest non-empty window whose sum reaches `target`.
pub fn min_subarray_with_sum_at_least(nums: &[u64], target: u64) -> Option<Window> {
    let target = u128::from(target);
    let mut best = Best::shortest();
    Scanner::new(nums, RunningSum::<u64>::new(), Objective::Shortest).scan(
        |sum, window| !window.is_empty() && sum.total() >= target,
        |_, window| {
            best.offer(window);
        },
    );
    best.get()
}

// =============================================================================
// Milestone 3: Counting and enumerating windows
// =============================================================================

/// Number of contiguous subarrays whose product is strictly below `k`.
///
/// Every element must be positive.
pub fn count_subarrays_with_product_below(nums: &[u64], k: u64) -> ScanResult<u64> {
    if let Some(index) = nums.iter().position(|&n| n == 0) {
        return Err(ScanError::NonPositiveElement { index });
    }
    if k <= 1 {
        return Ok(0);
    }
    let limit = u128::from(k);
    let mut count = 0u64;
    Scanner::new(nums, RunningProduct::new(), Objective::Longest).scan(
        |product, _| product.product() < limit,
        |_, window| count += window.len() as u64,
    );
    Ok(count)
}

/// Start indices (in chars) of every anagram of `p` inside `s`.
pub fn find_all_anagrams(s: &str, p: &str) -> ScanResult<Vec<usize>> {
    if p.is_empty() {
        return Err(ScanError::EmptyInput("pattern"));
    }
    let chars: Vec<char> = s.chars().collect();
    let pattern: Vec<char> = p.chars().collect();
    let coverage = Coverage::new(&pattern);
    let size = coverage.required_len();

    let mut starts = Vec::new();
    Scanner::new(&chars, coverage, Objective::Longest).scan(
        |_, window| window.len() <= size,
        |coverage, window| {
            if window.len() == size && coverage.is_covered() {
                starts.push(window.left);
            }
        },
    );
    debug!(pattern = p, found = starts.len(), "anagram scan");
    Ok(starts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    // ----- Milestone 1 -----
    #[test]
    fn test_longest_without_repeat_scenarios() {
        let m = longest_substring_without_repeat("abcabcbb");
        assert_eq!(m.len(), 3);
        assert_eq!(m.text, "abc");
        assert_eq!(m.window, Window::new(0, 3));

        assert_eq!(longest_substring_without_repeat("bbbbb").text, "b");
        assert_eq!(longest_substring_without_repeat("pwwkew").text, "wke");
    }

    #[test]
    fn test_longest_without_repeat_empty_input() {
        let m = longest_substring_without_repeat("");
        assert!(m.is_empty());
        assert_eq!(m, Match::default());
    }

    #[test]
    fn test_longest_without_repeat_unicode() {
        let m = longest_substring_without_repeat("héllo");
        assert_eq!(m.text, "hél");
        assert_eq!(m.window, Window::new(0, 3));
    }

    #[test]
    fn test_longest_k_distinct() {
        assert_eq!(longest_with_at_most_k_distinct("eceba", 2).text, "ece");
        assert_eq!(longest_with_at_most_k_distinct("aa", 1).text, "aa");
        assert_eq!(longest_with_at_most_k_distinct("abc", 0), Match::default());
    }

    #[test]
    fn test_longest_repeating_replacement() {
        assert_eq!(longest_repeating_replacement("ABAB", 2).len(), 4);
        let m = longest_repeating_replacement("AABABBA", 1);
        assert_eq!(m.len(), 4);
        assert_eq!(m.text, "AABA");
    }

    #[test]
    fn test_longest_window_satisfying_sum_bound() {
        let nums = [3, 1, 2, 7, 4, 2, 1, 1, 5];
        let w = longest_window_satisfying(&nums, |s| s.iter().sum::<i32>() <= 8);
        assert_eq!(w, Window::new(4, 8));
        assert_eq!(longest_window_satisfying::<i32, _>(&[], |_| true), Window::empty());
    }

    #[test]
    fn test_longest_window_no_match_is_canonical_empty() {
        let w = longest_window_satisfying(&[9, 9, 9], |s| s.iter().all(|&v| v < 5));
        assert_eq!(w, Window::empty());
    }

    #[test]
    fn test_longest_window_tie_keeps_leftmost() {
        let nums = [1, 1, 9, 1, 1];
        let w = longest_window_satisfying(&nums, |s| s.iter().sum::<i32>() <= 2);
        assert_eq!(w, Window::new(0, 2));
    }

    // ----- Milestone 2 -----
    #[test]
    fn test_min_window_substring_scenario() {
        assert_eq!(
            min_window_substring("ADOBECODEBANC", "ABC"),
            Ok(Some("BANC".to_string()))
        );
    }

    #[test]
    fn test_min_window_substring_edge_cases() {
        assert_eq!(min_window_substring("a", "a"), Ok(Some("a".to_string())));
        assert_eq!(min_window_substring("a", "aa"), Ok(None));
        assert_eq!(min_window_substring("", "a"), Ok(None));
        assert_eq!(
            min_window_substring("abc", ""),
            Err(ScanError::EmptyInput("pattern"))
        );
    }

    #[test]
    fn test_min_subarray_sum() {
        assert_eq!(
            min_subarray_with_sum_at_least(&[2, 3, 1, 2, 4, 3], 7),
            Some(Window::new(4, 6))
        );
        assert_eq!(min_subarray_with_sum_at_least(&[1, 1, 1], 11), None);
        assert_eq!(min_subarray_with_sum_at_least(&[1, 4, 4], 4), Some(Window::new(1, 2)));
    }

    #[test]
    fn test_min_subarray_sum_past_u64_max() {
        assert_eq!(
            min_subarray_with_sum_at_least(&[1, u64::MAX], u64::MAX),
            Some(Window::new(1, 2))
        );
        assert_eq!(
            min_subarray_with_sum_at_least(&[u64::MAX - 1, u64::MAX - 1, 3], u64::MAX),
            Some(Window::new(0, 2))
        );
    }

    // ----- Milestone 3 -----
    #[test]
    fn test_count_product_below() {
        assert_eq!(count_subarrays_with_product_below(&[10, 5, 2, 6], 100), Ok(8));
        assert_eq!(count_subarrays_with_product_below(&[1, 2, 3], 0), Ok(0));
        assert_eq!(count_subarrays_with_product_below(&[1, 1, 1], 2), Ok(6));
        assert_eq!(
            count_subarrays_with_product_below(&[3, 0, 2], 10),
            Err(ScanError::NonPositiveElement { index: 1 })
        );
    }

    #[test]
    fn test_find_all_anagrams() {
        assert_eq!(find_all_anagrams("abab", "ab"), Ok(vec![0, 1, 2]));
        assert_eq!(find_all_anagrams("cbaebabacd", "abc"), Ok(vec![0, 6]));
        assert_eq!(find_all_anagrams("ab", "abc"), Ok(vec![]));
        assert!(find_all_anagrams("ab", "").is_err());
    }

    fn brute_longest_unique(s: &str) -> usize {
        let chars: Vec<char> = s.chars().collect();
        let mut best = 0;
        for i in 0..chars.len() {
            let mut seen = HashSet::new();
            for c in &chars[i..] {
                if !seen.insert(*c) {
                    break;
                }
            }
            best = best.max(seen.len());
        }
        best
    }

    proptest! {
        #[test]
        fn prop_longest_unique_is_bounded_and_optimal(s in "[a-e]{0,24}") {
            let m = longest_substring_without_repeat(&s);
            let distinct = s.chars().collect::<HashSet<_>>().len();
            prop_assert!(m.len() <= distinct);
            prop_assert!(m.len() <= s.chars().count());
            prop_assert_eq!(m.len(), brute_longest_unique(&s));
            prop_assert_eq!(m.text.chars().collect::<HashSet<_>>().len(), m.len());
        }

        #[test]
        fn prop_anagram_starts_match_sorted_windows(s in "[ab]{0,16}", p in "[ab]{1,4}") {
            let chars: Vec<char> = s.chars().collect();
            let mut target: Vec<char> = p.chars().collect();
            target.sort_unstable();
            let expected: Vec<usize> = if chars.len() < target.len() {
                vec![]
            } else {
                chars
                    .windows(target.len())
                    .enumerate()
                    .filter(|(_, w)| {
                        let mut w = w.to_vec();
                        w.sort_unstable();
                        w == target
                    })
                    .map(|(i, _)| i)
                    .collect()
            };
            prop_assert_eq!(find_all_anagrams(&s, &p).unwrap(), expected);
        }
    }
}
