//! Fixed-size sliding windows.
//!
//! The first window is aggregated directly; every later window is derived
//! from its predecessor by one `leave` and one `enter`. Sums just subtract.
//! Maxima and minima are not invertible, so [`Monotonic`] keeps a deque of
//! candidates instead.

use num_traits::Zero;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use tracing::debug;

use super::Widen;
use crate::error::{ScanError, ScanResult};

// =============================================================================
// Milestone 1: Aggregates
// =============================================================================

pub trait Aggregate<T> {
    type Output;

    /// `value` at `index` entered the window on the right.
    fn enter(&mut self, index: usize, value: &T);

    /// `value` at `index` left the window on the left.
    fn leave(&mut self, index: usize, value: &T);

    /// Aggregate of the current window, `None` while it is empty.
    fn current(&self) -> Option<Self::Output>;

    fn reset(&mut self);
}

/// Running total, carried in `T::Wide` so intermediate sums never overflow.
#[derive(Debug, Clone)]
pub struct Sum<T: Widen> {
    total: T::Wide,
    count: usize,
}

impl<T: Widen> Sum<T> {
    pub fn new() -> Self {
        Self {
            total: T::Wide::zero(),
            count: 0,
        }
    }
}

impl<T: Widen> Default for Sum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Widen> Aggregate<T> for Sum<T> {
    type Output = T::Wide;

    fn enter(&mut self, _index: usize, value: &T) {
        self.total += value.widen();
        self.count += 1;
    }

    fn leave(&mut self, _index: usize, value: &T) {
        self.total -= value.widen();
        self.count -= 1;
    }

    fn current(&self) -> Option<T::Wide> {
        (self.count > 0).then_some(self.total)
    }

    fn reset(&mut self) {
        self.total = T::Wide::zero();
        self.count = 0;
    }
}

/// Ordering used by [`Monotonic`]: whether a newly entered value makes an
/// older resident useless as a future answer.
pub trait Extremum {
    fn supersedes<T: Ord>(incoming: &T, resident: &T) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Largest;

#[derive(Debug, Clone, Copy, Default)]
pub struct Smallest;

impl Extremum for Largest {
    fn supersedes<T: Ord>(incoming: &T, resident: &T) -> bool {
        incoming >= resident
    }
}

impl Extremum for Smallest {
    fn supersedes<T: Ord>(incoming: &T, resident: &T) -> bool {
        incoming <= resident
    }
}

/// Monotonic deque of `(index, value)` candidates.
///
/// Values are kept in `E` order from front to back and indices increase, so
/// the front is always the window's answer.
#[derive(Debug, Clone)]
pub struct Monotonic<T, E> {
    deque: VecDeque<(usize, T)>,
    _order: PhantomData<E>,
}

pub type Max<T> = Monotonic<T, Largest>;
pub type Min<T> = Monotonic<T, Smallest>;

impl<T, E> Monotonic<T, E> {
    pub fn new() -> Self {
        Self {
            deque: VecDeque::new(),
            _order: PhantomData,
        }
    }

    /// Candidates currently held. Never exceeds the window length.
    pub fn candidates(&self) -> usize {
        self.deque.len()
    }
}

impl<T, E> Default for Monotonic<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone, E: Extremum> Aggregate<T> for Monotonic<T, E> {
    type Output = T;

    fn enter(&mut self, index: usize, value: &T) {
        while self
            .deque
            .back()
            .is_some_and(|(_, resident)| E::supersedes(value, resident))
        {
            self.deque.pop_back();
        }
        self.deque.push_back((index, value.clone()));
    }

    fn leave(&mut self, index: usize, _value: &T) {
        if self.deque.front().is_some_and(|&(front, _)| front == index) {
            self.deque.pop_front();
        }
    }

    fn current(&self) -> Option<T> {
        self.deque.front().map(|(_, value)| value.clone())
    }

    fn reset(&mut self) {
        self.deque.clear();
    }
}

/// Any group-like combine: `inverse(combine(a, b), b) == a`.
#[derive(Clone)]
pub struct Invertible<T, F, G> {
    identity: T,
    acc: T,
    count: usize,
    combine: F,
    inverse: G,
}

impl<T, F, G> Invertible<T, F, G>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
    G: Fn(&T, &T) -> T,
{
    pub fn new(identity: T, combine: F, inverse: G) -> Self {
        Self {
            acc: identity.clone(),
            identity,
            count: 0,
            combine,
            inverse,
        }
    }
}

impl<T, F, G> Aggregate<T> for Invertible<T, F, G>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
    G: Fn(&T, &T) -> T,
{
    type Output = T;

    fn enter(&mut self, _index: usize, value: &T) {
        self.acc = (self.combine)(&self.acc, value);
        self.count += 1;
    }

    fn leave(&mut self, _index: usize, value: &T) {
        self.acc = (self.inverse)(&self.acc, value);
        self.count -= 1;
    }

    fn current(&self) -> Option<T> {
        (self.count > 0).then(|| self.acc.clone())
    }

    fn reset(&mut self) {
        self.acc = self.identity.clone();
        self.count = 0;
    }
}

// =============================================================================
// Milestone 2: Lazy window iterator
// =============================================================================

/// One aggregate per window start, `len - size + 1` in total.
#[derive(Debug, Clone)]
pub struct FixedWindows<'a, T, A> {
    sequence: &'a [T],
    size: usize,
    next_start: usize,
    agg: A,
}

impl<'a, T, A: Aggregate<T>> FixedWindows<'a, T, A> {
    pub fn window_size(&self) -> usize {
        self.size
    }

    /// Rewinds to the first window.
    pub fn restart(&mut self) {
        self.agg.reset();
        self.next_start = 0;
    }

    fn total_windows(&self) -> usize {
        self.sequence.len() + 1 - self.size
    }
}

impl<'a, T, A: Aggregate<T>> Iterator for FixedWindows<'a, T, A> {
    type Item = A::Output;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start;
        if start + self.size > self.sequence.len() {
            return None;
        }

        if start == 0 {
            for (index, value) in self.sequence[..self.size].iter().enumerate() {
                self.agg.enter(index, value);
            }
        } else {
            let outgoing = start - 1;
            let incoming = start + self.size - 1;
            self.agg.leave(outgoing, &self.sequence[outgoing]);
            self.agg.enter(incoming, &self.sequence[incoming]);
        }

        self.next_start += 1;
        self.agg.current()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_windows().saturating_sub(self.next_start);
        (remaining, Some(remaining))
    }
}

impl<'a, T, A: Aggregate<T>> ExactSizeIterator for FixedWindows<'a, T, A> {}

impl<'a, T, A: Aggregate<T>> FusedIterator for FixedWindows<'a, T, A> {}

/// Aggregates every window of `window_size` elements.
///
/// Fails with [`ScanError::InvalidWindowSize`] when `window_size` is zero or
/// longer than the sequence.
pub fn aggregate<T, A: Aggregate<T>>(
    sequence: &[T],
    window_size: usize,
    mut agg: A,
) -> ScanResult<FixedWindows<'_, T, A>> {
    if window_size == 0 || window_size > sequence.len() {
        return Err(ScanError::InvalidWindowSize {
            size: window_size,
            len: sequence.len(),
        });
    }
    agg.reset();
    debug!(
        len = sequence.len(),
        window_size,
        windows = sequence.len() - window_size + 1,
        "fixed window scan"
    );
    Ok(FixedWindows {
        sequence,
        size: window_size,
        next_start: 0,
        agg,
    })
}

// =============================================================================
// Milestone 3: Common queries
// =============================================================================

fn narrow_sum<T: Widen>(start: usize, sum: T::Wide) -> ScanResult<T> {
    T::narrow(sum).ok_or(ScanError::Overflow { start })
}

/// Fails with [`ScanError::Overflow`] at the first window whose sum does not
/// fit in `i64`.
pub fn window_sums(sequence: &[i64], k: usize) -> ScanResult<Vec<i64>> {
    aggregate(sequence, k, Sum::new())?
        .enumerate()
        .map(|(start, sum)| narrow_sum::<i64>(start, sum))
        .collect()
}

pub fn window_maxima<T: Ord + Clone>(sequence: &[T], k: usize) -> ScanResult<Vec<T>> {
    Ok(aggregate(sequence, k, Max::new())?.collect())
}

pub fn window_minima<T: Ord + Clone>(sequence: &[T], k: usize) -> ScanResult<Vec<T>> {
    Ok(aggregate(sequence, k, Min::new())?.collect())
}

pub fn window_averages(sequence: &[i64], k: usize) -> ScanResult<Vec<f64>> {
    Ok(aggregate(sequence, k, Sum::new())?
        .map(|sum| sum as f64 / k as f64)
        .collect())
}

// First window with the largest wide sum.
fn best_window_sum(sequence: &[i64], k: usize) -> ScanResult<(usize, i128)> {
    aggregate(sequence, k, Sum::new())?
        .enumerate()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .ok_or(ScanError::EmptyInput("sequence"))
}

/// Largest sum over all windows of `k` consecutive elements.
///
/// Intermediate sums may exceed `i64`; only a largest sum that does not fit
/// is an error.
pub fn max_fixed_window_sum(sequence: &[i64], k: usize) -> ScanResult<i64> {
    let (start, sum) = best_window_sum(sequence, k)?;
    narrow_sum(start, sum)
}

pub fn max_average(sequence: &[i64], k: usize) -> ScanResult<f64> {
    let (_, sum) = best_window_sum(sequence, k)?;
    Ok(sum as f64 / k as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ----- Milestone 1 -----
    #[test]
    fn test_sum_aggregate_tracks_count() {
        let mut sum = Sum::<i64>::new();
        assert_eq!(sum.current(), None);
        sum.enter(0, &3i64);
        sum.enter(1, &4);
        sum.leave(0, &3);
        assert_eq!(sum.current(), Some(4));
        sum.reset();
        assert_eq!(sum.current(), None);
    }

    #[test]
    fn test_monotonic_deque_keeps_candidates_bounded() {
        let mut max = Max::<i32>::new();
        for (i, v) in [5, 4, 3, 6].iter().enumerate() {
            max.enter(i, v);
        }
        assert_eq!(max.candidates(), 1);
        assert_eq!(max.current(), Some(6));
    }

    #[test]
    fn test_monotonic_leave_ignores_evicted_index() {
        let mut max = Max::<i32>::new();
        max.enter(0, &1i32);
        max.enter(1, &9);
        max.leave(0, &1);
        assert_eq!(max.current(), Some(9));
    }

    #[test]
    fn test_invertible_xor() {
        let xs = [1u32, 2, 4, 8, 16];
        let xor = Invertible::new(0u32, |a: &u32, b: &u32| a ^ b, |a: &u32, b: &u32| a ^ b);
        let out: Vec<u32> = aggregate(&xs, 2, xor).unwrap().collect();
        assert_eq!(out, vec![3, 6, 12, 24]);
    }

    // ----- Milestone 2 -----
    #[test]
    fn test_max_fixed_window_sum_scenario() {
        assert_eq!(max_fixed_window_sum(&[1, 4, 2, 9, 5, 10, 3], 3), Ok(24));
    }

    #[test]
    fn test_window_count_and_exact_size() {
        let seq = [1i64, 2, 3, 4, 5];
        let mut windows = aggregate(&seq, 2, Sum::new()).unwrap();
        assert_eq!(windows.len(), 4);
        windows.next();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows.collect::<Vec<_>>(), vec![5, 7, 9]);
    }

    #[test]
    fn test_restart_replays_from_first_window() {
        let seq = [4i64, 1, 7, 3];
        let mut windows = aggregate(&seq, 3, Sum::new()).unwrap();
        let first: Vec<_> = windows.by_ref().collect();
        assert_eq!(windows.next(), None);
        windows.restart();
        let second: Vec<_> = windows.collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![12, 11]);
    }

    #[test]
    fn test_invalid_window_sizes() {
        assert_eq!(
            window_sums(&[1, 2, 3], 0),
            Err(ScanError::InvalidWindowSize { size: 0, len: 3 })
        );
        assert_eq!(
            window_sums(&[1, 2, 3], 4),
            Err(ScanError::InvalidWindowSize { size: 4, len: 3 })
        );
        assert!(window_sums(&[], 1).is_err());
    }

    #[test]
    fn test_window_equal_to_length_yields_one_value() {
        assert_eq!(window_sums(&[2, 3, 5], 3), Ok(vec![10]));
    }

    // ----- Milestone 3 -----
    #[test]
    fn test_window_maxima_and_minima() {
        let seq = [1, 3, -1, -3, 5, 3, 6, 7];
        assert_eq!(window_maxima(&seq, 3), Ok(vec![3, 3, 5, 5, 6, 7]));
        assert_eq!(window_minima(&seq, 3), Ok(vec![-1, -3, -3, -3, 3, 3]));
    }

    #[test]
    fn test_window_averages_and_max_average() {
        assert_eq!(window_averages(&[1, 3, 5], 2), Ok(vec![2.0, 4.0]));
        let avg = max_average(&[1, 12, -5, -6, 50, 3], 4).unwrap();
        assert!((avg - 12.75).abs() < 1e-9);
    }

    #[test]
    fn test_sums_past_i64_max() {
        assert_eq!(
            max_fixed_window_sum(&[i64::MAX, 1, -5], 2),
            Err(ScanError::Overflow { start: 0 })
        );
        assert_eq!(
            window_sums(&[-5, i64::MAX, 1], 2),
            Err(ScanError::Overflow { start: 1 })
        );
        // The first window overflows i64 midway but its total fits.
        assert_eq!(
            max_fixed_window_sum(&[i64::MAX, i64::MAX, i64::MIN + 1], 3),
            Ok(i64::MAX)
        );
        assert_eq!(window_sums(&[i64::MIN, i64::MAX, -1], 2), Ok(vec![-1, i64::MAX - 1]));
        let avg = max_average(&[i64::MAX, i64::MAX], 2).unwrap();
        assert_eq!(avg, i64::MAX as f64);
    }

    proptest! {
        #[test]
        fn prop_max_sum_matches_brute_force(
            seq in prop::collection::vec(-50i64..50, 1..40),
            k_seed in 0usize..40,
        ) {
            let k = k_seed % seq.len() + 1;
            let expected = seq.windows(k).map(|w| w.iter().sum::<i64>()).max().unwrap();
            prop_assert_eq!(max_fixed_window_sum(&seq, k).unwrap(), expected);
        }

        #[test]
        fn prop_deque_max_matches_naive(
            seq in prop::collection::vec(-20i32..20, 1..40),
            k_seed in 0usize..40,
        ) {
            let k = k_seed % seq.len() + 1;
            let naive: Vec<i32> = seq.windows(k).map(|w| *w.iter().max().unwrap()).collect();
            let naive_min: Vec<i32> = seq.windows(k).map(|w| *w.iter().min().unwrap()).collect();
            prop_assert_eq!(window_maxima(&seq, k).unwrap(), naive);
            prop_assert_eq!(window_minima(&seq, k).unwrap(), naive_min);
        }
    }
}
