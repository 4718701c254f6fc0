//! Incrementally maintained window state.
//!
//! Each struct is owned by exactly one scan and is only touched through
//! [`WindowState::add`] (the right edge moved) and [`WindowState::remove`]
//! (the left edge moved).

use num_traits::Zero;
use rustc_hash::FxHashMap;
use std::hash::Hash;

use super::Widen;

pub trait WindowState<T> {
    fn add(&mut self, item: &T);
    fn remove(&mut self, item: &T);
}

/// Stateless windows, for predicates that only look at bounds or the slice.
impl<T> WindowState<T> for () {
    fn add(&mut self, _item: &T) {}
    fn remove(&mut self, _item: &T) {}
}

// =============================================================================
// Frequency map
// =============================================================================

#[derive(Debug, Clone)]
pub struct Frequency<K> {
    counts: FxHashMap<K, usize>,
    len: usize,
}

impl<K: Hash + Eq + Clone> Frequency<K> {
    pub fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
            len: 0,
        }
    }

    pub fn count(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of keys with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total number of items in the window.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when some key occurs more than once.
    pub fn has_duplicates(&self) -> bool {
        self.distinct() < self.len
    }

    /// Highest count of any single key. O(distinct).
    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }
}

impl<K: Hash + Eq + Clone> Default for Frequency<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone> WindowState<K> for Frequency<K> {
    fn add(&mut self, item: &K) {
        *self.counts.entry(item.clone()).or_insert(0) += 1;
        self.len += 1;
    }

    fn remove(&mut self, item: &K) {
        if let Some(count) = self.counts.get_mut(item) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(item);
            }
            self.len -= 1;
        }
    }
}

// =============================================================================
// Coverage of a required multiset
// =============================================================================

/// Tracks whether the window contains every required key at least as many
/// times as required.
#[derive(Debug, Clone)]
pub struct Coverage<K> {
    required: FxHashMap<K, usize>,
    window: FxHashMap<K, usize>,
    satisfied: usize,
}

impl<K: Hash + Eq + Clone> Coverage<K> {
    pub fn new<'a, I>(required: I) -> Self
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut counts = FxHashMap::default();
        for key in required {
            *counts.entry(key.clone()).or_insert(0) += 1;
        }
        Self {
            required: counts,
            window: FxHashMap::default(),
            satisfied: 0,
        }
    }

    pub fn is_covered(&self) -> bool {
        self.satisfied == self.required.len()
    }

    /// Total required items, counting multiplicity.
    pub fn required_len(&self) -> usize {
        self.required.values().sum()
    }
}

impl<K: Hash + Eq + Clone> WindowState<K> for Coverage<K> {
    fn add(&mut self, item: &K) {
        let Some(&needed) = self.required.get(item) else {
            return;
        };
        let have = self.window.entry(item.clone()).or_insert(0);
        *have += 1;
        if *have == needed {
            self.satisfied += 1;
        }
    }

    fn remove(&mut self, item: &K) {
        let Some(&needed) = self.required.get(item) else {
            return;
        };
        if let Some(have) = self.window.get_mut(item) {
            if *have == needed {
                self.satisfied -= 1;
            }
            *have -= 1;
        }
    }
}

// =============================================================================
// Running sum and product
// =============================================================================

/// Window total in `T::Wide`, so `u64` windows may sum past `u64::MAX`.
#[derive(Debug, Clone, Copy)]
pub struct RunningSum<T: Widen> {
    total: T::Wide,
}

impl<T: Widen> RunningSum<T> {
    pub fn new() -> Self {
        Self {
            total: T::Wide::zero(),
        }
    }

    pub fn total(&self) -> T::Wide {
        self.total
    }
}

impl<T: Widen> Default for RunningSum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Widen> WindowState<T> for RunningSum<T> {
    fn add(&mut self, item: &T) {
        self.total += item.widen();
    }

    fn remove(&mut self, item: &T) {
        self.total -= item.widen();
    }
}

/// Product of positive integers.
///
/// Stored as `u128` so one extra factor on top of a product below
/// `u64::MAX` cannot overflow.
#[derive(Debug, Clone, Copy)]
pub struct RunningProduct {
    product: u128,
}

impl RunningProduct {
    pub fn new() -> Self {
        Self { product: 1 }
    }

    pub fn product(&self) -> u128 {
        self.product
    }
}

impl Default for RunningProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowState<u64> for RunningProduct {
    fn add(&mut self, item: &u64) {
        self.product = self.product.saturating_mul(u128::from(*item));
    }

    fn remove(&mut self, item: &u64) {
        if *item != 0 {
            self.product /= u128::from(*item);
        }
    }
}
