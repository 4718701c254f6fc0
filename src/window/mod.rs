//! Sliding-window scanning over slices.
//!
//! [`fixed`] slides a window of constant size and maintains an aggregate in
//! O(1) amortised per step. [`variable`] runs the two-pointer
//! expand/contract engine that the problems in [`crate::problems`] share.

pub mod fixed;
pub mod state;
pub mod variable;

use num_traits::Zero;
use std::fmt;
use std::ops::{AddAssign, Range, SubAssign};

/// Half-open index range `[left, right)` over a sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Window {
    pub left: usize,
    pub right: usize,
}

impl Window {
    pub fn new(left: usize, right: usize) -> Self {
        debug_assert!(left <= right, "Window::new: left {} > right {}", left, right);
        Self { left, right }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.right - self.left
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left == self.right
    }

    pub fn range(&self) -> Range<usize> {
        self.left..self.right
    }

    pub fn slice<'a, T>(&self, sequence: &'a [T]) -> &'a [T] {
        &sequence[self.range()]
    }

    /// True when `self` is strictly longer than `other`.
    ///
    /// Used for "first optimum wins" tie-breaking.
    pub fn longer_than(&self, other: &Window) -> bool {
        self.len() > other.len()
    }

    pub fn shorter_than(&self, other: &Window) -> bool {
        self.len() < other.len()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.left, self.right)
    }
}

/// Integer element types whose window sums are accumulated in a wider type.
///
/// A window of `i64` values can sum past `i64::MAX` even when the final
/// answer fits, so sums are carried as `i128` (`u128` for unsigned types)
/// and narrowed once at the end.
pub trait Widen: Copy {
    type Wide: Copy + fmt::Debug + Default + PartialOrd + Zero + AddAssign + SubAssign;

    fn widen(self) -> Self::Wide;

    /// `None` when `wide` does not fit in `Self`.
    fn narrow(wide: Self::Wide) -> Option<Self>;
}

macro_rules! impl_widen {
    ($wide:ty => $($t:ty),+) => {
        $(
            impl Widen for $t {
                type Wide = $wide;

                fn widen(self) -> $wide {
                    <$wide>::from(self)
                }

                fn narrow(wide: $wide) -> Option<Self> {
                    <$t>::try_from(wide).ok()
                }
            }
        )+
    };
}

impl_widen!(i128 => i8, i16, i32, i64);
impl_widen!(u128 => u8, u16, u32, u64);
