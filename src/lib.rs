//! Matrix zero propagation and sliding-window scanning.
//!
//! ```
//! use slidewise::prelude::*;
//!
//! let mut m = vec![vec![1, 0, 3], vec![4, 5, 6]];
//! zero_matrix(&mut m)?;
//! assert_eq!(m, vec![vec![0, 0, 0], vec![4, 0, 6]]);
//!
//! assert_eq!(max_fixed_window_sum(&[1, 4, 2, 9, 5, 10, 3], 3)?, 24);
//! assert_eq!(longest_substring_without_repeat("abcabcbb").len(), 3);
//! assert_eq!(min_window_substring("ADOBECODEBANC", "ABC")?.as_deref(), Some("BANC"));
//! # Ok::<(), ScanError>(())
//! ```

pub mod config;
pub mod error;
pub mod matrix;
pub mod problems;
pub mod trace;
pub mod window;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{ConfigError, ScanError, ScanResult};
    pub use crate::matrix::{zero_matrix, AuxSets, ConstantSpace, MatrixZeroer, ZeroStrategy};
    pub use crate::problems::{
        count_subarrays_with_product_below, find_all_anagrams, longest_repeating_replacement,
        longest_substring_without_repeat, longest_window_satisfying,
        longest_with_at_most_k_distinct, min_subarray_with_sum_at_least, min_window_substring,
        Match,
    };
    pub use crate::trace::ScanTrace;
    pub use crate::window::fixed::{
        aggregate, max_average, max_fixed_window_sum, window_averages, window_maxima,
        window_minima, window_sums, Aggregate, Max, Min, Sum,
    };
    pub use crate::window::state::WindowState;
    pub use crate::window::variable::{Best, Objective, Scanner};
    pub use crate::window::{Widen, Window};
}
