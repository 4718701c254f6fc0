//! Zero propagation over rectangular integer matrices.
//!
//! Every cell whose row or column contains a zero in the *original* matrix is
//! overwritten with zero. Two interchangeable implementations are provided
//! behind [`MatrixZeroer`]; they always produce identical results and differ
//! only in auxiliary space.

use itertools::iproduct;
use num_traits::Zero;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

use crate::error::{ScanError, ScanResult};

// =============================================================================
// Milestone 1: Shape validation and zero discovery
// =============================================================================

/// Checks that every row has the same length as the first.
///
/// Returns `(rows, cols)`. An empty matrix is `(0, 0)`.
pub fn validate_shape<T>(matrix: &[Vec<T>]) -> ScanResult<(usize, usize)> {
    let cols = matrix.first().map_or(0, Vec::len);
    for (row, values) in matrix.iter().enumerate() {
        if values.len() != cols {
            return Err(ScanError::InvalidShape {
                row,
                expected: cols,
                found: values.len(),
            });
        }
    }
    Ok((matrix.len(), cols))
}

/// Row and column indices that contain at least one zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZeroLines {
    pub rows: FxHashSet<usize>,
    pub cols: FxHashSet<usize>,
}

impl ZeroLines {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }

    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.rows.contains(&row) || self.cols.contains(&col)
    }

    pub fn sorted_rows(&self) -> Vec<usize> {
        let mut rows: Vec<_> = self.rows.iter().copied().collect();
        rows.sort_unstable();
        rows
    }

    pub fn sorted_cols(&self) -> Vec<usize> {
        let mut cols: Vec<_> = self.cols.iter().copied().collect();
        cols.sort_unstable();
        cols
    }
}

pub fn zero_lines<T: Zero>(matrix: &[Vec<T>]) -> ScanResult<ZeroLines> {
    validate_shape(matrix)?;
    Ok(find_zero_lines(matrix))
}

// Caller has already validated the shape.
fn find_zero_lines<T: Zero>(matrix: &[Vec<T>]) -> ZeroLines {
    let mut lines = ZeroLines::default();
    for (i, row) in matrix.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            if value.is_zero() {
                lines.rows.insert(i);
                lines.cols.insert(j);
            }
        }
    }
    lines
}

// =============================================================================
// Milestone 2: The zeroing contract and its two implementations
// =============================================================================

/// In-place zero propagation.
///
/// Implementations validate the shape before writing anything, so a
/// malformed matrix is returned untouched alongside the error.
pub trait MatrixZeroer {
    fn zero<'m, T: Zero + Copy>(&self, matrix: &'m mut [Vec<T>]) -> ScanResult<&'m mut [Vec<T>]>;

    fn name(&self) -> &'static str;
}

/// Two passes with auxiliary row/column sets. O(rows + cols) extra space.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuxSets;

impl MatrixZeroer for AuxSets {
    fn zero<'m, T: Zero + Copy>(&self, matrix: &'m mut [Vec<T>]) -> ScanResult<&'m mut [Vec<T>]> {
        let (rows, cols) = validate_shape(matrix)?;
        let lines = find_zero_lines(matrix);
        if lines.is_empty() {
            return Ok(matrix);
        }

        for (i, j) in iproduct!(0..rows, 0..cols) {
            if lines.covers(i, j) {
                matrix[i][j] = T::zero();
            }
        }
        Ok(matrix)
    }

    fn name(&self) -> &'static str {
        "aux-sets"
    }
}

/// Uses row 0 and column 0 as marker storage. O(1) extra space.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantSpace;

impl MatrixZeroer for ConstantSpace {
    fn zero<'m, T: Zero + Copy>(&self, matrix: &'m mut [Vec<T>]) -> ScanResult<&'m mut [Vec<T>]> {
        let (rows, cols) = validate_shape(matrix)?;
        if rows == 0 || cols == 0 {
            return Ok(matrix);
        }

        let first_row_zero = matrix[0].iter().any(|v| v.is_zero());
        let first_col_zero = matrix.iter().any(|row| row[0].is_zero());

        // Markers: (i, 0) flags row i, (0, j) flags column j.
        for i in 1..rows {
            for j in 1..cols {
                if matrix[i][j].is_zero() {
                    matrix[i][0] = T::zero();
                    matrix[0][j] = T::zero();
                }
            }
        }

        for i in 1..rows {
            for j in 1..cols {
                if matrix[i][0].is_zero() || matrix[0][j].is_zero() {
                    matrix[i][j] = T::zero();
                }
            }
        }

        // Markers must be consumed before the boundary is overwritten.
        if first_row_zero {
            matrix[0].fill(T::zero());
        }
        if first_col_zero {
            for row in matrix.iter_mut() {
                row[0] = T::zero();
            }
        }
        Ok(matrix)
    }

    fn name(&self) -> &'static str {
        "constant-space"
    }
}

// =============================================================================
// Milestone 3: Runtime strategy selection
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroStrategy {
    AuxSets,
    #[default]
    ConstantSpace,
}

impl ZeroStrategy {
    pub const ALL: [ZeroStrategy; 2] = [ZeroStrategy::AuxSets, ZeroStrategy::ConstantSpace];
}

impl MatrixZeroer for ZeroStrategy {
    fn zero<'m, T: Zero + Copy>(&self, matrix: &'m mut [Vec<T>]) -> ScanResult<&'m mut [Vec<T>]> {
        debug!(
            strategy = self.name(),
            rows = matrix.len(),
            cols = matrix.first().map_or(0, Vec::len),
            "zeroing matrix"
        );
        match self {
            ZeroStrategy::AuxSets => AuxSets.zero(matrix),
            ZeroStrategy::ConstantSpace => ConstantSpace.zero(matrix),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ZeroStrategy::AuxSets => AuxSets.name(),
            ZeroStrategy::ConstantSpace => ConstantSpace.name(),
        }
    }
}

impl fmt::Display for ZeroStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ZeroStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aux-sets" => Ok(ZeroStrategy::AuxSets),
            "constant-space" => Ok(ZeroStrategy::ConstantSpace),
            other => Err(format!(
                "unknown strategy '{}', expected 'aux-sets' or 'constant-space'",
                other
            )),
        }
    }
}

/// Zeroes `matrix` in place with the default strategy and hands it back.
pub fn zero_matrix(matrix: &mut Vec<Vec<i64>>) -> ScanResult<&mut Vec<Vec<i64>>> {
    ZeroStrategy::default().zero(matrix.as_mut_slice())?;
    Ok(matrix)
}
