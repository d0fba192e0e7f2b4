use rand::Rng;
use rustc_hash::FxHashSet;
use std::fmt;

use crate::bitmatrix::{BitMatrix, validate_rows};
use crate::error::{MatrixError, check_index};
use crate::gf2;
use crate::snf::Gf2Matrix;

/// A sparse matrix of bits, storing the set of nonzero column indices for
/// each row.
///
/// Row operations (swap, GF(2) add) touch only the two rows involved, while
/// column operations have to visit every row, since columns are not directly
/// addressable. Element arithmetic goes through [`gf2::add_arith`], the
/// difference-squared form of GF(2) addition, rather than bitwise XOR.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseBitMatrix {
    /// the nonzero column indices of each row
    entries: Vec<FxHashSet<usize>>,

    /// the number of logical columns in the matrix
    cols: usize,
}

impl SparseBitMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        SparseBitMatrix {
            entries: vec![FxHashSet::default(); rows],
            cols,
        }
    }

    /// Builds a matrix from rows of `u8` entries.
    ///
    /// # Errors
    ///
    /// [`MatrixError::InvalidInput`] if the rows have unequal lengths or any
    /// entry is not 0 or 1. Validation happens before any storage is
    /// allocated.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, MatrixError> {
        let cols = validate_rows(rows)?;
        let entries = rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &v)| v == 1)
                    .map(|(j, _)| j)
                    .collect()
            })
            .collect();
        Ok(SparseBitMatrix { entries, cols })
    }

    /// Builds a `rows` x `cols` matrix with 1s at the given `(row, column)`
    /// positions.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if a position lies outside the
    /// matrix.
    pub fn from_entries(
        rows: usize,
        cols: usize,
        positions: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, MatrixError> {
        let mut m = Self::zeros(rows, cols);
        for (i, j) in positions {
            check_index(i, rows)?;
            check_index(j, cols)?;
            m.entries[i].insert(j);
        }
        Ok(m)
    }

    /// A matrix where each entry is 1 with probability `density`.
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize, density: f64) -> Self {
        let entries = (0..rows)
            .map(|_| (0..cols).filter(|_| rng.random_bool(density)).collect())
            .collect();
        SparseBitMatrix { entries, cols }
    }

    /// The number of nonzero entries in the matrix.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.entries.iter().map(|row| row.len()).sum()
    }
}

impl Gf2Matrix for SparseBitMatrix {
    #[inline]
    fn rows(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn bit(&self, i: usize, j: usize) -> bool {
        // an out-of-range column would silently read as 0 from the set
        assert!(j < self.cols, "bit ({}, {}) out of range", i, j);
        self.entries[i].contains(&j)
    }

    fn set_bit(&mut self, i: usize, j: usize, b: bool) -> Result<(), MatrixError> {
        check_index(i, self.entries.len())?;
        check_index(j, self.cols)?;
        if b {
            self.entries[i].insert(j);
        } else {
            self.entries[i].remove(&j);
        }
        Ok(())
    }

    /// Rows are exchanged by swapping their index sets; no materialization
    /// of either row is needed.
    fn swap_rows(&mut self, i0: usize, i1: usize) -> Result<(), MatrixError> {
        check_index(i0, self.entries.len())?;
        check_index(i1, self.entries.len())?;
        self.entries.swap(i0, i1);
        Ok(())
    }

    /// Columns are not directly addressable, so this visits every row's set.
    fn swap_cols(&mut self, j0: usize, j1: usize) -> Result<(), MatrixError> {
        check_index(j0, self.cols)?;
        check_index(j1, self.cols)?;
        for row in self.entries.iter_mut() {
            let b0 = row.contains(&j0);
            let b1 = row.contains(&j1);
            if b0 != b1 {
                if b0 {
                    row.remove(&j0);
                    row.insert(j1);
                } else {
                    row.remove(&j1);
                    row.insert(j0);
                }
            }
        }
        Ok(())
    }

    /// Only the source row's support needs visiting: adding a 0 never
    /// changes an entry.
    fn add_row(&mut self, from: usize, to: usize) -> Result<(), MatrixError> {
        check_index(from, self.entries.len())?;
        check_index(to, self.entries.len())?;
        let support: Vec<usize> = self.entries[from].iter().copied().collect();
        for j in support {
            let x = self.entries[to].contains(&j) as u8;
            if gf2::add_arith(x, 1) == 1 {
                self.entries[to].insert(j);
            } else {
                self.entries[to].remove(&j);
            }
        }
        Ok(())
    }

    fn add_col(&mut self, from: usize, to: usize) -> Result<(), MatrixError> {
        check_index(from, self.cols)?;
        check_index(to, self.cols)?;
        for row in self.entries.iter_mut() {
            let x = row.contains(&to) as u8;
            let y = row.contains(&from) as u8;
            if gf2::add_arith(x, y) == 1 {
                row.insert(to);
            } else {
                row.remove(&to);
            }
        }
        Ok(())
    }

    /// Scans each row's support for its smallest eligible column, so the
    /// selected cell matches the row-major order of the default scan.
    fn find_pivot(&self, n: usize) -> Option<(usize, usize)> {
        for i in n..self.entries.len() {
            if let Some(j) = self.entries[i].iter().copied().filter(|&j| j >= n).min() {
                return Some((i, j));
            }
        }
        None
    }
}

impl From<&BitMatrix> for SparseBitMatrix {
    fn from(m: &BitMatrix) -> Self {
        let entries = (0..m.rows())
            .map(|i| (0..m.cols()).filter(|&j| m.bit(i, j)).collect())
            .collect();
        SparseBitMatrix {
            entries,
            cols: m.cols(),
        }
    }
}

impl From<&SparseBitMatrix> for BitMatrix {
    fn from(m: &SparseBitMatrix) -> Self {
        BitMatrix::build(m.rows(), m.cols(), |i, j| m.entries[i].contains(&j))
    }
}

impl fmt::Display for SparseBitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.entries.iter() {
            for j in 0..self.cols {
                write!(f, " {} ", if row.contains(&j) { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
