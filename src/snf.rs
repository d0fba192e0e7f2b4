use itertools::iproduct;
use log::trace;

use crate::error::MatrixError;

/// The minimal capability interface a GF(2) matrix representation must
/// provide for Smith normal form reduction.
///
/// Both [`BitMatrix`](crate::BitMatrix) and
/// [`SparseBitMatrix`](crate::SparseBitMatrix) implement this trait, so the
/// reduction itself is written once here and the representations only supply
/// element access, swaps, and GF(2) row/column addition. The two
/// implementations are guaranteed to produce cell-for-cell identical results
/// on equal inputs, since pivot selection and elimination order are fixed by
/// the provided methods.
pub trait Gf2Matrix {
    /// The number of rows in the matrix.
    fn rows(&self) -> usize;

    /// The number of columns in the matrix.
    fn cols(&self) -> usize;

    /// Returns the entry at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    fn bit(&self, i: usize, j: usize) -> bool;

    /// Sets the entry at row `i`, column `j`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `i` or `j` is out of range; the
    /// matrix is unmodified in that case.
    fn set_bit(&mut self, i: usize, j: usize, b: bool) -> Result<(), MatrixError>;

    /// Exchanges rows `i0` and `i1` in place.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if either index is out of range; the
    /// matrix is unmodified in that case.
    fn swap_rows(&mut self, i0: usize, i1: usize) -> Result<(), MatrixError>;

    /// Exchanges columns `j0` and `j1` in place.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if either index is out of range; the
    /// matrix is unmodified in that case.
    fn swap_cols(&mut self, j0: usize, j1: usize) -> Result<(), MatrixError>;

    /// Adds row `from` into row `to` over GF(2), i.e. `row[to] ^= row[from]`.
    ///
    /// Adding a row to itself zeroes it, since x + x = 0 in GF(2).
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if either index is out of range; the
    /// matrix is unmodified in that case.
    fn add_row(&mut self, from: usize, to: usize) -> Result<(), MatrixError>;

    /// Adds column `from` into column `to` over GF(2), i.e.
    /// `col[to] ^= col[from]`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if either index is out of range; the
    /// matrix is unmodified in that case.
    fn add_col(&mut self, from: usize, to: usize) -> Result<(), MatrixError>;

    /// Finds the first 1-entry of the trailing block `[n.., n..]` in
    /// row-major order (row index outer, column index inner).
    ///
    /// Implementations may override this with a representation-specific
    /// scan, but must select the same cell as the default row-major scan so
    /// that all representations reduce identically.
    fn find_pivot(&self, n: usize) -> Option<(usize, usize)> {
        iproduct!(n..self.rows(), n..self.cols()).find(|&(i, j)| self.bit(i, j))
    }

    /// Reduces the matrix in place to its Smith normal form over GF(2).
    ///
    /// For each pivot index `n` from 0 to `min(rows, cols)`, the first
    /// 1-entry of the trailing block is swapped to position `(n, n)`, then
    /// column `n` is cleared below the pivot by row additions and row `n` is
    /// cleared to the right of the pivot by column additions. A pivot
    /// position with an all-zero trailing block is skipped.
    ///
    /// This is the single-pass reduction used when computing ranks of
    /// boundary maps over GF(2): each pivot clears only its own row and
    /// column, with no divisibility passes, so the result is the
    /// rank-revealing diagonal form rather than a Smith normal form over the
    /// integers. Empty and all-zero matrices are returned unchanged.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if a primitive rejects an index;
    /// this cannot happen for a well-formed matrix, since the reduction only
    /// touches indices inside the matrix.
    fn smith_normal_form(&mut self) -> Result<(), MatrixError> {
        let (rows, cols) = (self.rows(), self.cols());
        trace!("snf: {:?} ..", (rows, cols));

        let mut rank = 0;
        for n in 0..usize::min(rows, cols) {
            let Some((i, j)) = self.find_pivot(n) else {
                // the trailing block is all zero; nothing left to eliminate
                continue;
            };

            if i != n {
                self.swap_rows(n, i)?;
            }
            if j != n {
                self.swap_cols(n, j)?;
            }

            for i in (n + 1)..rows {
                if self.bit(i, n) {
                    self.add_row(n, i)?;
                }
            }

            for j in (n + 1)..cols {
                if self.bit(n, j) {
                    self.add_col(n, j)?;
                }
            }

            rank += 1;
        }

        trace!("snf: {:?} => rank {}.", (rows, cols), rank);
        Ok(())
    }

    /// Computes the GF(2) rank of the matrix by reducing a copy and counting
    /// the nonzero diagonal entries.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Gf2Matrix::smith_normal_form`].
    fn rank(&self) -> Result<usize, MatrixError>
    where
        Self: Clone + Sized,
    {
        let mut m = self.clone();
        m.smith_normal_form()?;
        Ok((0..usize::min(m.rows(), m.cols()))
            .filter(|&n| m.bit(n, n))
            .count())
    }
}
