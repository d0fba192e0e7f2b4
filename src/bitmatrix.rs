use rand::Rng;
use std::{fmt, ops::Index};

use crate::bitvec::*;
use crate::error::{MatrixError, check_index};
use crate::gf2;
use crate::snf::Gf2Matrix;

/// A dense matrix of bits, represented as a vector of blocks of bits
///
/// The matrix is stored in row-major order, with each row represented as a
/// `BitSlice` of `BitBlock`s. If the number of columns is not a multiple of
/// `BLOCKSIZE`, the last block in each row is padded with 0s; bits beyond
/// `cols` are always 0.
#[derive(Clone, Debug)]
pub struct BitMatrix {
    /// the number of logical rows in the matrix
    rows: usize,

    /// the number of logical columns in the matrix
    cols: usize,

    /// the number of [`BitBlock`]s used to store each row
    col_blocks: usize,

    /// a [`BitVec`] containing the data of the matrix, stored in row-major order
    data: BitVec,
}

impl BitMatrix {
    pub fn build(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let col_blocks = min_blocks(cols);
        let data = (0..rows)
            .flat_map(|i| (0..BLOCKSIZE * col_blocks).map(move |j| (i, j)))
            .map(|(i, j)| j < cols && f(i, j))
            .collect();
        BitMatrix {
            rows,
            cols,
            col_blocks,
            data,
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        let col_blocks = min_blocks(cols);
        BitMatrix {
            rows,
            cols,
            col_blocks,
            data: BitVec::zeros(rows * col_blocks),
        }
    }

    pub fn identity(size: usize) -> Self {
        Self::build(size, size, |i, j| i == j)
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
        Ok(Self::build(rows.len(), cols, |i, j| rows[i][j] == 1))
    }

    /// A matrix with uniformly random entries.
    #[inline]
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize) -> Self {
        let col_blocks = min_blocks(cols);
        let num_blocks = rows * col_blocks;
        // keep the padding bits of the last block in each row at 0
        let mask = if cols % BLOCKSIZE == 0 {
            BitBlock::MAX
        } else {
            BitBlock::MAX.wrapping_shl((BLOCKSIZE - (cols % BLOCKSIZE)) as u32)
        };
        let data = (0..num_blocks)
            .map(|i| {
                if i % col_blocks == col_blocks - 1 {
                    mask & rng.random::<BitBlock>()
                } else {
                    rng.random::<BitBlock>()
                }
            })
            .collect();
        BitMatrix {
            rows,
            cols,
            col_blocks,
            data,
        }
    }

    /// The row at index `i` as a [`BitSlice`] of `col_blocks` blocks.
    #[inline]
    pub fn row(&self, row: usize) -> &BitSlice {
        &self.data[row * self.col_blocks..(row + 1) * self.col_blocks]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut BitSlice {
        &mut self.data[row * self.col_blocks..(row + 1) * self.col_blocks]
    }

    #[inline]
    fn bit_index(&self, i: usize, j: usize) -> usize {
        self.col_blocks * BLOCKSIZE * i + j
    }
}

/// Checks that the rows form a rectangular grid of bits, returning the
/// common row length.
pub(crate) fn validate_rows(rows: &[Vec<u8>]) -> Result<usize, MatrixError> {
    let cols = rows.first().map_or(0, Vec::len);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != cols {
            return Err(MatrixError::InvalidInput(format!(
                "row {} has length {}, expected {}",
                i,
                row.len(),
                cols
            )));
        }
        for (j, &v) in row.iter().enumerate() {
            if v > 1 {
                return Err(MatrixError::InvalidInput(format!(
                    "entry {} at ({}, {}) is not a bit",
                    v, i, j
                )));
            }
        }
    }
    Ok(cols)
}

impl Gf2Matrix for BitMatrix {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn bit(&self, i: usize, j: usize) -> bool {
        assert!(i < self.rows && j < self.cols, "bit ({}, {}) out of range", i, j);
        self.data.bit(self.bit_index(i, j))
    }

    #[inline]
    fn set_bit(&mut self, i: usize, j: usize, b: bool) -> Result<(), MatrixError> {
        check_index(i, self.rows)?;
        check_index(j, self.cols)?;
        let p = self.bit_index(i, j);
        self.data.set_bit(p, b);
        Ok(())
    }

    fn swap_rows(&mut self, i0: usize, i1: usize) -> Result<(), MatrixError> {
        check_index(i0, self.rows)?;
        check_index(i1, self.rows)?;
        self.data.swap_range(
            i0 * self.col_blocks,
            i1 * self.col_blocks,
            self.col_blocks,
        );
        Ok(())
    }

    fn swap_cols(&mut self, j0: usize, j1: usize) -> Result<(), MatrixError> {
        check_index(j0, self.cols)?;
        check_index(j1, self.cols)?;
        for i in 0..self.rows {
            let p0 = self.bit_index(i, j0);
            let p1 = self.bit_index(i, j1);
            let b0 = self.data.bit(p0);
            let b1 = self.data.bit(p1);
            if b0 != b1 {
                self.data.set_bit(p0, b1);
                self.data.set_bit(p1, b0);
            }
        }
        Ok(())
    }

    fn add_row(&mut self, from: usize, to: usize) -> Result<(), MatrixError> {
        check_index(from, self.rows)?;
        check_index(to, self.rows)?;
        self.data.xor_range(
            from * self.col_blocks,
            to * self.col_blocks,
            self.col_blocks,
        );
        Ok(())
    }

    fn add_col(&mut self, from: usize, to: usize) -> Result<(), MatrixError> {
        check_index(from, self.cols)?;
        check_index(to, self.cols)?;
        for i in 0..self.rows {
            let p_to = self.bit_index(i, to);
            let p_from = self.bit_index(i, from);
            let x = self.data.bit(p_to) as u8;
            let y = self.data.bit(p_from) as u8;
            self.data.set_bit(p_to, gf2::add(x, y) == 1);
        }
        Ok(())
    }

    /// Block-level scan: the first row at or after `n` with a 1-bit at or
    /// after column `n` holds the pivot. Padding bits are 0, so the scan
    /// never lands past `cols`.
    fn find_pivot(&self, n: usize) -> Option<(usize, usize)> {
        for i in n..self.rows {
            if let Some(j) = self.row(i).first_one_from(n) {
                return Some((i, j));
            }
        }
        None
    }
}

/// Two matrices are considered equal if they represent the same logical
/// matrix; padding does not participate in the comparison.
impl PartialEq for BitMatrix {
    fn eq(&self, other: &Self) -> bool {
        if self.rows != other.rows || self.cols != other.cols {
            return false;
        }

        for i in 0..self.rows {
            for j in 0..self.col_blocks {
                if j * BLOCKSIZE >= self.cols {
                    break;
                } else if self.data[i * self.col_blocks + j] != other.data[i * other.col_blocks + j]
                {
                    return false;
                }
            }
        }

        true
    }
}

impl Eq for BitMatrix {}

impl Index<(usize, usize)> for BitMatrix {
    type Output = bool;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        if self.bit(index.0, index.1) {
            &true
        } else {
            &false
        }
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                write!(f, " {} ", if self.bit(i, j) { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};

    #[test]
    fn identity() {
        let m = BitMatrix::identity(100);
        for i in 0..100 {
            for j in 0..100 {
                assert_eq!(m.bit(i, j), i == j);
            }
        }
    }

    #[test]
    fn from_rows_round_trip() {
        let rows = vec![vec![0, 1, 1], vec![1, 0, 0]];
        let m = BitMatrix::from_rows(&rows).unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 3));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(m.bit(i, j), rows[i][j] == 1);
            }
        }
    }

    #[test]
    fn from_rows_rejects_non_binary() {
        let err = BitMatrix::from_rows(&[vec![0, 2]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidInput("entry 2 at (0, 1) is not a bit".to_owned())
        );

        let err = BitMatrix::from_rows(&[vec![0, 1], vec![1]]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidInput(_)));
    }

    #[test]
    fn swap_rows_involution() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m = BitMatrix::random(&mut rng, 9, 130);
        let mut n = m.clone();
        n.swap_rows(2, 7).unwrap();
        for j in 0..130 {
            assert_eq!(n.bit(2, j), m.bit(7, j));
            assert_eq!(n.bit(7, j), m.bit(2, j));
        }
        n.swap_rows(2, 7).unwrap();
        assert_eq!(m, n);
    }

    #[test]
    fn swap_cols_involution() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m = BitMatrix::random(&mut rng, 9, 130);
        let mut n = m.clone();
        n.swap_cols(3, 68).unwrap();
        for i in 0..9 {
            assert_eq!(n.bit(i, 3), m.bit(i, 68));
            assert_eq!(n.bit(i, 68), m.bit(i, 3));
        }
        n.swap_cols(3, 68).unwrap();
        assert_eq!(m, n);
    }

    #[test]
    fn add_row_add_col() {
        let mut m = BitMatrix::from_rows(&[vec![1, 0, 1], vec![0, 1, 1]]).unwrap();

        m.add_row(0, 1).unwrap();
        assert_eq!(m, BitMatrix::from_rows(&[vec![1, 0, 1], vec![1, 1, 0]]).unwrap());

        m.add_col(0, 2).unwrap();
        assert_eq!(m, BitMatrix::from_rows(&[vec![1, 0, 0], vec![1, 1, 1]]).unwrap());

        // adding a row to itself zeroes it
        m.add_row(0, 0).unwrap();
        assert_eq!(m, BitMatrix::from_rows(&[vec![0, 0, 0], vec![1, 1, 1]]).unwrap());
    }

    #[test]
    fn find_pivot_block_scan() {
        let mut m = BitMatrix::zeros(4, 200);
        assert_eq!(m.find_pivot(0), None);

        m.set_bit(1, 150, true).unwrap();
        m.set_bit(3, 2, true).unwrap();
        assert_eq!(m.find_pivot(0), Some((1, 150)));
        // from pivot index 2, row 1 is no longer eligible but (3, 2) is
        assert_eq!(m.find_pivot(2), Some((3, 2)));
        assert_eq!(m.find_pivot(3), None);
    }

    #[test]
    fn random_padding_is_zero() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m = BitMatrix::random(&mut rng, 8, 20);
        for i in 0..8 {
            for j in 20..m.row(i).num_bits() {
                assert!(!m.row(i).bit(j));
            }
        }
    }

    #[test]
    fn display() {
        let m = BitMatrix::from_rows(&[vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(m.to_string(), " 0  1 \n 1  0 \n");
    }
}
