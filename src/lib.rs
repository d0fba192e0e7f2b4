//! `bitsnf` computes the Smith normal form of matrices over the 2-element
//! finite field, as needed when computing ranks of boundary maps over GF(2)
//! in topology pipelines. Some features include:
//! - a dense, bit-packed matrix representation with fast row operations via
//!   bitwise XOR
//! - a sparse, row-indexed representation storing only the nonzero entries
//!   of each row
//! - one reduction algorithm shared by both representations through the
//!   [`Gf2Matrix`] capability trait, guaranteed to produce cell-for-cell
//!   identical results
//! - rank computation from the reduced diagonal
//!
//! The reduction clears each pivot's row and column in a single pass, which
//! yields the rank-revealing diagonal form over GF(2); it does not perform
//! the divisibility passes of a Smith normal form over the integers.
//!
//! The main data structures are:
//! - [`BitVec`]: a vector of bits stored in 64-bit blocks, backing the dense
//!   representation
//! - [`BitMatrix`]: the dense matrix
//! - [`SparseBitMatrix`]: the sparse matrix
//!
//! # Examples
//!
//! ```
//! use bitsnf::{BitMatrix, Gf2Matrix, SparseBitMatrix};
//!
//! let rows = vec![
//!     vec![0, 1, 1, 0],
//!     vec![1, 1, 0, 0],
//!     vec![1, 0, 1, 0],
//!     vec![0, 0, 0, 1],
//!     vec![0, 0, 0, 1],
//! ];
//!
//! let mut dense = BitMatrix::from_rows(&rows)?;
//! let mut sparse = SparseBitMatrix::from_rows(&rows)?;
//! dense.smith_normal_form()?;
//! sparse.smith_normal_form()?;
//!
//! assert_eq!(dense, BitMatrix::from(&sparse));
//! assert_eq!(dense.rank()?, 3);
//! # Ok::<(), bitsnf::MatrixError>(())
//! ```

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::bool_assert_comparison,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod bitmatrix;
pub mod bitvec;
pub mod error;
pub mod gf2;
pub mod snf;
pub mod sparse;

pub use bitmatrix::BitMatrix;
pub use bitvec::{BitBlock, BitSlice, BitVec};
pub use error::MatrixError;
pub use snf::Gf2Matrix;
pub use sparse::SparseBitMatrix;
