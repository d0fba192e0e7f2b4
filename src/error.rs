use std::fmt;

/// Error type for matrix construction and mutation.
///
/// Preconditions are checked up front: a failed operation returns an error
/// before any storage has been touched, so the matrix is never left in a
/// partially-mutated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Input data is not a valid binary matrix, e.g. an entry outside
    /// `{0, 1}` or rows of unequal length.
    InvalidInput(String),

    /// A row or column index is outside the matrix.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            MatrixError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for dimension of size {}", index, len)
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// Bounds check shared by the mutating matrix primitives.
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<(), MatrixError> {
    if index < len {
        Ok(())
    } else {
        Err(MatrixError::IndexOutOfRange { index, len })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        let e = MatrixError::InvalidInput("entry 2 at (0, 1)".to_owned());
        assert_eq!(e.to_string(), "invalid input: entry 2 at (0, 1)");

        let e = MatrixError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(e.to_string(), "index 5 out of range for dimension of size 3");
    }

    #[test]
    fn check() {
        assert_eq!(check_index(2, 3), Ok(()));
        assert_eq!(
            check_index(3, 3),
            Err(MatrixError::IndexOutOfRange { index: 3, len: 3 })
        );
    }
}
