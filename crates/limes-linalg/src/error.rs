//! Errors raised by the linear-algebra substrate.

use thiserror::Error;

/// Failures of the dense linear-algebra routines.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LinalgError {
    /// Operand shapes do not fit together.
    #[error("dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        /// Expected (rows, columns).
        expected: (usize, usize),
        /// Actual (rows, columns).
        found: (usize, usize),
    },

    /// A square matrix was required.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// No matrices were supplied.
    #[error("no matrices to diagonalize")]
    EmptyInput,

    /// The QR iteration behind the Schur decomposition did not converge.
    #[error("Schur decomposition did not converge within {max_iterations} iterations")]
    SchurNotConverged {
        /// Iteration cap that was hit.
        max_iterations: usize,
    },

    /// The quasi-triangular factor has a 2x2 block at this position.
    #[error("complex conjugate eigenvalue pair at diagonal position {index}")]
    ComplexEigenvalues {
        /// Index of the first row of the 2x2 block.
        index: usize,
    },

    /// The linear system has no solution at the given tolerance.
    #[error("linear system is inconsistent or singular")]
    Singular,
}

/// Result alias for the linear-algebra crate.
pub type LinalgResult<T> = Result<T, LinalgError>;
