//! Errors raised while building or using a border basis.

use limes_linalg::LinalgError;
use thiserror::Error;

/// Failures of border-basis construction and of the basis operations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BasisError {
    /// The generator list is empty or every generator vanishes at tolerance.
    #[error("degenerate input: no generator has a coefficient above tolerance")]
    DegenerateInput,

    /// Row reduction collapsed more rows than there were independent inputs.
    ///
    /// The factory only logs this condition; it is never returned from
    /// `generate`.
    #[error("numerical rank deficiency: expected rank {expected}, found {rank}")]
    NumericalRankDeficiency {
        /// Number of rows that entered the reduction.
        expected: usize,
        /// Numerical rank found.
        rank: usize,
    },

    /// The degree-growth loop hit its cap without reaching a fixed point.
    #[error(
        "universe exhausted after {iterations} iterations at degree {degree}; \
         the ideal is likely positive-dimensional"
    )]
    UniverseExhausted {
        /// Iterations performed.
        iterations: usize,
        /// Degree bound of the last universe.
        degree: u32,
    },

    /// A basis implementation does not provide this operation.
    #[error("operation `{0}` is not implemented by this basis")]
    UnimplementedOperation(&'static str),

    /// The quotient ring is not finite-dimensional.
    #[error("the ideal is not zero-dimensional")]
    NotZeroDimensional,

    /// The generators span the unit ideal.
    #[error("the generators are inconsistent: the ideal contains 1")]
    Inconsistent,

    /// A complex-conjugate pair of zeros was met during extraction.
    #[error("zero extraction met a complex-conjugate eigenvalue pair at position {index}")]
    NonRealZeros {
        /// Position of the 2x2 block in the Schur form.
        index: usize,
    },

    /// A polynomial has support outside the computational universe.
    #[error("support outside the computational universe: {0}")]
    OutsideUniverse(String),

    /// A polynomial lives in a ring with a different number of variables.
    #[error("ring mismatch: expected {expected} variables, found {found}")]
    RingMismatch {
        /// Variables of the ring.
        expected: usize,
        /// Variables of the polynomial.
        found: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Parts handed to `BorderBasis::from_parts` violate a basis invariant.
    #[error("invalid border basis: {0}")]
    InvalidBasis(String),

    /// The linear-algebra substrate failed.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}

/// Result alias for border-basis operations.
pub type BasisResult<T> = Result<T, BasisError>;
