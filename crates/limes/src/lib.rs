//! # Limes
//!
//! Symbolic-numeric solving of zero-dimensional polynomial systems through
//! numerical border bases.
//!
//! Given approximate generators of an ideal, Limes computes a border basis
//! at a chosen tolerance, reduces polynomials into the quotient ring and
//! reads the real zeros off the common eigenvectors of the multiplication
//! matrices.
//!
//! ## Features
//!
//! - **Polynomials**: packed monomials, admissible orders, sparse `f64`
//!   polynomials
//! - **Tolerant Linear Algebra**: reduced row echelon form at a tolerance,
//!   real Schur decomposition, seeded simultaneous diagonalization
//! - **Border Bases**: stable-extension fixed point over degree-bounded
//!   universes
//!
//! ## Quick Start
//!
//! ```rust
//! use limes::prelude::*;
//!
//! let ring = PolyRing::new(["x", "y"], MonomialOrder::Grevlex);
//! let circle = ring.poly(&[(&[2, 0], 1.0), (&[0, 2], 1.0), (&[0, 0], -5.0)]);
//! let hyperbola = ring.poly(&[(&[1, 1], 1.0), (&[0, 0], -2.0)]);
//!
//! let basis = BorderBasisFactory::default()
//!     .generate(&ring, &[circle, hyperbola])
//!     .unwrap();
//! let zeros = basis.zeros().unwrap();
//! assert_eq!(zeros.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use limes_border as border;
pub use limes_linalg as linalg;
pub use limes_poly as poly;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use limes_border::{
        Basis, BasisError, BasisResult, BorderBasis, BorderBasisConfig, BorderBasisFactory,
        ComputationalUniverse, DegreeBoundedUniverse, GenerationReport,
    };
    pub use limes_linalg::{DenseMatrix, LinalgError};
    pub use limes_poly::{Monomial, MonomialOrder, PolyRing, Polynomial};
}
