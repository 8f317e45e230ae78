//! # limes-linalg
//!
//! Tolerance-aware dense linear algebra for the limes border-basis solver.
//!
//! This crate provides:
//! - Dense row-major matrices over any [`num_traits::Float`]
//! - Tolerant reduced row echelon form ([`srref`]) and leading-coefficient
//!   normalization ([`lt_normalize`])
//! - Real Schur decomposition and seeded simultaneous diagonalization of
//!   commuting matrices
//!
//! ## Tolerances
//!
//! Every routine that decides whether a number is zero takes the tolerance
//! explicitly. There is no crate-wide epsilon.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]

pub mod dense_matrix;
pub mod eigen;
pub mod error;
pub mod reduce;

pub use dense_matrix::DenseMatrix;
pub use eigen::{
    real_schur, simultaneously_diagonalize, DiagonalizationConfig, RealSchur,
    SimultaneousDiagonalization,
};
pub use error::{LinalgError, LinalgResult};
pub use reduce::{leading_column, lt_normalize, srref, RowEchelon};
