//! # limes-poly
//!
//! Polynomial data model for the limes border-basis solver.
//!
//! This crate provides:
//! - Packed monomials over at most [`MAX_VARS`] variables
//! - Admissible monomial orders (lex, grlex, grevlex)
//! - Sparse multivariate polynomials with `f64` coefficients
//! - Ring descriptors carrying symbol names and the chosen order

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]

pub mod monomial;
pub mod ordering;
pub mod polynomial;
pub mod ring;

#[cfg(test)]
mod proptests;

pub use monomial::{Monomial, MAX_VARS};
pub use ordering::MonomialOrder;
pub use polynomial::Polynomial;
pub use ring::PolyRing;
