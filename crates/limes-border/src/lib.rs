//! # limes-border
//!
//! Numerical border bases of zero-dimensional polynomial ideals.
//!
//! This crate provides:
//! - Computational universes: finite monomial sets in which the linear
//!   algebra of the construction takes place
//! - [`BorderBasisFactory`]: the stable-extension fixed point that turns
//!   approximate generators into a border basis
//! - [`Basis`] and [`BorderBasis`]: reduction into the quotient ring,
//!   multiplication matrices and extraction of real zeros
//!
//! ## Example
//!
//! ```
//! use limes_border::{Basis, BorderBasisFactory};
//! use limes_poly::{MonomialOrder, PolyRing};
//!
//! let ring = PolyRing::new(["x", "y"], MonomialOrder::Grevlex);
//! let generators = [
//!     ring.poly(&[(&[2, 0], 1.0), (&[0, 0], -1.0)]),
//!     ring.poly(&[(&[0, 2], 1.0), (&[0, 0], -1.0)]),
//! ];
//!
//! let basis = BorderBasisFactory::default().generate(&ring, &generators).unwrap();
//! assert_eq!(basis.quotient_basis().len(), 4);
//! assert_eq!(basis.zeros().unwrap().len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

pub mod basis;
pub mod config;
pub mod error;
pub mod factory;
pub mod universe;

#[cfg(test)]
mod proptests;

pub use basis::{Basis, BorderBasis, GenerationReport};
pub use config::BorderBasisConfig;
pub use error::{BasisError, BasisResult};
pub use factory::BorderBasisFactory;
pub use universe::{ComputationalUniverse, DegreeBoundedUniverse, VectorSpace};
