//! The border-basis fixed-point construction.
//!
//! Starting from the smallest universe holding the generators, the factory
//! alternates two steps until neither changes anything: close the span of
//! the generators under multiplication by the variables inside the universe,
//! and grow the universe by one degree whenever the border of the resulting
//! order ideal escapes it. The loop is bounded by
//! [`BorderBasisConfig::max_iterations`]; positive-dimensional ideals never
//! reach a fixed point and fail with [`BasisError::UniverseExhausted`].

use std::sync::Arc;

use limes_linalg::lt_normalize;
use limes_poly::{PolyRing, Polynomial};
use log::{debug, info, warn};

use crate::basis::{BorderBasis, GenerationReport};
use crate::config::BorderBasisConfig;
use crate::error::{BasisError, BasisResult};
use crate::universe::{ComputationalUniverse, DegreeBoundedUniverse, VectorSpace};

/// Builds [`BorderBasis`] artifacts from generator lists.
#[derive(Clone, Debug, Default)]
pub struct BorderBasisFactory {
    config: BorderBasisConfig,
}

impl BorderBasisFactory {
    /// Creates a factory after validating `config`.
    pub fn new(config: BorderBasisConfig) -> BasisResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &BorderBasisConfig {
        &self.config
    }

    /// Computes a border basis of the ideal generated by `generators`.
    ///
    /// The ring is taken with the configured monomial order and the initial
    /// universe is the degree-bounded one spanned by the generators'
    /// numerically non-zero support.
    pub fn generate(&self, ring: &PolyRing, generators: &[Polynomial]) -> BasisResult<BorderBasis> {
        let ring = ring.with_order(self.config.order);
        let generators = self.prepare(&ring, generators)?;
        let universe = DegreeBoundedUniverse::from_support(&ring, &generators, self.config.delta)?;
        self.generate_in(universe, &generators)
    }

    /// Runs the construction from an explicit starting universe.
    ///
    /// Generators are re-sorted in the universe ring's order, which takes
    /// precedence over the configured one.
    pub fn generate_in<U: ComputationalUniverse>(
        &self,
        universe: U,
        generators: &[Polynomial],
    ) -> BasisResult<BorderBasis<U>> {
        let delta = self.config.delta;
        let generators = self.prepare(universe.ring(), generators)?;
        let mut report = GenerationReport::default();

        let seeded = universe.vector_space(&generators)?;
        let mut space = reduce_counting(&seeded, delta, "generators", &mut report);

        let mut universe = universe;
        let mut iterations = 0;
        let order_ideal = loop {
            if iterations == self.config.max_iterations {
                return Err(BasisError::UniverseExhausted {
                    iterations,
                    degree: universe.degree(),
                });
            }
            iterations += 1;

            space = universe.stable_extension(&space)?;
            let complement = universe.supplementary_space(&space);
            debug!(
                "iteration {iterations}: degree {}, dim V = {}, |B| = {}",
                universe.degree(),
                space.dimension(),
                complement.len()
            );

            if universe.contains_extension(&complement) {
                break complement;
            }
            let next = universe.extend();
            space = next.embed(&space)?;
            universe = next;
        };

        if order_ideal.is_empty() {
            return Err(BasisError::Inconsistent);
        }

        let reduced = reduce_counting(&space, delta, "final reduction", &mut report);
        let mut matrix = reduced.matrix().clone();
        lt_normalize(&mut matrix);
        let space = VectorSpace::new(Arc::clone(universe.monomials()), matrix);

        report.iterations = iterations;
        report.degree = universe.degree();
        report.quotient_dimension = order_ideal.len();
        info!(
            "border basis reached after {} iterations: degree {}, quotient dimension {}",
            report.iterations, report.degree, report.quotient_dimension
        );

        BorderBasis::assemble(universe, order_ideal, space, self.config.clone(), report)
    }

    /// Checks the generators against `ring`, re-sorts them in its order and
    /// drops the ones that vanish at tolerance.
    fn prepare(&self, ring: &PolyRing, generators: &[Polynomial]) -> BasisResult<Vec<Polynomial>> {
        let mut prepared = Vec::with_capacity(generators.len());
        for g in generators {
            if g.num_vars() != ring.num_vars() {
                return Err(BasisError::RingMismatch {
                    expected: ring.num_vars(),
                    found: g.num_vars(),
                });
            }
            if g.max_abs_coeff() > self.config.delta {
                prepared.push(Polynomial::new(g.terms().to_vec(), ring.num_vars(), ring.order()));
            }
        }

        if prepared.is_empty() {
            return Err(BasisError::DegenerateInput);
        }
        Ok(prepared)
    }
}

/// Reduces `space` at tolerance `delta`; a reduction that loses rank against
/// the rows it was given is logged and counted in `report`.
fn reduce_counting(
    space: &VectorSpace,
    delta: f64,
    stage: &str,
    report: &mut GenerationReport,
) -> VectorSpace {
    let reduced = space.reduce(delta);
    if reduced.dimension() < space.dimension() {
        let deficiency = BasisError::NumericalRankDeficiency {
            expected: space.dimension(),
            rank: reduced.dimension(),
        };
        warn!("{stage}: {deficiency}; continuing with the independent part");
        report.rank_deficiencies += 1;
    }
    reduced
}
