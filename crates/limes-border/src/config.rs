//! Factory configuration.

use limes_linalg::DiagonalizationConfig;
use limes_poly::MonomialOrder;

use crate::error::{BasisError, BasisResult};

/// Parameters of the border-basis construction and of zero extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct BorderBasisConfig {
    /// Numerical tolerance δ: a coefficient counts as zero when its
    /// magnitude is at most δ times the scale of the row it sits in, where
    /// a row's scale is its largest coefficient but at least 1.
    pub delta: f64,
    /// Monomial order; must be degree-compatible.
    pub order: MonomialOrder,
    /// Maximum number of fixed-point iterations (universe extensions + 1).
    pub max_iterations: usize,
    /// Seed for the random combination used by zero extraction.
    pub seed: u64,
    /// Random combinations tried by zero extraction.
    pub diagonalization_attempts: usize,
}

impl Default for BorderBasisConfig {
    fn default() -> Self {
        Self {
            delta: 1e-8,
            order: MonomialOrder::Grevlex,
            max_iterations: 64,
            seed: 42,
            diagonalization_attempts: 8,
        }
    }
}

impl BorderBasisConfig {
    /// Sets the tolerance.
    #[must_use]
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Sets the monomial order.
    #[must_use]
    pub fn with_order(mut self, order: MonomialOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the seed of zero extraction.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks every parameter.
    pub fn validate(&self) -> BasisResult<()> {
        if !(self.delta.is_finite() && self.delta > 0.0 && self.delta < 1.0) {
            return Err(BasisError::InvalidConfig(format!(
                "delta must lie in (0, 1), got {}",
                self.delta
            )));
        }
        if !self.order.is_degree_compatible() {
            return Err(BasisError::InvalidConfig(format!(
                "monomial order must be degree-compatible, got {}",
                self.order
            )));
        }
        if self.max_iterations == 0 {
            return Err(BasisError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.diagonalization_attempts == 0 {
            return Err(BasisError::InvalidConfig(
                "diagonalization_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Diagonalization settings derived from this configuration.
    ///
    /// Eigenvalue gaps and Schur sub-diagonals are judged at √δ.
    #[must_use]
    pub fn diagonalization(&self) -> DiagonalizationConfig {
        DiagonalizationConfig {
            seed: self.seed,
            attempts: self.diagonalization_attempts,
            separation_target: self.delta.sqrt(),
            block_tolerance: self.delta.sqrt(),
            ..DiagonalizationConfig::default()
        }
    }
}
