//! Polynomial ring descriptors.

use crate::monomial::{Monomial, MAX_VARS};
use crate::ordering::MonomialOrder;
use crate::polynomial::Polynomial;

/// The ring ℝ[x₀, …, xₙ₋₁] with named indeterminates and a fixed order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolyRing {
    symbols: Vec<String>,
    order: MonomialOrder,
}

impl PolyRing {
    /// Creates a ring over the given symbols.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_VARS`] symbols are given.
    #[must_use]
    pub fn new<S: Into<String>>(symbols: impl IntoIterator<Item = S>, order: MonomialOrder) -> Self {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        assert!(
            symbols.len() <= MAX_VARS,
            "at most {MAX_VARS} variables are supported, got {}",
            symbols.len()
        );
        Self { symbols, order }
    }

    /// Ordered indeterminates.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of indeterminates.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.symbols.len()
    }

    /// Monomial order.
    #[must_use]
    pub fn order(&self) -> MonomialOrder {
        self.order
    }

    /// The same symbols under another order.
    #[must_use]
    pub fn with_order(&self, order: MonomialOrder) -> Self {
        Self {
            symbols: self.symbols.clone(),
            order,
        }
    }

    /// The variable with index `i`.
    #[must_use]
    pub fn var(&self, i: usize) -> Polynomial {
        Polynomial::var(i, self.num_vars(), self.order)
    }

    /// All variables, in symbol order.
    #[must_use]
    pub fn vars(&self) -> Vec<Polynomial> {
        (0..self.num_vars()).map(|i| self.var(i)).collect()
    }

    /// A constant.
    #[must_use]
    pub fn constant(&self, c: f64) -> Polynomial {
        Polynomial::constant(c, self.num_vars(), self.order)
    }

    /// The monomial 1.
    #[must_use]
    pub fn one_monomial(&self) -> Monomial {
        Monomial::one(self.num_vars())
    }

    /// Builds a polynomial from `(exponents, coefficient)` pairs.
    #[must_use]
    pub fn poly(&self, terms: &[(&[u16], f64)]) -> Polynomial {
        Polynomial::from_exponents(terms, self.num_vars(), self.order)
    }

    /// Renders a polynomial with this ring's symbol names.
    #[must_use]
    pub fn display(&self, p: &Polynomial) -> String {
        p.display_with(&self.symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_builders() {
        let ring = PolyRing::new(["x", "y"], MonomialOrder::Grevlex);
        assert_eq!(ring.num_vars(), 2);

        let p = ring.poly(&[(&[2, 0], 1.0), (&[0, 0], -1.0)]);
        assert_eq!(p.num_vars(), 2);
        assert_eq!(ring.display(&p), "1*x^2 + -1");

        let [x, y] = [ring.var(0), ring.var(1)];
        let xy = x.mul(&y);
        assert_eq!(xy.leading_monomial(), Some(&Monomial::new(&[1, 1])));
        assert_eq!(ring.vars().len(), 2);
    }

    #[test]
    fn test_with_order() {
        let ring = PolyRing::new(["x"], MonomialOrder::Grevlex);
        assert_eq!(ring.with_order(MonomialOrder::Lex).order(), MonomialOrder::Lex);
    }
}
