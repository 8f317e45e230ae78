//! Monomial orderings.
//!
//! Every ordering here is admissible: compatible with multiplication and
//! with divisibility. Leading terms, pivot columns and the column layout of
//! every vector space depend on the chosen order.

use std::cmp::Ordering;

use crate::monomial::Monomial;

/// An admissible monomial ordering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum MonomialOrder {
    /// Lexicographic order.
    ///
    /// x > y > z means x^a y^b z^c > x^d y^e z^f iff
    /// the first nonzero difference (a-d, b-e, c-f) is positive.
    Lex,

    /// Graded lexicographic order.
    ///
    /// First compares total degree, then uses lex as tiebreaker.
    Grlex,

    /// Graded reverse lexicographic order.
    ///
    /// First compares total degree, then uses reverse lex (last variable first)
    /// with the comparison reversed.
    #[default]
    Grevlex,
}

impl MonomialOrder {
    /// Compares two monomials according to this ordering.
    #[must_use]
    pub fn compare(&self, a: &Monomial, b: &Monomial) -> Ordering {
        match self {
            MonomialOrder::Lex => a.cmp_lex(b),
            MonomialOrder::Grlex => a.cmp_grlex(b),
            MonomialOrder::Grevlex => a.cmp_grevlex(b),
        }
    }

    /// Whether the order refines total degree.
    #[must_use]
    pub const fn is_degree_compatible(&self) -> bool {
        matches!(self, MonomialOrder::Grlex | MonomialOrder::Grevlex)
    }

    /// Sorts monomials from largest to smallest.
    pub fn sort_descending(&self, monomials: &mut [Monomial]) {
        monomials.sort_by(|a, b| self.compare(b, a));
    }

    /// Returns a short name for the ordering.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            MonomialOrder::Lex => "lex",
            MonomialOrder::Grlex => "grlex",
            MonomialOrder::Grevlex => "grevlex",
        }
    }
}

impl std::fmt::Display for MonomialOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_order() {
        let order = MonomialOrder::Lex;

        let x = Monomial::var(0, 2);
        let y = Monomial::var(1, 2);
        let y2 = y.mul(&y);

        assert_eq!(order.compare(&x, &y), Ordering::Greater);
        // The first variable dominates regardless of degree.
        assert_eq!(order.compare(&x, &y2), Ordering::Greater);
    }

    #[test]
    fn test_graded_orders_respect_degree() {
        let x = Monomial::var(0, 2);
        let y2 = Monomial::new(&[0, 2]);

        for order in [MonomialOrder::Grlex, MonomialOrder::Grevlex] {
            assert!(order.is_degree_compatible());
            assert_eq!(order.compare(&y2, &x), Ordering::Greater);
        }
        assert!(!MonomialOrder::Lex.is_degree_compatible());
    }

    #[test]
    fn test_sort_descending() {
        let mut monos = vec![
            Monomial::one(2),
            Monomial::new(&[0, 1]),
            Monomial::new(&[1, 1]),
            Monomial::new(&[1, 0]),
            Monomial::new(&[0, 2]),
        ];
        MonomialOrder::Grevlex.sort_descending(&mut monos);
        assert_eq!(
            monos,
            vec![
                Monomial::new(&[1, 1]),
                Monomial::new(&[0, 2]),
                Monomial::new(&[1, 0]),
                Monomial::new(&[0, 1]),
                Monomial::one(2),
            ]
        );
    }

    #[test]
    fn test_default_is_grevlex() {
        assert_eq!(MonomialOrder::default(), MonomialOrder::Grevlex);
        assert_eq!(MonomialOrder::default().to_string(), "grevlex");
    }
}
