//! Property-based tests for monomials and polynomials.

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use proptest::prelude::*;

    use crate::{Monomial, MonomialOrder, Polynomial};

    fn small_monomial() -> impl Strategy<Value = Monomial> {
        proptest::collection::vec(0u16..5, 3).prop_map(|exps| Monomial::new(&exps))
    }

    fn any_order() -> impl Strategy<Value = MonomialOrder> {
        prop_oneof![
            Just(MonomialOrder::Lex),
            Just(MonomialOrder::Grlex),
            Just(MonomialOrder::Grevlex),
        ]
    }

    // Small integer coefficients keep floating-point arithmetic exact.
    fn small_poly() -> impl Strategy<Value = Polynomial> {
        proptest::collection::vec((small_monomial(), -20i32..20), 0..6).prop_map(|terms| {
            let terms = terms.into_iter().map(|(m, c)| (m, f64::from(c))).collect();
            Polynomial::new(terms, 3, MonomialOrder::Grevlex)
        })
    }

    proptest! {
        #[test]
        fn order_is_multiplicative(
            a in small_monomial(),
            b in small_monomial(),
            c in small_monomial(),
            order in any_order(),
        ) {
            prop_assert_eq!(order.compare(&a, &b), order.compare(&a.mul(&c), &b.mul(&c)));
        }

        #[test]
        fn order_extends_divisibility(a in small_monomial(), c in small_monomial(), order in any_order()) {
            let ac = a.mul(&c);
            prop_assert_ne!(order.compare(&ac, &a), Ordering::Less);
            prop_assert_eq!(ac.div(&c), Some(a));
        }

        #[test]
        fn order_is_total(a in small_monomial(), b in small_monomial(), order in any_order()) {
            let ab = order.compare(&a, &b);
            prop_assert_eq!(ab.reverse(), order.compare(&b, &a));
            prop_assert_eq!(ab == Ordering::Equal, a == b);
        }

        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            prop_assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
        }

        #[test]
        fn leading_term_is_maximal(p in small_poly()) {
            if let Some(lm) = p.leading_monomial() {
                for m in p.support() {
                    prop_assert_ne!(MonomialOrder::Grevlex.compare(m, lm), Ordering::Greater);
                }
            }
        }

        #[test]
        fn evaluation_is_a_ring_map(a in small_poly(), b in small_poly(), x in -2i32..3, y in -2i32..3) {
            let point = [f64::from(x), f64::from(y), 1.0];
            let lhs = a.mul(&b).evaluate(&point);
            let rhs = a.evaluate(&point) * b.evaluate(&point);
            prop_assert!((lhs - rhs).abs() < 1e-6);
        }
    }
}
