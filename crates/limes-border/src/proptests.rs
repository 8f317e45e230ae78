//! Property-based tests for quotient reduction.

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use limes_poly::{Monomial, MonomialOrder, PolyRing, Polynomial};
    use proptest::prelude::*;

    use crate::basis::{Basis, BorderBasis};
    use crate::factory::BorderBasisFactory;

    const TOL: f64 = 1e-6;

    fn ring() -> PolyRing {
        PolyRing::new(["x", "y"], MonomialOrder::Grevlex)
    }

    /// Border basis of x² + y² = 5, xy = 2, computed once.
    fn basis() -> &'static BorderBasis {
        static BASIS: OnceLock<BorderBasis> = OnceLock::new();
        BASIS.get_or_init(|| {
            let ring = ring();
            let generators = [
                ring.poly(&[(&[2, 0], 1.0), (&[0, 2], 1.0), (&[0, 0], -5.0)]),
                ring.poly(&[(&[1, 1], 1.0), (&[0, 0], -2.0)]),
            ];
            BorderBasisFactory::default().generate(&ring, &generators).unwrap()
        })
    }

    fn small_poly() -> impl Strategy<Value = Polynomial> {
        proptest::collection::vec(((0u16..5, 0u16..5), -5i32..5), 0..5).prop_map(|terms| {
            let terms = terms
                .into_iter()
                .map(|((a, b), c)| (Monomial::new(&[a, b]), f64::from(c)))
                .collect();
            Polynomial::new(terms, 2, MonomialOrder::Grevlex)
        })
    }

    proptest! {
        #[test]
        fn quotient_is_idempotent(f in small_poly()) {
            let q = basis().quotient(&f).unwrap();
            let qq = basis().quotient(&q).unwrap();
            prop_assert!(q.approx_eq(&qq, TOL));
            for m in q.support() {
                prop_assert!(basis().quotient_basis().contains(m));
            }
        }

        #[test]
        fn quotient_is_linear(f in small_poly(), g in small_poly(), c in -3i32..3) {
            let b = basis();
            let c = f64::from(c);
            let lhs = b.quotient(&f.add(&g.scale(c))).unwrap();
            let rhs = b.quotient(&f).unwrap().add(&b.quotient(&g).unwrap().scale(c));
            prop_assert!(lhs.approx_eq(&rhs, TOL * (1.0 + lhs.max_abs_coeff())));
        }

        #[test]
        fn quotient_respects_products(f in small_poly(), g in small_poly()) {
            let b = basis();
            let direct = b.quotient(&f.mul(&g)).unwrap();
            let via_normal_forms = b
                .quotient(&b.quotient(&f).unwrap().mul(&b.quotient(&g).unwrap()))
                .unwrap();
            let scale = 1.0 + direct.max_abs_coeff();
            prop_assert!(direct.approx_eq(&via_normal_forms, TOL * scale));
        }

        #[test]
        fn ideal_members_reduce_to_zero(f in small_poly()) {
            let b = basis();
            let member = f.mul(&ring().poly(&[(&[1, 1], 1.0), (&[0, 0], -2.0)]));
            let q = b.quotient(&member).unwrap();
            prop_assert!(q.max_abs_coeff() <= TOL * (1.0 + member.max_abs_coeff()));
        }

        #[test]
        fn normal_form_vanishes_consistently_at_zeros(f in small_poly()) {
            // f and NF(f) agree on the variety.
            let b = basis();
            let q = b.quotient(&f).unwrap();
            for point in b.zeros().unwrap() {
                let scale = 1.0 + f.max_abs_coeff() * 4f64.powi(8);
                prop_assert!((f.evaluate(&point) - q.evaluate(&point)).abs() < 1e-6 * scale);
            }
        }
    }
}
