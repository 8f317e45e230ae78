//! Sparse multivariate polynomials with floating-point coefficients.
//!
//! Terms are stored as (monomial, coefficient) pairs sorted from the
//! leading term down, with like terms combined and exact zeros removed.
//! Numerically small coefficients are only dropped on request via
//! [`Polynomial::chop`].

use rustc_hash::FxHashMap;

use crate::monomial::Monomial;
use crate::ordering::MonomialOrder;

/// A sparse multivariate polynomial over `f64`.
#[derive(Clone, PartialEq, Debug)]
pub struct Polynomial {
    terms: Vec<(Monomial, f64)>,
    num_vars: usize,
    order: MonomialOrder,
}

impl Polynomial {
    /// Creates a polynomial from terms, sorting and combining them.
    #[must_use]
    pub fn new(terms: Vec<(Monomial, f64)>, num_vars: usize, order: MonomialOrder) -> Self {
        let mut poly = Self {
            terms,
            num_vars,
            order,
        };
        poly.normalize();
        poly
    }

    /// Creates a polynomial from `(exponents, coefficient)` pairs.
    #[must_use]
    pub fn from_exponents(terms: &[(&[u16], f64)], num_vars: usize, order: MonomialOrder) -> Self {
        let terms = terms
            .iter()
            .map(|(exps, c)| (Monomial::new(exps), *c))
            .collect();
        Self::new(terms, num_vars, order)
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero(num_vars: usize, order: MonomialOrder) -> Self {
        Self {
            terms: Vec::new(),
            num_vars,
            order,
        }
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(c: f64, num_vars: usize, order: MonomialOrder) -> Self {
        Self::new(vec![(Monomial::one(num_vars), c)], num_vars, order)
    }

    /// The variable x_i.
    #[must_use]
    pub fn var(i: usize, num_vars: usize, order: MonomialOrder) -> Self {
        Self {
            terms: vec![(Monomial::var(i, num_vars), 1.0)],
            num_vars,
            order,
        }
    }

    /// A single term c·m.
    #[must_use]
    pub fn term(m: Monomial, c: f64, num_vars: usize, order: MonomialOrder) -> Self {
        Self::new(vec![(m, c)], num_vars, order)
    }

    /// Whether this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Monomial ordering of the term list.
    #[must_use]
    pub fn order(&self) -> MonomialOrder {
        self.order
    }

    /// Terms, leading term first.
    #[must_use]
    pub fn terms(&self) -> &[(Monomial, f64)] {
        &self.terms
    }

    /// Monomials with non-zero coefficient, leading first.
    pub fn support(&self) -> impl Iterator<Item = &Monomial> + '_ {
        self.terms.iter().map(|(m, _)| m)
    }

    /// Coefficient of `m` (zero when absent).
    #[must_use]
    pub fn coeff(&self, m: &Monomial) -> f64 {
        self.terms
            .iter()
            .find(|(t, _)| t == m)
            .map_or(0.0, |(_, c)| *c)
    }

    /// Leading monomial.
    #[must_use]
    pub fn leading_monomial(&self) -> Option<&Monomial> {
        self.terms.first().map(|(m, _)| m)
    }

    /// Leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<f64> {
        self.terms.first().map(|(_, c)| *c)
    }

    /// Leading term.
    #[must_use]
    pub fn leading_term(&self) -> Option<&(Monomial, f64)> {
        self.terms.first()
    }

    /// Largest coefficient magnitude.
    #[must_use]
    pub fn max_abs_coeff(&self) -> f64 {
        self.terms.iter().fold(0.0, |acc, (_, c)| acc.max(c.abs()))
    }

    /// Sorts terms and combines like terms.
    fn normalize(&mut self) {
        let mut combined: FxHashMap<Monomial, f64> = FxHashMap::default();
        for (m, c) in self.terms.drain(..) {
            *combined.entry(m).or_insert(0.0) += c;
        }

        self.terms = combined.into_iter().filter(|(_, c)| *c != 0.0).collect();
        let order = self.order;
        self.terms.sort_by(|a, b| order.compare(&b.0, &a.0));
    }

    /// Drops every term with |c| ≤ `tol`.
    #[must_use]
    pub fn chop(&self, tol: f64) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .filter(|(_, c)| c.abs() > tol)
                .copied()
                .collect(),
            num_vars: self.num_vars,
            order: self.order,
        }
    }

    /// Sum of two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        assert_eq!(self.num_vars, other.num_vars);
        assert!(self.order == other.order);

        let mut terms = self.terms.clone();
        terms.extend_from_slice(&other.terms);
        Self::new(terms, self.num_vars, self.order)
    }

    /// Negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        self.scale(-1.0)
    }

    /// Difference of two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Product of two polynomials (schoolbook).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        assert_eq!(self.num_vars, other.num_vars);
        assert!(self.order == other.order);

        if self.is_zero() || other.is_zero() {
            return Self::zero(self.num_vars, self.order);
        }

        let mut terms = Vec::with_capacity(self.len() * other.len());
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                terms.push((m1.mul(m2), c1 * c2));
            }
        }
        Self::new(terms, self.num_vars, self.order)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: f64) -> Self {
        if c == 0.0 {
            return Self::zero(self.num_vars, self.order);
        }

        Self {
            terms: self.terms.iter().map(|(m, x)| (*m, x * c)).collect(),
            num_vars: self.num_vars,
            order: self.order,
        }
    }

    /// Multiplies by the term c·m.
    #[must_use]
    pub fn mul_term(&self, m: &Monomial, c: f64) -> Self {
        if c == 0.0 {
            return Self::zero(self.num_vars, self.order);
        }

        // Multiplying by a monomial preserves the relative order of terms.
        Self {
            terms: self.terms.iter().map(|(t, x)| (t.mul(m), x * c)).collect(),
            num_vars: self.num_vars,
            order: self.order,
        }
    }

    /// Multiplies by the variable x_i.
    #[must_use]
    pub fn mul_var(&self, i: usize) -> Self {
        Self {
            terms: self.terms.iter().map(|(t, x)| (t.mul_var(i), *x)).collect(),
            num_vars: self.num_vars,
            order: self.order,
        }
    }

    /// Total degree (zero for the zero polynomial).
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.terms
            .iter()
            .map(|(m, _)| m.total_degree())
            .max()
            .unwrap_or(0)
    }

    /// Evaluates the polynomial at a point.
    #[must_use]
    pub fn evaluate(&self, point: &[f64]) -> f64 {
        self.terms.iter().map(|(m, c)| c * m.evaluate(point)).sum()
    }

    /// Whether every coefficient of `self - other` is at most `tol` in magnitude.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.sub(other).max_abs_coeff() <= tol
    }

    /// Renders the polynomial with the given symbol names.
    #[must_use]
    pub fn display_with(&self, symbols: &[String]) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        self.terms
            .iter()
            .map(|(m, c)| {
                if m.is_one() {
                    format!("{c}")
                } else {
                    format!("{c}*{}", m.display_with(symbols))
                }
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_with(&[]))
    }
}
