//! Packed exponent vectors.
//!
//! A [`Monomial`] stores up to [`MAX_VARS`] exponents inline together with
//! its cached total degree, so copying, hashing and divisibility tests never
//! allocate. Comparison under an admissible order lives in
//! [`crate::ordering`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Maximum number of variables a monomial can carry.
pub const MAX_VARS: usize = 16;

/// A monomial x₀^e₀ · x₁^e₁ · … over at most [`MAX_VARS`] variables.
#[derive(Clone, Copy)]
pub struct Monomial {
    exponents: [u16; MAX_VARS],
    num_vars: u8,
    degree: u32,
}

impl Monomial {
    /// Creates a monomial from its exponent vector.
    ///
    /// Exponents beyond [`MAX_VARS`] are ignored.
    #[must_use]
    pub fn new(exps: &[u16]) -> Self {
        let mut exponents = [0u16; MAX_VARS];
        let n = exps.len().min(MAX_VARS);
        exponents[..n].copy_from_slice(&exps[..n]);
        let degree = exponents.iter().map(|&e| u32::from(e)).sum();

        Self {
            exponents,
            num_vars: n as u8,
            degree,
        }
    }

    /// The monomial 1 in `num_vars` variables.
    #[must_use]
    pub fn one(num_vars: usize) -> Self {
        Self {
            exponents: [0u16; MAX_VARS],
            num_vars: num_vars.min(MAX_VARS) as u8,
            degree: 0,
        }
    }

    /// The variable x_i in `num_vars` variables.
    #[must_use]
    pub fn var(i: usize, num_vars: usize) -> Self {
        let mut m = Self::one(num_vars);
        if i < MAX_VARS {
            m.exponents[i] = 1;
            m.degree = 1;
        }
        m
    }

    /// Exponent of variable `i` (zero when out of range).
    #[must_use]
    pub fn exponent(&self, i: usize) -> u16 {
        self.exponents.get(i).copied().unwrap_or(0)
    }

    /// The active exponents.
    #[must_use]
    pub fn exponents(&self) -> &[u16] {
        &self.exponents[..self.num_vars as usize]
    }

    /// Number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars as usize
    }

    /// Total degree.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.degree
    }

    /// Whether this is the monomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.degree == 0
    }

    /// Product of two monomials.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut exponents = [0u16; MAX_VARS];
        let n = self.num_vars.max(other.num_vars) as usize;
        for (i, e) in exponents.iter_mut().enumerate().take(n) {
            *e = self.exponents[i].saturating_add(other.exponents[i]);
        }

        Self {
            exponents,
            num_vars: n as u8,
            degree: self.degree + other.degree,
        }
    }

    /// Multiplies by the variable x_i.
    #[must_use]
    pub fn mul_var(&self, i: usize) -> Self {
        let mut m = *self;
        if i < MAX_VARS {
            m.exponents[i] = m.exponents[i].saturating_add(1);
            m.degree += 1;
            m.num_vars = m.num_vars.max(i as u8 + 1);
        }
        m
    }

    /// Divides by the variable x_i, if it divides.
    #[must_use]
    pub fn div_var(&self, i: usize) -> Option<Self> {
        if self.exponent(i) == 0 {
            return None;
        }
        let mut m = *self;
        m.exponents[i] -= 1;
        m.degree -= 1;
        Some(m)
    }

    /// Quotient `self / other`, or `None` if `other` does not divide `self`.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        if !self.is_divisible_by(other) {
            return None;
        }

        let mut exponents = [0u16; MAX_VARS];
        let n = self.num_vars.max(other.num_vars) as usize;
        for (i, e) in exponents.iter_mut().enumerate().take(n) {
            *e = self.exponents[i] - other.exponents[i];
        }

        Some(Self {
            exponents,
            num_vars: n as u8,
            degree: self.degree - other.degree,
        })
    }

    /// Whether `other` divides `self`.
    #[must_use]
    pub fn is_divisible_by(&self, other: &Self) -> bool {
        if other.degree > self.degree {
            return false;
        }
        let n = self.num_vars.max(other.num_vars) as usize;
        (0..n).all(|i| other.exponents[i] <= self.exponents[i])
    }

    /// All monomials obtained by removing one factor x_i (the direct divisors).
    pub fn direct_divisors(&self) -> impl Iterator<Item = Self> + '_ {
        (0..self.num_vars()).filter_map(move |i| self.div_var(i))
    }

    /// Least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        let mut exponents = [0u16; MAX_VARS];
        let n = self.num_vars.max(other.num_vars) as usize;
        let mut degree = 0u32;
        for (i, e) in exponents.iter_mut().enumerate().take(n) {
            *e = self.exponents[i].max(other.exponents[i]);
            degree += u32::from(*e);
        }

        Self {
            exponents,
            num_vars: n as u8,
            degree,
        }
    }

    /// Evaluates the monomial at a point.
    #[must_use]
    pub fn evaluate(&self, point: &[f64]) -> f64 {
        self.exponents()
            .iter()
            .zip(point)
            .filter(|(&e, _)| e > 0)
            .map(|(&e, &x)| x.powi(i32::from(e)))
            .product()
    }

    /// Compares by graded reverse lexicographic order.
    #[must_use]
    pub fn cmp_grevlex(&self, other: &Self) -> Ordering {
        match self.degree.cmp(&other.degree) {
            Ordering::Equal => {}
            ord => return ord,
        }

        let n = self.num_vars.max(other.num_vars) as usize;
        for i in (0..n).rev() {
            match other.exponents[i].cmp(&self.exponents[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Compares by graded lexicographic order.
    #[must_use]
    pub fn cmp_grlex(&self, other: &Self) -> Ordering {
        match self.degree.cmp(&other.degree) {
            Ordering::Equal => self.cmp_lex(other),
            ord => ord,
        }
    }

    /// Compares by pure lexicographic order.
    #[must_use]
    pub fn cmp_lex(&self, other: &Self) -> Ordering {
        let n = self.num_vars.max(other.num_vars) as usize;
        for i in 0..n {
            match self.exponents[i].cmp(&other.exponents[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Renders the monomial with the given symbol names.
    #[must_use]
    pub fn display_with(&self, symbols: &[String]) -> String {
        let parts: Vec<String> = self
            .exponents()
            .iter()
            .enumerate()
            .filter(|(_, &e)| e > 0)
            .map(|(i, &e)| {
                let name = symbols.get(i).cloned().unwrap_or_else(|| format!("x{i}"));
                if e == 1 {
                    name
                } else {
                    format!("{name}^{e}")
                }
            })
            .collect();

        if parts.is_empty() {
            "1".to_string()
        } else {
            parts.join("*")
        }
    }
}

impl PartialEq for Monomial {
    fn eq(&self, other: &Self) -> bool {
        if self.degree != other.degree {
            return false;
        }
        let n = self.num_vars.max(other.num_vars) as usize;
        self.exponents[..n] == other.exponents[..n]
    }
}

impl Eq for Monomial {}

impl Hash for Monomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal monomials may differ in num_vars; hash up to the last non-zero exponent.
        self.degree.hash(state);
        let last = self
            .exponents
            .iter()
            .rposition(|&e| e != 0)
            .map_or(0, |i| i + 1);
        self.exponents[..last].hash(state);
    }
}

impl fmt::Debug for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mono({})", self.display_with(&[]))
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with(&[]))
    }
}

impl Default for Monomial {
    fn default() -> Self {
        Self::one(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monomial_mul() {
        let m1 = Monomial::new(&[1, 2, 0]);
        let m2 = Monomial::new(&[2, 0, 1]);

        let product = m1.mul(&m2);
        assert_eq!(product.exponents(), &[3, 2, 1]);
        assert_eq!(product.total_degree(), 6);
    }

    #[test]
    fn test_monomial_div() {
        let m1 = Monomial::new(&[3, 2, 1]);
        let m2 = Monomial::new(&[1, 1, 0]);

        let quotient = m1.div(&m2).unwrap();
        assert_eq!(quotient.exponents(), &[2, 1, 1]);

        let x = Monomial::new(&[1, 0, 0]);
        let x2 = Monomial::new(&[2, 0, 0]);
        assert!(x.div(&x2).is_none());
    }

    #[test]
    fn test_mul_div_var() {
        let xy = Monomial::new(&[1, 1]);
        let x2y = xy.mul_var(0);
        assert_eq!(x2y, Monomial::new(&[2, 1]));
        assert_eq!(x2y.div_var(1), Some(Monomial::new(&[2, 0])));
        assert_eq!(Monomial::new(&[2, 0]).div_var(1), None);
    }

    #[test]
    fn test_direct_divisors() {
        let x2y = Monomial::new(&[2, 1]);
        let divisors: Vec<_> = x2y.direct_divisors().collect();
        assert_eq!(divisors, vec![Monomial::new(&[1, 1]), Monomial::new(&[2, 0])]);
        assert_eq!(Monomial::one(2).direct_divisors().count(), 0);
    }

    #[test]
    fn test_equality_ignores_trailing_zeros() {
        use rustc_hash::FxHashSet;

        let a = Monomial::new(&[1, 0]);
        let b = Monomial::new(&[1, 0, 0, 0]);
        assert_eq!(a, b);

        let set: FxHashSet<Monomial> = [a].into_iter().collect();
        assert!(set.contains(&b));
    }

    #[test]
    fn test_grevlex_ordering() {
        // x^2 > xy > y^2 > x > y > 1
        let x2 = Monomial::new(&[2, 0]);
        let xy = Monomial::new(&[1, 1]);
        let y2 = Monomial::new(&[0, 2]);
        let x = Monomial::new(&[1, 0]);
        let y = Monomial::new(&[0, 1]);
        let one = Monomial::one(2);

        assert_eq!(x2.cmp_grevlex(&xy), Ordering::Greater);
        assert_eq!(xy.cmp_grevlex(&y2), Ordering::Greater);
        assert_eq!(y2.cmp_grevlex(&x), Ordering::Greater);
        assert_eq!(x.cmp_grevlex(&y), Ordering::Greater);
        assert_eq!(y.cmp_grevlex(&one), Ordering::Greater);
    }

    #[test]
    fn test_grevlex_differs_from_grlex() {
        // x*z^2 vs y^3 in three variables: grlex says x*z^2 > y^3, grevlex the reverse.
        let xz2 = Monomial::new(&[1, 0, 2]);
        let y3 = Monomial::new(&[0, 3, 0]);
        assert_eq!(xz2.cmp_grlex(&y3), Ordering::Greater);
        assert_eq!(xz2.cmp_grevlex(&y3), Ordering::Less);
    }

    #[test]
    fn test_evaluate() {
        let x2y = Monomial::new(&[2, 1]);
        assert!((x2y.evaluate(&[3.0, -2.0]) + 18.0).abs() < 1e-12);
        assert!((Monomial::one(2).evaluate(&[3.0, -2.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let m = Monomial::new(&[2, 0, 1]);
        let symbols = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(m.display_with(&symbols), "a^2*c");
        assert_eq!(m.to_string(), "x0^2*x2");
    }
}
