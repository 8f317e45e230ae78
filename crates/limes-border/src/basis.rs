//! Bases of the quotient ring and the border-basis artifact.
//!
//! [`Basis`] is the capability set shared by quotient-ring bases: reduction
//! into the quotient basis, multiplication matrices and zero extraction.
//! Most operations have default implementations in terms of
//! [`Basis::quotient`]; an implementor that provides nothing else reports
//! [`BasisError::UnimplementedOperation`].
//!
//! [`BorderBasis`] is the one concrete implementor. It is immutable once
//! built: the factory and [`BorderBasis::from_parts`] are the only ways to
//! obtain one, and both validate the basis invariants.

use limes_linalg::{
    leading_column, simultaneously_diagonalize, DenseMatrix, DiagonalizationConfig, LinalgError,
};
use limes_poly::{Monomial, PolyRing, Polynomial};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::BorderBasisConfig;
use crate::error::{BasisError, BasisResult};
use crate::universe::{ComputationalUniverse, DegreeBoundedUniverse, VectorSpace};

/// Operations on a basis of the quotient ring R/I.
pub trait Basis {
    /// The ambient ring.
    fn ring(&self) -> &PolyRing;

    /// Polynomials spanning the ideal part.
    fn generator_basis(&self) -> &[Polynomial];

    /// The monomial basis O of R/I.
    fn quotient_basis(&self) -> &[Monomial];

    /// Reduces `f` modulo the ideal into the span of O.
    fn quotient(&self, f: &Polynomial) -> BasisResult<Polynomial> {
        let _ = f;
        Err(BasisError::UnimplementedOperation("quotient"))
    }

    /// Coordinates of `quotient(f)` in O.
    fn normal_form_vector(&self, f: &Polynomial) -> BasisResult<Vec<f64>> {
        let q = self.quotient(f)?;
        let basis = self.quotient_basis();
        let mut coords = vec![0.0; basis.len()];
        for (m, c) in q.terms() {
            let j = basis.iter().position(|b| b == m).ok_or_else(|| {
                BasisError::InvalidBasis(format!(
                    "reduction produced {}, which is not in the quotient basis",
                    m.display_with(self.ring().symbols())
                ))
            })?;
            coords[j] = *c;
        }
        Ok(coords)
    }

    /// Matrix of multiplication by `f` on R/I; column j holds the
    /// coordinates of f·oⱼ.
    fn multiplication_matrix(&self, f: &Polynomial) -> BasisResult<DenseMatrix<f64>> {
        let basis = self.quotient_basis();
        let mut matrix = DenseMatrix::zeros(basis.len(), basis.len());
        for (j, o) in basis.iter().enumerate() {
            let column = self.normal_form_vector(&f.mul_term(o, 1.0))?;
            matrix.set_col(j, &column);
        }
        Ok(matrix)
    }

    /// Multiplication matrices of the ring variables, in variable order.
    fn formal_multiplication_matrices(&self) -> BasisResult<Vec<DenseMatrix<f64>>> {
        self.ring()
            .vars()
            .iter()
            .map(|x| self.multiplication_matrix(x))
            .collect()
    }

    /// The border ∂O = (x₀O ∪ … ∪ xₙ₋₁O) \ O, largest first.
    fn border(&self) -> Vec<Monomial> {
        let basis = self.quotient_basis();
        let num_vars = self.ring().num_vars();
        let inside: FxHashSet<Monomial> = basis.iter().copied().collect();
        let mut seen = FxHashSet::default();
        let mut border: Vec<Monomial> = basis
            .iter()
            .flat_map(|o| (0..num_vars).map(move |i| o.mul_var(i)))
            .filter(|m| !inside.contains(m) && seen.insert(*m))
            .collect();
        self.ring().order().sort_descending(&mut border);
        border
    }

    /// The border polynomials b − NF(b), one per border term.
    fn border_polynomials(&self) -> BasisResult<Vec<Polynomial>> {
        let ring = self.ring();
        self.border()
            .into_iter()
            .map(|b| {
                let term = Polynomial::term(b, 1.0, ring.num_vars(), ring.order());
                Ok(term.sub(&self.quotient(&term)?))
            })
            .collect()
    }

    /// Whether R/I is finite-dimensional with the given quotient basis:
    /// O is non-empty and every border term reduces into it.
    fn is_zero_dimensional(&self) -> bool {
        let ring = self.ring();
        !self.quotient_basis().is_empty()
            && self.border().into_iter().all(|b| {
                let term = Polynomial::term(b, 1.0, ring.num_vars(), ring.order());
                self.quotient(&term).is_ok()
            })
    }

    /// Largest ‖MᵢMⱼ − MⱼMᵢ‖∞ over pairs of variable multiplication
    /// matrices; zero for an exact border basis.
    fn commutator_defect(&self) -> BasisResult<f64> {
        let matrices = self.formal_multiplication_matrices()?;
        let mut defect: f64 = 0.0;
        for (i, a) in matrices.iter().enumerate() {
            for b in &matrices[i + 1..] {
                defect = defect.max(a.commutator(b).norm_inf());
            }
        }
        Ok(defect)
    }

    /// Settings of the simultaneous diagonalization behind [`Basis::zeros`].
    fn diagonalization_config(&self) -> DiagonalizationConfig {
        DiagonalizationConfig::default()
    }

    /// The real zeros of the ideal, one point per element of O.
    fn zeros(&self) -> BasisResult<Vec<Vec<f64>>> {
        if !self.is_zero_dimensional() {
            return Err(BasisError::NotZeroDimensional);
        }
        let matrices = self.formal_multiplication_matrices()?;
        extract_zeros(&matrices, self.quotient_basis().len(), &self.diagonalization_config())
    }
}

/// Reads the common eigenvectors of commuting multiplication matrices as
/// points.
fn extract_zeros(
    matrices: &[DenseMatrix<f64>],
    dimension: usize,
    config: &DiagonalizationConfig,
) -> BasisResult<Vec<Vec<f64>>> {
    if matrices.is_empty() {
        // R = ℝ: a single point with no coordinates per basis element.
        return Ok(vec![Vec::new(); dimension]);
    }
    match simultaneously_diagonalize(matrices, config) {
        Ok(diagonalization) => Ok(diagonalization.points()),
        Err(LinalgError::ComplexEigenvalues { index }) => Err(BasisError::NonRealZeros { index }),
        Err(e) => Err(e.into()),
    }
}

/// Diagnostics of one factory run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Fixed-point iterations performed.
    pub iterations: usize,
    /// Degree bound of the final universe.
    pub degree: u32,
    /// Dimension of the quotient ring, |O|.
    pub quotient_dimension: usize,
    /// Reductions that lost rank against their input.
    pub rank_deficiencies: usize,
}

/// A numerical border basis: universe L, order ideal O and the reduced
/// space V whose pivots are L \ O.
#[derive(Clone, Debug)]
pub struct BorderBasis<U: ComputationalUniverse = DegreeBoundedUniverse> {
    universe: U,
    order_ideal: Vec<Monomial>,
    order_index: FxHashMap<Monomial, usize>,
    space: VectorSpace,
    polynomials: Vec<Polynomial>,
    /// O-coordinates of the normal form of every pivot monomial.
    rules: FxHashMap<Monomial, Vec<f64>>,
    config: BorderBasisConfig,
    report: GenerationReport,
}

impl<U: ComputationalUniverse> BorderBasis<U> {
    /// Rebuilds a border basis from its parts, checking every invariant.
    ///
    /// `space` must be over the columns of `universe`, in reduced row
    /// echelon form with unit pivots; its pivots together with
    /// `order_ideal` must partition the universe, and every row tail must
    /// be supported on the order ideal.
    pub fn from_parts(
        universe: U,
        order_ideal: Vec<Monomial>,
        space: VectorSpace,
        delta: f64,
    ) -> BasisResult<Self> {
        let config = BorderBasisConfig::default().with_delta(delta);
        Self::assemble(universe, order_ideal, space, config, GenerationReport::default())
    }

    pub(crate) fn assemble(
        universe: U,
        mut order_ideal: Vec<Monomial>,
        space: VectorSpace,
        config: BorderBasisConfig,
        report: GenerationReport,
    ) -> BasisResult<Self> {
        let delta = config.delta;
        let symbols = universe.symbols().to_vec();
        let show = |m: &Monomial| m.display_with(&symbols);

        if order_ideal.is_empty() {
            return Err(BasisError::InvalidBasis("the order ideal is empty".to_string()));
        }
        if space.columns() != &universe.monomials()[..] {
            return Err(BasisError::InvalidBasis(
                "the space is not laid out over the universe's columns".to_string(),
            ));
        }

        let order = universe.ring().order();
        order_ideal.sort_by(|a, b| order.compare(a, b));
        order_ideal.dedup();
        let order_index: FxHashMap<Monomial, usize> =
            order_ideal.iter().enumerate().map(|(j, m)| (*m, j)).collect();

        for o in &order_ideal {
            if !universe.contains(o) {
                return Err(BasisError::InvalidBasis(format!("{} lies outside the universe", show(o))));
            }
            if let Some(d) = o.direct_divisors().find(|d| !order_index.contains_key(d)) {
                return Err(BasisError::InvalidBasis(format!(
                    "the order ideal contains {} but not its divisor {}",
                    show(o),
                    show(&d)
                )));
            }
        }

        let columns = space.columns();
        let mut rules = FxHashMap::default();
        for row in space.matrix().rows() {
            let lead = leading_column(row, delta)
                .ok_or_else(|| BasisError::InvalidBasis("the space has a vanishing row".to_string()))?;
            let t = columns[lead];
            if order_index.contains_key(&t) {
                return Err(BasisError::InvalidBasis(format!(
                    "leading term {} belongs to the order ideal",
                    show(&t)
                )));
            }
            if (row[lead] - 1.0).abs() > delta {
                return Err(BasisError::InvalidBasis(format!(
                    "leading coefficient of {} is {}, not 1",
                    show(&t),
                    row[lead]
                )));
            }

            let mut tail = vec![0.0; order_ideal.len()];
            for (j, &c) in row.iter().enumerate().skip(lead + 1) {
                if let Some(&k) = order_index.get(&columns[j]) {
                    tail[k] = -c;
                    continue;
                }
                if c.abs() <= delta {
                    continue;
                }
                return Err(BasisError::InvalidBasis(format!(
                    "the row led by {} has a term {} outside the order ideal",
                    show(&t),
                    show(&columns[j])
                )));
            }

            if rules.insert(t, tail).is_some() {
                return Err(BasisError::InvalidBasis(format!(
                    "two rows share the leading term {}",
                    show(&t)
                )));
            }
        }

        if rules.len() + order_ideal.len() != columns.len() {
            return Err(BasisError::InvalidBasis(format!(
                "{} leading terms and {} order-ideal monomials do not partition {} universe monomials",
                rules.len(),
                order_ideal.len(),
                columns.len()
            )));
        }

        let polynomials = space.polynomials(universe.ring());
        Ok(Self {
            universe,
            order_ideal,
            order_index,
            space,
            polynomials,
            rules,
            config,
            report,
        })
    }

    /// The universe the basis was computed in.
    #[must_use]
    pub fn universe(&self) -> &U {
        &self.universe
    }

    /// The reduced space V.
    #[must_use]
    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    /// Diagnostics of the run that produced this basis.
    #[must_use]
    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// Tolerance δ.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.config.delta
    }

    /// O-coordinates of the normal form of a monomial.
    ///
    /// Monomials outside O ∪ L are reached from 1 one variable at a time,
    /// x₀ first, so every intermediate product lies in O ∪ ∂O.
    fn monomial_normal_form(&self, m: &Monomial) -> BasisResult<Vec<f64>> {
        if let Some(&j) = self.order_index.get(m) {
            let mut unit = vec![0.0; self.order_ideal.len()];
            unit[j] = 1.0;
            return Ok(unit);
        }
        if let Some(rule) = self.rules.get(m) {
            return Ok(rule.clone());
        }

        let one = Monomial::one(self.universe.ring().num_vars());
        let start = self
            .order_index
            .get(&one)
            .ok_or_else(|| BasisError::InvalidBasis("1 is not in the order ideal".to_string()))?;
        let mut coords = vec![0.0; self.order_ideal.len()];
        coords[*start] = 1.0;
        for i in 0..m.num_vars() {
            for _ in 0..m.exponent(i) {
                coords = self.multiply_by_var(&coords, i)?;
            }
        }
        Ok(coords)
    }

    /// Coordinates of xᵢ·g for g given by its O-coordinates.
    fn multiply_by_var(&self, coords: &[f64], var: usize) -> BasisResult<Vec<f64>> {
        let mut product = vec![0.0; self.order_ideal.len()];
        for (o, &c) in self.order_ideal.iter().zip(coords) {
            if c == 0.0 {
                continue;
            }
            let shifted = o.mul_var(var);
            if let Some(&j) = self.order_index.get(&shifted) {
                product[j] += c;
            } else {
                let rule = self.rules.get(&shifted).ok_or_else(|| {
                    BasisError::InvalidBasis(format!(
                        "border term {} has no reduction rule",
                        shifted.display_with(self.universe.symbols())
                    ))
                })?;
                for (p, r) in product.iter_mut().zip(rule) {
                    *p += c * r;
                }
            }
        }
        Ok(product)
    }

    fn check_ring(&self, f: &Polynomial) -> BasisResult<()> {
        let expected = self.universe.ring().num_vars();
        if f.num_vars() == expected {
            Ok(())
        } else {
            Err(BasisError::RingMismatch {
                expected,
                found: f.num_vars(),
            })
        }
    }
}

impl<U: ComputationalUniverse> Basis for BorderBasis<U> {
    fn ring(&self) -> &PolyRing {
        self.universe.ring()
    }

    fn generator_basis(&self) -> &[Polynomial] {
        &self.polynomials
    }

    fn quotient_basis(&self) -> &[Monomial] {
        &self.order_ideal
    }

    fn quotient(&self, f: &Polynomial) -> BasisResult<Polynomial> {
        let coords = self.normal_form_vector(f)?;
        let ring = self.ring();
        let terms = self
            .order_ideal
            .iter()
            .zip(&coords)
            .filter(|(_, c)| **c != 0.0)
            .map(|(m, c)| (*m, *c))
            .collect();
        Ok(Polynomial::new(terms, ring.num_vars(), ring.order()))
    }

    fn normal_form_vector(&self, f: &Polynomial) -> BasisResult<Vec<f64>> {
        self.check_ring(f)?;
        let mut coords = vec![0.0; self.order_ideal.len()];
        for (m, c) in f.terms() {
            let nf = self.monomial_normal_form(m)?;
            for (acc, v) in coords.iter_mut().zip(&nf) {
                *acc += c * v;
            }
        }
        for c in &mut coords {
            if c.abs() <= self.config.delta {
                *c = 0.0;
            }
        }
        Ok(coords)
    }

    fn formal_multiplication_matrices(&self) -> BasisResult<Vec<DenseMatrix<f64>>> {
        let ring = self.ring();
        (0..ring.num_vars())
            .into_par_iter()
            .map(|i| self.multiplication_matrix(&ring.var(i)))
            .collect()
    }

    fn border_polynomials(&self) -> BasisResult<Vec<Polynomial>> {
        let border: FxHashSet<Monomial> = self.border().into_iter().collect();
        Ok(self
            .polynomials
            .iter()
            .filter(|p| p.leading_monomial().is_some_and(|m| border.contains(m)))
            .cloned()
            .collect())
    }

    fn is_zero_dimensional(&self) -> bool {
        !self.order_ideal.is_empty() && self.border().iter().all(|b| self.rules.contains_key(b))
    }

    fn diagonalization_config(&self) -> DiagonalizationConfig {
        self.config.diagonalization()
    }
}
