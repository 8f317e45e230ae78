//! Computational universes.
//!
//! A universe is a finite, ordered set of monomials L together with the
//! column layout that turns polynomials supported on L into matrix rows.
//! Border-basis construction never leaves the current universe; when the
//! border of the candidate order ideal escapes L, the universe is grown with
//! [`ComputationalUniverse::extend`] and the work is re-embedded.
//!
//! Columns are kept in descending monomial order, so the leftmost non-zero
//! entry of a row is its leading term.

use std::sync::Arc;

use limes_linalg::{leading_column, srref, DenseMatrix};
use limes_poly::{Monomial, PolyRing, Polynomial};
use log::trace;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{BasisError, BasisResult};

/// A linear subspace of ⟨L⟩ stored as the rows of a matrix over L's columns.
#[derive(Clone, Debug)]
pub struct VectorSpace {
    columns: Arc<[Monomial]>,
    matrix: DenseMatrix<f64>,
}

impl VectorSpace {
    /// Wraps `matrix` whose column `j` stands for `columns[j]`.
    ///
    /// # Panics
    ///
    /// Panics if the column counts disagree.
    #[must_use]
    pub fn new(columns: Arc<[Monomial]>, matrix: DenseMatrix<f64>) -> Self {
        assert_eq!(
            columns.len(),
            matrix.num_cols(),
            "matrix has {} columns for {} monomials",
            matrix.num_cols(),
            columns.len()
        );
        Self { columns, matrix }
    }

    /// Monomial labels of the columns.
    #[must_use]
    pub fn columns(&self) -> &[Monomial] {
        &self.columns
    }

    /// The spanning rows.
    #[must_use]
    pub fn matrix(&self) -> &DenseMatrix<f64> {
        &self.matrix
    }

    /// Number of rows; the dimension once the space is reduced.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.matrix.num_rows()
    }

    /// The same space in tolerant reduced row echelon form.
    #[must_use]
    pub fn reduce(&self, tol: f64) -> Self {
        Self {
            columns: Arc::clone(&self.columns),
            matrix: srref(&self.matrix, tol).matrix,
        }
    }

    /// Leading monomial of every non-vanishing row.
    #[must_use]
    pub fn leading_monomials(&self, tol: f64) -> Vec<Monomial> {
        self.matrix
            .rows()
            .filter_map(|row| leading_column(row, tol))
            .map(|j| self.columns[j])
            .collect()
    }

    /// The rows read back as polynomials of `ring`.
    #[must_use]
    pub fn polynomials(&self, ring: &PolyRing) -> Vec<Polynomial> {
        self.matrix
            .rows()
            .map(|row| {
                let terms = row
                    .iter()
                    .zip(self.columns.iter())
                    .filter(|(c, _)| **c != 0.0)
                    .map(|(c, m)| (*m, *c))
                    .collect();
                Polynomial::new(terms, ring.num_vars(), ring.order())
            })
            .collect()
    }
}

/// A finite monomial set in which border-basis construction takes place.
pub trait ComputationalUniverse: Clone + Send + Sync {
    /// The ambient ring.
    fn ring(&self) -> &PolyRing;

    /// Symbol names of the ambient ring.
    fn symbols(&self) -> &[String] {
        self.ring().symbols()
    }

    /// Largest total degree present.
    fn degree(&self) -> u32;

    /// Numerical tolerance δ.
    fn tolerance(&self) -> f64;

    /// The monomials of L in descending order.
    fn monomials(&self) -> &Arc<[Monomial]>;

    /// Column of `m`, if `m ∈ L`.
    fn column_of(&self, m: &Monomial) -> Option<usize>;

    /// Whether `m ∈ L`.
    fn contains(&self, m: &Monomial) -> bool {
        self.column_of(m).is_some()
    }

    /// Rows for the given polynomials over L's columns.
    ///
    /// Terms outside L are ignored when their coefficient is at most δ and
    /// rejected otherwise.
    fn vector_space(&self, polys: &[Polynomial]) -> BasisResult<VectorSpace> {
        let columns = self.monomials();
        let num_vars = self.ring().num_vars();
        let mut matrix = DenseMatrix::with_cols(columns.len());

        for p in polys {
            if p.num_vars() != num_vars {
                return Err(BasisError::RingMismatch {
                    expected: num_vars,
                    found: p.num_vars(),
                });
            }
            let mut row = vec![0.0; columns.len()];
            for (m, c) in p.terms() {
                match self.column_of(m) {
                    Some(j) => row[j] += c,
                    None if c.abs() <= self.tolerance() => {}
                    None => {
                        return Err(BasisError::OutsideUniverse(format!(
                            "{} with coefficient {c:e}",
                            m.display_with(self.symbols())
                        )))
                    }
                }
            }
            matrix.push_row(&row);
        }

        Ok(VectorSpace::new(Arc::clone(columns), matrix))
    }

    /// Re-expresses `space` over L's columns.
    fn embed(&self, space: &VectorSpace) -> BasisResult<VectorSpace> {
        let columns = self.monomials();
        let targets = space
            .columns()
            .iter()
            .map(|m| self.column_of(m))
            .collect::<Vec<_>>();
        let mut matrix = DenseMatrix::with_cols(columns.len());

        for row in space.matrix().rows() {
            let mut embedded = vec![0.0; columns.len()];
            for ((c, target), m) in row.iter().zip(&targets).zip(space.columns()) {
                if *c == 0.0 {
                    continue;
                }
                match target {
                    Some(j) => embedded[*j] += c,
                    None => {
                        return Err(BasisError::OutsideUniverse(format!(
                            "{} with coefficient {c:e}",
                            m.display_with(self.symbols())
                        )))
                    }
                }
            }
            matrix.push_row(&embedded);
        }

        Ok(VectorSpace::new(Arc::clone(columns), matrix))
    }

    /// The smallest reduced space containing `space` that is closed under
    /// multiplication by every variable within L.
    fn stable_extension(&self, space: &VectorSpace) -> BasisResult<VectorSpace>;

    /// Monomials of L that are not leading terms of the reduced `space`,
    /// in L's order.
    fn supplementary_space(&self, space: &VectorSpace) -> Vec<Monomial> {
        let leading: FxHashSet<Monomial> = space.leading_monomials(self.tolerance()).into_iter().collect();
        self.monomials()
            .iter()
            .filter(|m| !leading.contains(*m))
            .copied()
            .collect()
    }

    /// Whether the border of `complement` lies inside L.
    fn contains_extension(&self, complement: &[Monomial]) -> bool {
        let num_vars = self.ring().num_vars();
        complement
            .iter()
            .all(|b| (0..num_vars).all(|i| self.contains(&b.mul_var(i))))
    }

    /// A strictly larger universe containing this one.
    #[must_use]
    fn extend(&self) -> Self;
}

/// All monomials of total degree at most d.
#[derive(Clone, Debug)]
pub struct DegreeBoundedUniverse {
    ring: PolyRing,
    degree: u32,
    tolerance: f64,
    monomials: Arc<[Monomial]>,
    index: FxHashMap<Monomial, usize>,
}

impl DegreeBoundedUniverse {
    /// The universe of monomials of degree at most `degree`.
    ///
    /// The ring's order must be degree-compatible: stable extension relies
    /// on leading terms carrying the top degree of every row.
    pub fn new(ring: &PolyRing, degree: u32, tolerance: f64) -> BasisResult<Self> {
        if !ring.order().is_degree_compatible() {
            return Err(BasisError::InvalidConfig(format!(
                "degree-bounded universes need a degree-compatible order, got {}",
                ring.order()
            )));
        }

        let mut monomials: Vec<Monomial> = homogeneous_layers(ring.num_vars(), degree)
            .into_iter()
            .flatten()
            .collect();
        ring.order().sort_descending(&mut monomials);
        let index = monomials.iter().enumerate().map(|(j, m)| (*m, j)).collect();

        Ok(Self {
            ring: ring.clone(),
            degree,
            tolerance,
            monomials: monomials.into(),
            index,
        })
    }

    /// The smallest universe holding every term of `generators` whose
    /// coefficient exceeds `tolerance`; never below degree 1.
    pub fn from_support(ring: &PolyRing, generators: &[Polynomial], tolerance: f64) -> BasisResult<Self> {
        let mut degree = 1;
        for g in generators {
            if g.num_vars() != ring.num_vars() {
                return Err(BasisError::RingMismatch {
                    expected: ring.num_vars(),
                    found: g.num_vars(),
                });
            }
            for (m, c) in g.terms() {
                if c.abs() > tolerance {
                    degree = degree.max(m.total_degree());
                }
            }
        }
        Self::new(ring, degree, tolerance)
    }

    /// Number of monomials in L.
    #[must_use]
    pub fn len(&self) -> usize {
        self.monomials.len()
    }

    /// Whether L is empty (never, since 1 ∈ L).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monomials.is_empty()
    }

    fn lift_row(
        &self,
        row: &[f64],
        var: Option<usize>,
        outer: &FxHashMap<Monomial, usize>,
        width: usize,
    ) -> Vec<f64> {
        let mut lifted = vec![0.0; width];
        for (c, m) in row.iter().zip(self.monomials.iter()) {
            if *c == 0.0 {
                continue;
            }
            let shifted = var.map_or(*m, |i| m.mul_var(i));
            if let Some(&j) = outer.get(&shifted) {
                lifted[j] += c;
            }
        }
        lifted
    }
}

impl ComputationalUniverse for DegreeBoundedUniverse {
    fn ring(&self) -> &PolyRing {
        &self.ring
    }

    fn degree(&self) -> u32 {
        self.degree
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn monomials(&self) -> &Arc<[Monomial]> {
        &self.monomials
    }

    fn column_of(&self, m: &Monomial) -> Option<usize> {
        self.index.get(m).copied()
    }

    fn stable_extension(&self, space: &VectorSpace) -> BasisResult<VectorSpace> {
        let num_vars = self.ring.num_vars();

        // Columns of L⁺: the degree d+1 layer leads, followed by L itself, so
        // rows whose pivot lies past the first layer are supported on L.
        let mut outer_columns = homogeneous_layers(num_vars, self.degree + 1)
            .pop()
            .unwrap_or_default();
        self.ring.order().sort_descending(&mut outer_columns);
        let num_new = outer_columns.len();
        outer_columns.extend(self.monomials.iter().copied());
        let outer: FxHashMap<Monomial, usize> = outer_columns
            .iter()
            .enumerate()
            .map(|(j, m)| (*m, j))
            .collect();
        let width = outer_columns.len();
        let inner_cols: Vec<usize> = (num_new..width).collect();
        let outer = &outer;

        let mut current = self.embed(space)?.reduce(self.tolerance);
        loop {
            if current.dimension() == 0 {
                return Ok(current);
            }

            let rows: Vec<&[f64]> = current.matrix().rows().collect();
            let lifted: Vec<Vec<f64>> = rows
                .par_iter()
                .flat_map_iter(|row| {
                    std::iter::once(None)
                        .chain((0..num_vars).map(Some))
                        .map(move |var| self.lift_row(row, var, outer, width))
                })
                .collect();

            let echelon = srref(&DenseMatrix::from_rows(lifted), self.tolerance);
            let keep: Vec<usize> = echelon
                .pivots
                .iter()
                .enumerate()
                .filter(|(_, p)| **p >= num_new)
                .map(|(r, _)| r)
                .collect();
            let next = echelon.matrix.select_rows(&keep).select_cols(&inner_cols);

            trace!(
                "stable extension at degree {}: dimension {} -> {}",
                self.degree,
                current.dimension(),
                next.num_rows()
            );

            let grew = next.num_rows() > current.dimension();
            current = VectorSpace::new(Arc::clone(&self.monomials), next);
            if !grew {
                return Ok(current);
            }
        }
    }

    fn extend(&self) -> Self {
        let mut monomials: Vec<Monomial> = homogeneous_layers(self.ring.num_vars(), self.degree + 1)
            .into_iter()
            .flatten()
            .collect();
        self.ring.order().sort_descending(&mut monomials);
        let index = monomials.iter().enumerate().map(|(j, m)| (*m, j)).collect();

        Self {
            ring: self.ring.clone(),
            degree: self.degree + 1,
            tolerance: self.tolerance,
            monomials: monomials.into(),
            index,
        }
    }
}

/// Monomials in `num_vars` variables grouped by total degree 0..=`degree`.
fn homogeneous_layers(num_vars: usize, degree: u32) -> Vec<Vec<Monomial>> {
    let mut layers = vec![vec![Monomial::one(num_vars)]];
    for _ in 0..degree {
        let mut seen = FxHashSet::default();
        let next: Vec<Monomial> = layers
            .last()
            .map(|prev| {
                prev.iter()
                    .flat_map(|m| (0..num_vars).map(move |i| m.mul_var(i)))
                    .filter(|m| seen.insert(*m))
                    .collect()
            })
            .unwrap_or_default();
        layers.push(next);
    }
    layers
}
