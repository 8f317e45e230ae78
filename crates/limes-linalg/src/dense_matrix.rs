//! Dense floating-point matrices.
//!
//! Matrices in the border-basis pipeline are small (a few hundred rows at
//! most), so a row-major dense layout with simple loops is the right
//! trade-off. Products above a size threshold are computed in parallel.

use std::ops::{Add, Index, IndexMut, Sub};

use num_traits::Float;
use rayon::prelude::*;

use crate::error::{LinalgError, LinalgResult};

/// Row count above which [`DenseMatrix::mm`] switches to rayon.
const PARALLEL_THRESHOLD: usize = 64;

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<F> {
    data: Vec<F>,
    num_rows: usize,
    num_cols: usize,
}

impl<F: Float> DenseMatrix<F> {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![F::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = F::one();
        }
        m
    }

    /// Creates a matrix from rows of equal length.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<F>>) -> Self {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == num_cols),
            "rows must have equal length"
        );
        Self {
            data: rows.into_iter().flatten().collect(),
            num_rows,
            num_cols,
        }
    }

    /// Creates an empty matrix with a fixed number of columns.
    #[must_use]
    pub fn with_cols(num_cols: usize) -> Self {
        Self::zeros(0, num_cols)
    }

    /// Creates a matrix from a generating function.
    #[must_use]
    pub fn from_fn(num_rows: usize, num_cols: usize, f: impl Fn(usize, usize) -> F) -> Self {
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for i in 0..num_rows {
            for j in 0..num_cols {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Returns the entry at (row, col), if in range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<F> {
        (row < self.num_rows && col < self.num_cols).then(|| self.data[row * self.num_cols + col])
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[F] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a mutable slice of the specified row.
    pub fn row_mut(&mut self, row: usize) -> &mut [F] {
        let start = row * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[F]> + '_ {
        (0..self.num_rows).map(move |i| self.row(i))
    }

    /// Returns a column as a vector.
    #[must_use]
    pub fn col(&self, col: usize) -> Vec<F> {
        (0..self.num_rows).map(|row| self[(row, col)]).collect()
    }

    /// Sets a column from a slice.
    ///
    /// # Panics
    ///
    /// Panics if the slice length differs from the number of rows.
    pub fn set_col(&mut self, col: usize, values: &[F]) {
        assert_eq!(values.len(), self.num_rows);
        for (row, &val) in values.iter().enumerate() {
            self[(row, col)] = val;
        }
    }

    /// Appends a row.
    ///
    /// # Panics
    ///
    /// Panics if the row length differs from the number of columns.
    pub fn push_row(&mut self, row: &[F]) {
        assert_eq!(row.len(), self.num_cols);
        self.data.extend_from_slice(row);
        self.num_rows += 1;
    }

    /// Stacks the rows of `other` below `self`.
    pub fn vstack(&self, other: &Self) -> LinalgResult<Self> {
        if self.num_cols != other.num_cols {
            return Err(LinalgError::DimensionMismatch {
                expected: (other.num_rows, self.num_cols),
                found: (other.num_rows, other.num_cols),
            });
        }
        let mut data = self.data.clone();
        data.extend_from_slice(&other.data);
        Ok(Self {
            data,
            num_rows: self.num_rows + other.num_rows,
            num_cols: self.num_cols,
        })
    }

    /// Keeps only the listed rows, in the listed order.
    #[must_use]
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        let mut data = Vec::with_capacity(rows.len() * self.num_cols);
        for &r in rows {
            data.extend_from_slice(self.row(r));
        }
        Self {
            data,
            num_rows: rows.len(),
            num_cols: self.num_cols,
        }
    }

    /// Keeps only the listed columns, in the listed order.
    #[must_use]
    pub fn select_cols(&self, cols: &[usize]) -> Self {
        Self::from_fn(self.num_rows, cols.len(), |i, j| self[(i, cols[j])])
    }

    /// Matrix-vector multiply: y = A * x.
    ///
    /// # Panics
    ///
    /// Panics if `x` does not have one entry per column.
    #[must_use]
    pub fn mv(&self, x: &[F]) -> Vec<F> {
        assert_eq!(x.len(), self.num_cols);
        self.rows()
            .map(|row| {
                row.iter()
                    .zip(x)
                    .fold(F::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect()
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.num_cols, self.num_rows, |i, j| self[(j, i)])
    }

    /// Scales all entries by a scalar.
    #[must_use]
    pub fn scale(&self, scalar: F) -> Self {
        Self {
            data: self.data.iter().map(|&v| v * scalar).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for k in 0..self.num_cols {
            self.data.swap(i * self.num_cols + k, j * self.num_cols + k);
        }
    }

    /// Adds a scaled row to another: row[target] += scale * row[source].
    pub fn add_scaled_row(&mut self, target: usize, source: usize, scale: F) {
        for k in 0..self.num_cols {
            let val = self[(source, k)] * scale;
            self[(target, k)] = self[(target, k)] + val;
        }
    }

    /// Scales a row by a scalar.
    pub fn scale_row(&mut self, row: usize, scale: F) {
        for v in self.row_mut(row) {
            *v = *v * scale;
        }
    }

    /// Largest entry magnitude.
    #[must_use]
    pub fn max_abs(&self) -> F {
        self.data.iter().fold(F::zero(), |acc, v| acc.max(v.abs()))
    }

    /// Infinity norm (maximum absolute row sum).
    #[must_use]
    pub fn norm_inf(&self) -> F {
        self.rows()
            .map(|row| row.iter().fold(F::zero(), |acc, v| acc + v.abs()))
            .fold(F::zero(), F::max)
    }

    /// Sets every entry with |x| ≤ `tol` to zero.
    pub fn chop(&mut self, tol: F) {
        for v in &mut self.data {
            if v.abs() <= tol {
                *v = F::zero();
            }
        }
    }

    /// Whether all entries agree with `other` up to `tol`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: F) -> bool {
        self.num_rows == other.num_rows
            && self.num_cols == other.num_cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| (a - b).abs() <= tol)
    }

    /// Quadratic form xᵀ A x.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square of size `x.len()`.
    #[must_use]
    pub fn quadratic_form(&self, x: &[F]) -> F {
        assert_eq!(x.len(), self.num_rows);
        self.mv(x)
            .iter()
            .zip(x)
            .fold(F::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Solves the square system A x = b by Gaussian elimination with
    /// partial pivoting, treating pivots with |p| ≤ `tol` as zero.
    pub fn solve(&self, b: &[F], tol: F) -> LinalgResult<Vec<F>> {
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                rows: self.num_rows,
                cols: self.num_cols,
            });
        }
        if b.len() != self.num_rows {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.num_rows, 1),
                found: (b.len(), 1),
            });
        }

        let n = self.num_rows;
        let mut a = self.clone();
        let mut rhs = b.to_vec();

        for col in 0..n {
            let pivot = (col..n)
                .max_by(|&i, &j| {
                    a[(i, col)]
                        .abs()
                        .partial_cmp(&a[(j, col)].abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(col);
            if a[(pivot, col)].abs() <= tol {
                return Err(LinalgError::Singular);
            }
            a.swap_rows(col, pivot);
            rhs.swap(col, pivot);

            for row in col + 1..n {
                let factor = a[(row, col)] / a[(col, col)];
                if factor != F::zero() {
                    a.add_scaled_row(row, col, -factor);
                    rhs[row] = rhs[row] - factor * rhs[col];
                }
            }
        }

        // Back substitution
        let mut x = vec![F::zero(); n];
        for row in (0..n).rev() {
            let tail = (row + 1..n).fold(F::zero(), |acc, k| acc + a[(row, k)] * x[k]);
            x[row] = (rhs[row] - tail) / a[(row, row)];
        }
        Ok(x)
    }
}

impl<F: Float + Send + Sync> DenseMatrix<F> {
    /// Matrix-matrix multiply: C = A * B.
    ///
    /// Rows of the product are computed in parallel for large operands.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows);

        let row_product = |i: usize| -> Vec<F> {
            (0..other.num_cols)
                .map(|j| {
                    (0..self.num_cols).fold(F::zero(), |acc, k| acc + self[(i, k)] * other[(k, j)])
                })
                .collect()
        };

        let data: Vec<F> = if self.num_rows >= PARALLEL_THRESHOLD {
            (0..self.num_rows)
                .into_par_iter()
                .flat_map_iter(row_product)
                .collect()
        } else {
            (0..self.num_rows).flat_map(row_product).collect()
        };

        Self {
            data,
            num_rows: self.num_rows,
            num_cols: other.num_cols,
        }
    }

    /// Commutator AB − BA.
    #[must_use]
    pub fn commutator(&self, other: &Self) -> Self {
        &self.mm(other) - &other.mm(self)
    }
}

impl<F> Index<(usize, usize)> for DenseMatrix<F> {
    type Output = F;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<F> IndexMut<(usize, usize)> for DenseMatrix<F> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

impl<F: Float> Add for &DenseMatrix<F> {
    type Output = DenseMatrix<F>;

    fn add(self, other: Self) -> DenseMatrix<F> {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        DenseMatrix {
            data: self.data.iter().zip(&other.data).map(|(&a, &b)| a + b).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

impl<F: Float> Sub for &DenseMatrix<F> {
    type Output = DenseMatrix<F>;

    fn sub(self, other: Self) -> DenseMatrix<F> {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        DenseMatrix {
            data: self.data.iter().zip(&other.data).map(|(&a, &b)| a - b).collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> DenseMatrix<f64> {
        DenseMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect())
    }

    #[test]
    fn test_zeros_and_identity() {
        let z: DenseMatrix<f64> = DenseMatrix::zeros(3, 4);
        assert_eq!(z.num_rows(), 3);
        assert_eq!(z.num_cols(), 4);
        assert_eq!(z.max_abs(), 0.0);

        let id: DenseMatrix<f64> = DenseMatrix::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn test_mv() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(a.mv(&[1.0, 2.0, 3.0]), vec![14.0, 32.0]);
    }

    #[test]
    fn test_mm() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
        assert_eq!(a.mm(&b), m(&[&[19.0, 22.0], &[43.0, 50.0]]));
    }

    #[test]
    fn test_mm_parallel_matches_sequential() {
        let n = PARALLEL_THRESHOLD + 3;
        let a = DenseMatrix::from_fn(n, n, |i, j| ((i * 7 + j * 3) % 11) as f64 - 5.0);
        let id = DenseMatrix::identity(n);
        assert_eq!(a.mm(&id), a);
        assert_eq!(id.mm(&a), a);
    }

    #[test]
    fn test_transpose() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let t = a.transpose();
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t[(1, 0)], 2.0);
        assert_eq!(t[(2, 1)], 6.0);
    }

    #[test]
    fn test_select_and_stack() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        assert_eq!(a.select_rows(&[2, 0]), m(&[&[5.0, 6.0], &[1.0, 2.0]]));
        assert_eq!(a.select_cols(&[1]), m(&[&[2.0], &[4.0], &[6.0]]));

        let stacked = a.vstack(&m(&[&[7.0, 8.0]])).unwrap();
        assert_eq!(stacked.num_rows(), 4);
        assert_eq!(stacked.row(3), &[7.0, 8.0]);
        assert!(a.vstack(&m(&[&[1.0]])).is_err());
    }

    #[test]
    fn test_solve() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let x = a.solve(&[5.0, 11.0], 1e-12).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);

        let singular = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert_eq!(singular.solve(&[1.0, 2.0], 1e-12), Err(LinalgError::Singular));
    }

    #[test]
    fn test_commutator_and_norms() {
        let a = m(&[&[0.0, 1.0], &[0.0, 0.0]]);
        let b = m(&[&[0.0, 0.0], &[1.0, 0.0]]);
        let c = a.commutator(&b);
        assert_eq!(c, m(&[&[1.0, 0.0], &[0.0, -1.0]]));
        assert_eq!(c.norm_inf(), 1.0);

        let diag = m(&[&[2.0, 0.0], &[0.0, 3.0]]);
        assert_eq!(diag.commutator(&diag).max_abs(), 0.0);
    }

    #[test]
    fn test_quadratic_form_and_chop() {
        let mut a = m(&[&[2.0, 1e-14], &[0.0, 3.0]]);
        assert!((a.quadratic_form(&[1.0, 1.0]) - 5.0).abs() < 1e-12);
        a.chop(1e-12);
        assert_eq!(a[(0, 1)], 0.0);
    }
}
