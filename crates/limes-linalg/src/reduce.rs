//! Tolerant row reduction.
//!
//! [`srref`] computes a reduced row echelon form in which every entry whose
//! magnitude falls below the tolerance, measured against the scale of its
//! own row, is treated as an exact zero. Rows that collapse under the
//! tolerance are dropped, so the result's row count is the numerical rank.

use num_traits::Float;

use crate::dense_matrix::DenseMatrix;

/// A matrix in reduced row echelon form together with its pivot columns.
#[derive(Clone, Debug, PartialEq)]
pub struct RowEchelon<F> {
    /// The `rank × cols` reduced matrix; pivot entries are exactly one.
    pub matrix: DenseMatrix<F>,
    /// Pivot column of each row, strictly increasing.
    pub pivots: Vec<usize>,
}

impl<F: Float> RowEchelon<F> {
    /// Numerical rank.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Columns that carry no pivot.
    #[must_use]
    pub fn free_columns(&self) -> Vec<usize> {
        let mut is_pivot = vec![false; self.matrix.num_cols()];
        for &p in &self.pivots {
            is_pivot[p] = true;
        }
        (0..self.matrix.num_cols()).filter(|&c| !is_pivot[c]).collect()
    }
}

/// Reduced row echelon form at tolerance `tol`.
///
/// Every row carries its own scale: `max(1, ‖row‖max)` for input rows,
/// grown by `|factor| · scale(pivot row)` whenever a multiple of a pivot row
/// is subtracted from it and rescaled with the row when a pivot is
/// normalized. An entry counts as zero when its magnitude is at most
/// `tol · scale(row)`, so rows of very different magnitudes do not mask one
/// another. Columns are processed left to right; the pivot is the candidate
/// largest relative to its row's scale (scaled partial pivoting). Entries
/// below their row's threshold are chopped from the result.
#[must_use]
pub fn srref<F: Float>(matrix: &DenseMatrix<F>, tol: F) -> RowEchelon<F> {
    let mut a = matrix.clone();
    let num_rows = a.num_rows();
    let num_cols = a.num_cols();
    let mut scale: Vec<F> = a
        .rows()
        .map(|row| row.iter().fold(F::one(), |acc, v| acc.max(v.abs())))
        .collect();

    let mut pivots = Vec::new();
    let mut pivot_row = 0;

    for col in 0..num_cols {
        if pivot_row == num_rows {
            break;
        }

        let mut best: Option<(usize, F)> = None;
        for row in pivot_row..num_rows {
            let magnitude = a[(row, col)].abs();
            if magnitude <= tol * scale[row] {
                continue;
            }
            let relative = magnitude / scale[row];
            if best.map_or(true, |(_, r)| relative > r) {
                best = Some((row, relative));
            }
        }

        let Some((best, _)) = best else {
            for row in pivot_row..num_rows {
                a[(row, col)] = F::zero();
            }
            continue;
        };

        a.swap_rows(pivot_row, best);
        scale.swap(pivot_row, best);
        let inv = a[(pivot_row, col)].recip();
        a.scale_row(pivot_row, inv);
        a[(pivot_row, col)] = F::one();
        scale[pivot_row] = scale[pivot_row] * inv.abs();

        for row in 0..num_rows {
            if row == pivot_row {
                continue;
            }
            let factor = a[(row, col)];
            if factor != F::zero() {
                a.add_scaled_row(row, pivot_row, -factor);
                a[(row, col)] = F::zero();
                scale[row] = scale[row].max(factor.abs() * scale[pivot_row]);
            }
        }

        pivots.push(col);
        pivot_row += 1;
    }

    let kept: Vec<usize> = (0..pivots.len()).collect();
    let mut reduced = a.select_rows(&kept);
    for (row, &col) in pivots.iter().enumerate() {
        let threshold = tol * scale[row];
        for v in reduced.row_mut(row) {
            if v.abs() <= threshold {
                *v = F::zero();
            }
        }
        reduced[(row, col)] = F::one();
    }

    RowEchelon {
        matrix: reduced,
        pivots,
    }
}

/// Divides every non-zero row by its leading (leftmost non-zero) entry.
pub fn lt_normalize<F: Float>(matrix: &mut DenseMatrix<F>) {
    for row in 0..matrix.num_rows() {
        let lead = matrix.row(row).iter().copied().find(|v| *v != F::zero());
        if let Some(lead) = lead {
            matrix.scale_row(row, lead.recip());
        }
    }
}

/// Index of the leftmost entry with |x| > `tol` in a row.
#[must_use]
pub fn leading_column<F: Float>(row: &[F], tol: F) -> Option<usize> {
    row.iter().position(|v| v.abs() > tol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> DenseMatrix<f64> {
        DenseMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect())
    }

    #[test]
    fn test_srref_full_rank() {
        let a = m(&[&[2.0, 4.0], &[1.0, 3.0]]);
        let e = srref(&a, 1e-12);
        assert_eq!(e.pivots, vec![0, 1]);
        assert!(e.matrix.approx_eq(&DenseMatrix::identity(2), 1e-12));
    }

    #[test]
    fn test_srref_drops_dependent_rows() {
        let a = m(&[&[1.0, 2.0, 1.0], &[2.0, 4.0, 2.0], &[1.0, 3.0, 1.0]]);
        let e = srref(&a, 1e-10);
        assert_eq!(e.rank(), 2);
        assert_eq!(e.pivots, vec![0, 1]);
        assert_eq!(e.free_columns(), vec![2]);
        // Row space is spanned by [1, 0, 1] and [0, 1, 0].
        assert!(e.matrix.approx_eq(&m(&[&[1.0, 0.0, 1.0], &[0.0, 1.0, 0.0]]), 1e-12));
    }

    #[test]
    fn test_srref_respects_tolerance() {
        // The second row differs from the first only by noise below tolerance.
        let a = m(&[&[1.0, 1.0], &[1.0, 1.0 + 1e-12]]);
        assert_eq!(srref(&a, 1e-9).rank(), 1);
        assert_eq!(srref(&a, 1e-14).rank(), 2);
    }

    #[test]
    fn test_srref_skips_zero_columns() {
        let a = m(&[&[0.0, 0.0, 3.0], &[0.0, 1e-15, 6.0]]);
        let e = srref(&a, 1e-10);
        assert_eq!(e.pivots, vec![2]);
        assert_eq!(e.matrix.row(0), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_srref_empty() {
        let a: DenseMatrix<f64> = DenseMatrix::with_cols(3);
        let e = srref(&a, 1e-10);
        assert_eq!(e.rank(), 0);
        assert_eq!(e.matrix.num_cols(), 3);
    }

    #[test]
    fn test_srref_keeps_small_rows_beside_large_ones() {
        // x - 1e6 and y - 1e-3 over the columns (x, y, 1).
        let a = m(&[&[1.0, 0.0, -1e6], &[0.0, 1.0, -1e-3]]);
        let e = srref(&a, 1e-8);
        assert_eq!(e.pivots, vec![0, 1]);
        assert_eq!(e.matrix.row(0), &[1.0, 0.0, -1e6]);
        assert_eq!(e.matrix.row(1), &[0.0, 1.0, -1e-3]);

        // A large multiple of a row is still dependent on it.
        let b = m(&[&[1e6, 2e6, 3e6], &[1.0, 2.0, 3.0 + 1e-12]]);
        assert_eq!(srref(&b, 1e-8).rank(), 1);
    }

    #[test]
    fn test_lt_normalize() {
        let mut a = m(&[&[0.0, 2.0, 4.0], &[-3.0, 0.0, 6.0], &[0.0, 0.0, 0.0]]);
        lt_normalize(&mut a);
        assert_eq!(a.row(0), &[0.0, 1.0, 2.0]);
        assert_eq!(a.row(1), &[1.0, 0.0, -2.0]);
        assert_eq!(a.row(2), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_leading_column() {
        assert_eq!(leading_column(&[1e-14, 0.5, 1.0], 1e-10), Some(1));
        assert_eq!(leading_column(&[0.0, 0.0], 1e-10), None);
    }
}
