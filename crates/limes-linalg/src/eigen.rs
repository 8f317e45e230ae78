//! Real Schur decomposition and simultaneous diagonalization.
//!
//! Commuting matrices with a common basis of eigenvectors are triangularized
//! together by the orthogonal Schur basis of a generic linear combination of
//! them. The combination is drawn from a seeded [`ChaCha8Rng`], so results
//! are reproducible for a fixed seed.

use log::{debug, warn};
use nalgebra::{linalg::Schur, DMatrix};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::dense_matrix::DenseMatrix;
use crate::error::{LinalgError, LinalgResult};

/// Configuration for the Schur-based diagonalization.
#[derive(Clone, Debug)]
pub struct DiagonalizationConfig {
    /// Convergence tolerance of the QR iteration.
    pub schur_tolerance: f64,
    /// Iteration cap of the QR iteration.
    pub max_iterations: usize,
    /// Seed for the random linear combinations.
    pub seed: u64,
    /// Number of random combinations to try.
    pub attempts: usize,
    /// Eigenvalue gap at which the search stops early.
    pub separation_target: f64,
    /// Subdiagonal magnitude above which a 2x2 block is reported.
    pub block_tolerance: f64,
}

impl Default for DiagonalizationConfig {
    fn default() -> Self {
        Self {
            schur_tolerance: f64::EPSILON,
            max_iterations: 10_000,
            seed: 42,
            attempts: 8,
            separation_target: 1e-4,
            block_tolerance: 1e-6,
        }
    }
}

/// Real Schur decomposition A = Q T Qᵀ.
#[derive(Clone, Debug)]
pub struct RealSchur {
    /// Orthogonal factor.
    pub q: DenseMatrix<f64>,
    /// Quasi upper-triangular factor.
    pub t: DenseMatrix<f64>,
}

impl RealSchur {
    /// Diagonal of T.
    #[must_use]
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.t.num_rows()).map(|i| self.t[(i, i)]).collect()
    }

    /// First index whose subdiagonal entry exceeds `tol` relative to ‖T‖.
    #[must_use]
    pub fn first_block(&self, tol: f64) -> Option<usize> {
        let scale = self.t.max_abs().max(1.0);
        (1..self.t.num_rows()).find(|&i| self.t[(i, i - 1)].abs() > tol * scale).map(|i| i - 1)
    }

    /// Smallest distance between two diagonal entries of T.
    #[must_use]
    pub fn separation(&self) -> f64 {
        let mut diag = self.diagonal();
        diag.sort_by(f64::total_cmp);
        diag.windows(2)
            .map(|w| w[1] - w[0])
            .fold(f64::INFINITY, f64::min)
    }
}

/// Computes the real Schur decomposition of a square matrix.
pub fn real_schur(matrix: &DenseMatrix<f64>, tolerance: f64, max_iterations: usize) -> LinalgResult<RealSchur> {
    if !matrix.is_square() {
        return Err(LinalgError::NotSquare {
            rows: matrix.num_rows(),
            cols: matrix.num_cols(),
        });
    }

    let n = matrix.num_rows();
    if n <= 1 {
        return Ok(RealSchur {
            q: DenseMatrix::identity(n),
            t: matrix.clone(),
        });
    }

    let dm = DMatrix::from_fn(n, n, |i, j| matrix[(i, j)]);
    let schur = Schur::try_new(dm, tolerance, max_iterations)
        .ok_or(LinalgError::SchurNotConverged { max_iterations })?;
    let (q, t) = schur.unpack();

    Ok(RealSchur {
        q: DenseMatrix::from_fn(n, n, |i, j| q[(i, j)]),
        t: DenseMatrix::from_fn(n, n, |i, j| t[(i, j)]),
    })
}

/// Result of a simultaneous diagonalization.
#[derive(Clone, Debug)]
pub struct SimultaneousDiagonalization {
    /// Orthogonal basis Q whose columns triangularize every input matrix.
    pub basis: DenseMatrix<f64>,
    /// `eigenvalues[i][j]` is qⱼᵀ Mᵢ qⱼ.
    pub eigenvalues: Vec<Vec<f64>>,
    /// Coefficients of the combination whose Schur basis was kept.
    pub combination: Vec<f64>,
    /// Minimum eigenvalue gap of that combination.
    pub separation: f64,
}

impl SimultaneousDiagonalization {
    /// The common eigenvectors read as points: coordinate i of point j is
    /// `eigenvalues[i][j]`.
    #[must_use]
    pub fn points(&self) -> Vec<Vec<f64>> {
        let n = self.basis.num_cols();
        (0..n)
            .map(|j| self.eigenvalues.iter().map(|ev| ev[j]).collect())
            .collect()
    }
}

/// Triangularizes commuting matrices through the Schur basis of a random
/// linear combination.
///
/// Coefficients are drawn uniformly from (−1, 1) and divided by the
/// ∞-norm of their matrix.
///
/// Up to `config.attempts` combinations are drawn; the one whose eigenvalues
/// are best separated is kept, stopping early once the gap reaches
/// `config.separation_target`. A 2x2 block in the kept factor is reported as
/// [`LinalgError::ComplexEigenvalues`].
pub fn simultaneously_diagonalize(
    matrices: &[DenseMatrix<f64>],
    config: &DiagonalizationConfig,
) -> LinalgResult<SimultaneousDiagonalization> {
    let first = matrices.first().ok_or(LinalgError::EmptyInput)?;
    let n = first.num_rows();
    for m in matrices {
        if m.num_rows() != n || m.num_cols() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: (n, n),
                found: (m.num_rows(), m.num_cols()),
            });
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut best: Option<(RealSchur, Vec<f64>, f64)> = None;

    for attempt in 0..config.attempts.max(1) {
        // Each matrix enters at unit norm so small coordinates still separate.
        let combination: Vec<f64> = matrices
            .iter()
            .map(|m| {
                let r: f64 = rng.gen_range(-1.0..1.0);
                let norm = m.norm_inf();
                if norm > 0.0 {
                    r / norm
                } else {
                    r
                }
            })
            .collect();
        let mut combined = DenseMatrix::zeros(n, n);
        for (m, &r) in matrices.iter().zip(&combination) {
            combined = &combined + &m.scale(r);
        }

        let schur = real_schur(&combined, config.schur_tolerance, config.max_iterations)?;
        let separation = schur.separation();
        debug!("diagonalization attempt {attempt}: eigenvalue separation {separation:.3e}");

        if best.as_ref().map_or(true, |(_, _, s)| separation > *s) {
            best = Some((schur, combination, separation));
        }
        if separation >= config.separation_target {
            break;
        }
    }

    let (schur, combination, separation) = best.ok_or(LinalgError::EmptyInput)?;
    if separation < config.separation_target {
        warn!(
            "eigenvalues of the combined matrix are poorly separated ({separation:.3e}); \
             zeros may be inaccurate or the ideal may not be radical"
        );
    }
    if let Some(index) = schur.first_block(config.block_tolerance) {
        return Err(LinalgError::ComplexEigenvalues { index });
    }

    let eigenvalues = matrices
        .iter()
        .map(|m| (0..n).map(|j| m.quadratic_form(&schur.q.col(j))).collect())
        .collect();

    Ok(SimultaneousDiagonalization {
        basis: schur.q,
        eigenvalues,
        combination,
        separation,
    })
}
