//! Classical Gram-Schmidt Orthonormalization
//!
//! Turns an ordered basis B = [b₀, b₁, ..., bₖ₋₁] into an orthonormal basis
//! Q = [q₀, q₁, ..., qₖ₋₁] spanning the same subspace, one prefix at a time:
//!
//! ```text
//! cᵢ = Σ_{j<i} ⟨qⱼ, bᵢ⟩ qⱼ        (component to remove)
//! qᵢ = (bᵢ - cᵢ) / ||bᵢ - cᵢ||
//! ```
//!
//! All projection coefficients are taken against the original bᵢ (classical
//! variant). There is no re-orthogonalization pass.
//!
//! # Degenerate input
//!
//! A linearly dependent basis leaves a residual bᵢ - cᵢ that is zero up to
//! rounding. Instead of dividing by it, [`GramSchmidt::compute`] returns
//! [`GsoError::DegenerateBasis`] whenever the residual norm is zero or at most
//! `tolerance * ||bᵢ||`.

use tracing::{debug, trace};

use crate::error::{GsoError, Result};
use crate::vector::{axpy, dot, l2_norm, scal, sub};

/// Default relative threshold below which a residual norm counts as zero.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Orthonormalizer configuration.
#[derive(Debug, Clone, Copy)]
pub struct GramSchmidt {
    tolerance: f64,
}

impl Default for GramSchmidt {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Output of one orthonormalization run.
#[derive(Debug, Clone)]
pub struct GsoResult {
    /// Orthonormal basis vectors (Q in QR decomposition)
    q: Vec<Vec<f64>>,
    /// Row i holds ⟨q_j, b_i⟩ for j < i followed by ||b_i - c_i|| at j = i
    r: Vec<Vec<f64>>,
    /// Dimension of vectors
    dimension: usize,
}

impl GramSchmidt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom degeneracy threshold. Negative values are treated as zero,
    /// which only rejects exactly-zero residuals.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Orthonormalize `basis`, keeping its order.
    ///
    /// # Errors
    ///
    /// - [`GsoError::DimensionMismatch`] if a vector's length differs from the first one's.
    /// - [`GsoError::DegenerateBasis`] if a vector lies (numerically) in the span of its
    ///   predecessors.
    /// - [`GsoError::NonFiniteNorm`] if a residual norm overflows or a component is NaN.
    pub fn compute(&self, basis: &[Vec<f64>]) -> Result<GsoResult> {
        let num_vectors = basis.len();
        let dimension = basis.first().map_or(0, Vec::len);

        for (i, b) in basis.iter().enumerate() {
            if b.len() != dimension {
                return Err(GsoError::DimensionMismatch {
                    index: i,
                    expected: dimension,
                    found: b.len(),
                });
            }
        }

        debug!(num_vectors, dimension, "orthonormalizing basis");

        let mut q: Vec<Vec<f64>> = Vec::with_capacity(num_vectors);
        let mut r: Vec<Vec<f64>> = Vec::with_capacity(num_vectors);

        for (i, b) in basis.iter().enumerate() {
            let mut component = vec![0.0; dimension];
            let mut coeffs = Vec::with_capacity(i + 1);

            for (j, qj) in q.iter().enumerate() {
                let coeff = dot(qj, b);
                axpy(&mut component, qj, coeff);
                coeffs.push(coeff);
                trace!(i, j, q_j = ?qj, component = ?component, "removed projection");
            }

            let mut v = sub(b, &component);
            let norm = l2_norm(&v);
            if !norm.is_finite() {
                debug!(index = i, norm, "non-finite residual norm");
                return Err(GsoError::NonFiniteNorm { index: i, norm });
            }

            let threshold = self.tolerance * l2_norm(b);
            if norm == 0.0 || norm <= threshold {
                debug!(index = i, norm, threshold, "degenerate basis vector");
                return Err(GsoError::DegenerateBasis { index: i, norm });
            }

            scal(&mut v, 1.0 / norm);
            debug!(index = i, norm, q = ?v, "normalized vector");

            coeffs.push(norm);
            r.push(coeffs);
            q.push(v);
        }

        Ok(GsoResult { q, r, dimension })
    }
}

/// Orthonormalize `basis` with the default tolerance.
///
/// Input `[[1, 0], [1, 1]]` yields `[[1, 0], [0, 1]]`.
pub fn orthogonalize(basis: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    GramSchmidt::new().compute(basis).map(GsoResult::into_basis)
}

impl GsoResult {
    pub fn basis(&self) -> &[Vec<f64>] {
        &self.q
    }

    pub fn into_basis(self) -> Vec<Vec<f64>> {
        self.q
    }

    /// Lower-triangular projection coefficients; `coefficients()[i]` has `i + 1` entries.
    pub fn coefficients(&self) -> &[Vec<f64>] {
        &self.r
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// Largest |⟨q_i, q_j⟩| over all pairs i ≠ j.
    pub fn max_orthogonality_error(&self) -> f64 {
        let mut worst: f64 = 0.0;
        for i in 0..self.q.len() {
            for j in 0..i {
                worst = worst.max(dot(&self.q[i], &self.q[j]).abs());
            }
        }
        worst
    }

    /// Largest | ||q_i|| - 1 |.
    pub fn max_normalization_error(&self) -> f64 {
        self.q
            .iter()
            .map(|qi| (l2_norm(qi) - 1.0).abs())
            .fold(0.0, f64::max)
    }

    /// Verify orthogonality
    pub fn check_orthogonality(&self, tolerance: f64) -> bool {
        for i in 0..self.q.len() {
            for j in 0..i {
                let d = dot(&self.q[i], &self.q[j]).abs();
                if d > tolerance {
                    debug!(i, j, dot = d, tolerance, "orthogonality violation");
                    return false;
                }
            }
        }
        true
    }

    /// Verify every vector has unit length
    pub fn check_normalization(&self, tolerance: f64) -> bool {
        self.max_normalization_error() <= tolerance
    }

    /// Rebuild the input basis as b_i = Σ_{j≤i} r[i][j] q_j.
    pub fn reconstruct(&self) -> Vec<Vec<f64>> {
        self.r
            .iter()
            .map(|row| {
                let mut b = vec![0.0; self.dimension];
                for (qj, &coeff) in self.q.iter().zip(row.iter()) {
                    axpy(&mut b, qj, coeff);
                }
                b
            })
            .collect()
    }

    /// Orthogonal projection of `v` onto the span of the first `k` vectors.
    ///
    /// `k` is clamped to the number of vectors.
    pub fn project_onto_span(&self, v: &[f64], k: usize) -> Vec<f64> {
        let mut projected = vec![0.0; self.dimension];
        for qj in self.q.iter().take(k) {
            axpy(&mut projected, qj, dot(qj, v));
        }
        projected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn assert_rows_close(actual: &[Vec<f64>], expected: &[Vec<f64>]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected.iter()) {
            for (x, y) in a.iter().zip(e.iter()) {
                assert!((x - y).abs() < EPS, "{:?} != {:?}", a, e);
            }
        }
    }

    #[test]
    fn test_shear_becomes_identity() {
        let q = orthogonalize(&[vec![1.0, 0.0], vec![1.0, 1.0]]).unwrap();
        assert_rows_close(&q, &[vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_scaled_axes() {
        let q = orthogonalize(&[vec![3.0, 0.0, 0.0], vec![0.0, 4.0, 0.0]]).unwrap();
        assert_rows_close(&q, &[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
    }

    #[test]
    fn test_dependent_basis_is_rejected() {
        let err = orthogonalize(&[vec![1.0, 1.0], vec![2.0, 2.0]]).unwrap_err();
        match err {
            GsoError::DegenerateBasis { index, norm } => {
                assert_eq!(index, 1);
                assert!(norm.is_finite());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_vector_is_rejected() {
        let err = orthogonalize(&[vec![0.0, 0.0], vec![1.0, 0.0]]).unwrap_err();
        assert!(matches!(err, GsoError::DegenerateBasis { index: 0, .. }));
    }

    #[test]
    fn test_zero_tolerance_still_rejects_exact_zero() {
        let gs = GramSchmidt::with_tolerance(-1.0);
        assert_eq!(gs.tolerance(), 0.0);
        let err = gs.compute(&[vec![1.0, 0.0], vec![2.0, 0.0]]).unwrap_err();
        assert!(matches!(err, GsoError::DegenerateBasis { index: 1, .. }));
    }

    #[test]
    fn test_tiny_scaled_identity() {
        let q = orthogonalize(&[vec![1e-11, 0.0], vec![0.0, 1e-11]]).unwrap();
        assert_rows_close(&q, &[vec![1.0, 0.0], vec![0.0, 1.0]]);

        let q = orthogonalize(&[vec![1e-200, 1e-200], vec![0.0, 1e-200]]).unwrap();
        let s = 1.0 / 2.0_f64.sqrt();
        assert_rows_close(&q, &[vec![s, s], vec![-s, s]]);
    }

    #[test]
    fn test_huge_scaled_identity() {
        let q = orthogonalize(&[vec![1e200, 0.0], vec![0.0, 1e200]]).unwrap();
        assert_rows_close(&q, &[vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_overflowing_norm_is_not_called_degenerate() {
        let err = orthogonalize(&[vec![f64::MAX, f64::MAX]]).unwrap_err();
        assert!(matches!(err, GsoError::NonFiniteNorm { index: 0, .. }));

        let err = orthogonalize(&[vec![1.0, 0.0], vec![f64::NAN, 1.0]]).unwrap_err();
        assert!(matches!(err, GsoError::NonFiniteNorm { index: 1, .. }));
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_degenerate_basis_is_quiet_at_warn_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(orthogonalize(&[vec![1.0, 1.0], vec![2.0, 2.0]]).is_err());
            assert!(orthogonalize(&[vec![f64::MAX, f64::MAX]]).is_err());
        });

        let logged = captured.0.lock().unwrap();
        assert!(logged.is_empty(), "{}", String::from_utf8_lossy(&logged));
    }

    #[test]
    fn test_ragged_basis_is_rejected() {
        let err = orthogonalize(&[vec![1.0, 0.0], vec![1.0]]).unwrap_err();
        assert!(matches!(
            err,
            GsoError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_empty_basis() {
        let gso = GramSchmidt::new().compute(&[]).unwrap();
        assert!(gso.is_empty());
        assert_eq!(gso.dimension(), 0);
    }

    #[test]
    fn test_gso_orthogonality() {
        let basis = vec![
            vec![1.0, 1.0, 0.0],
            vec![1.0, 0.0, 1.0],
            vec![0.0, 1.0, 1.0],
        ];

        let gso = GramSchmidt::new().compute(&basis).unwrap();

        assert!(gso.check_orthogonality(1e-10));
        assert!(gso.check_normalization(1e-10));
        assert_eq!(gso.len(), 3);
    }

    #[test]
    fn test_coefficients_shape_and_reconstruction() {
        let basis = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        let gso = GramSchmidt::new().compute(&basis).unwrap();

        let r = gso.coefficients();
        assert_eq!(r[0].len(), 1);
        assert_eq!(r[1].len(), 2);
        assert!((r[0][0] - 5.0_f64.sqrt()).abs() < EPS);

        assert_rows_close(&gso.reconstruct(), &basis);
    }

    #[test]
    fn test_project_onto_span() {
        let gso = GramSchmidt::new()
            .compute(&[vec![1.0, 0.0, 0.0], vec![1.0, 1.0, 0.0]])
            .unwrap();

        let v = [3.0, 4.0, 5.0];
        assert_rows_close(&[gso.project_onto_span(&v, 1)], &[vec![3.0, 0.0, 0.0]]);
        assert_rows_close(&[gso.project_onto_span(&v, 2)], &[vec![3.0, 4.0, 0.0]]);
        assert_rows_close(&[gso.project_onto_span(&v, 9)], &[vec![3.0, 4.0, 0.0]]);
    }
}
