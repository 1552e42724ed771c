//! Dense `f64` vector kernels used by the orthonormalizer.
//!
//! Summation is plain left-to-right with no compensation.

/// Euclidean inner product ⟨x, y⟩.
#[inline]
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y.iter()).map(|(&xi, &yi)| xi * yi).sum()
}

/// Euclidean (2-) norm.
///
/// Components are divided by the largest magnitude before squaring so that
/// very large or very small finite vectors neither overflow nor underflow.
#[inline]
pub fn l2_norm(v: &[f64]) -> f64 {
    let max_abs = v.iter().map(|x| x.abs()).fold(0.0, f64::max);

    // Zero vector, or infinities that no rescaling can help
    if max_abs == 0.0 || !max_abs.is_finite() {
        return dot(v, v).sqrt();
    }

    let sum_sq: f64 = v
        .iter()
        .map(|&x| {
            let s = x / max_abs;
            s * s
        })
        .sum();
    max_abs * sum_sq.sqrt()
}

/// AXPY operation: y += alpha * x
#[inline]
pub fn axpy(y: &mut [f64], x: &[f64], alpha: f64) {
    for (yi, &xi) in y.iter_mut().zip(x.iter()) {
        *yi += alpha * xi;
    }
}

/// Scale vector: x *= alpha
#[inline]
pub fn scal(x: &mut [f64], alpha: f64) {
    for xi in x.iter_mut() {
        *xi *= alpha;
    }
}

/// Elementwise difference `x - y`.
pub fn sub(x: &[f64], y: &[f64]) -> Vec<f64> {
    x.iter().zip(y.iter()).map(|(&xi, &yi)| xi - yi).collect()
}
