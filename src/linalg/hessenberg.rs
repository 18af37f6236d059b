use crate::traits::{FloatScalar, MatrixMut};

/// Reduce a square matrix to upper Hessenberg form via Householder similarity
/// transforms: `H = Q^T A Q`.
///
/// On return `a` holds H: every entry below the first sub-diagonal is exactly
/// zero and the eigenvalues are those of the input (up to rounding). Q is not
/// accumulated. Each Householder vector is parked in the part of column `k` it
/// annihilates while it is applied, so no scratch storage is needed.
///
/// Columns whose entries below the sub-diagonal are already zero are skipped.
/// This phase cannot fail.
///
/// ```
/// use eigval::Matrix;
/// use eigval::linalg::hessenberg;
///
/// let mut a = Matrix::new([
///     [4.0_f64, 1.0, -2.0, 2.0],
///     [1.0, 2.0, 0.0, 1.0],
///     [-2.0, 0.0, 3.0, -2.0],
///     [2.0, 1.0, -2.0, -1.0],
/// ]);
/// let trace = a.trace();
/// hessenberg(&mut a);
/// assert_eq!(a[(2, 0)], 0.0);
/// assert_eq!(a[(3, 0)], 0.0);
/// assert_eq!(a[(3, 1)], 0.0);
/// assert!((a.trace() - trace).abs() < 1e-12);
/// ```
pub fn hessenberg<T: FloatScalar>(a: &mut impl MatrixMut<T>) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "hessenberg requires a square matrix");

    for k in 0..n.saturating_sub(2) {
        // Scale by the 1-norm of a[k+1.., k] to keep the 2-norm from overflowing.
        let scale = a
            .col_as_slice(k, k + 1)
            .iter()
            .fold(T::zero(), |acc, v| acc + v.abs());
        let tail_is_zero = a.col_as_slice(k, k + 2).iter().all(|v| *v == T::zero());
        if tail_is_zero || scale == T::zero() {
            continue;
        }

        let mut norm_sq = T::zero();
        for v in a.col_as_mut_slice(k, k + 1).iter_mut() {
            *v = *v / scale;
            norm_sq = norm_sq + *v * *v;
        }
        let norm = norm_sq.sqrt();

        let x0 = *a.get(k + 1, k);
        let alpha = if x0 >= T::zero() { norm } else { -norm };
        let u0 = x0 + alpha;

        // v = [1, a[k+2,k] / u0, ..., a[n-1,k] / u0], stored in a[k+2.., k]
        for v in a.col_as_mut_slice(k, k + 2).iter_mut() {
            *v = *v / u0;
        }
        let tau = u0 / alpha;

        // Left: A[k+1.., k+1..] = (I - tau v v^T) A[k+1.., k+1..]
        for j in (k + 1)..n {
            let mut dot = *a.get(k + 1, j);
            for i in (k + 2)..n {
                dot = dot + *a.get(i, k) * *a.get(i, j);
            }
            dot = dot * tau;

            *a.get_mut(k + 1, j) = *a.get(k + 1, j) - dot;
            for i in (k + 2)..n {
                let vi = *a.get(i, k);
                *a.get_mut(i, j) = *a.get(i, j) - dot * vi;
            }
        }

        // Right: A[.., k+1..] = A[.., k+1..] (I - tau v v^T)
        for i in 0..n {
            let mut dot = *a.get(i, k + 1);
            for jj in (k + 2)..n {
                dot = dot + *a.get(i, jj) * *a.get(jj, k);
            }
            dot = dot * tau;

            *a.get_mut(i, k + 1) = *a.get(i, k + 1) - dot;
            for jj in (k + 2)..n {
                let vj = *a.get(jj, k);
                *a.get_mut(i, jj) = *a.get(i, jj) - dot * vj;
            }
        }

        *a.get_mut(k + 1, k) = -alpha * scale;
        for v in a.col_as_mut_slice(k, k + 2).iter_mut() {
            *v = T::zero();
        }
    }
}
