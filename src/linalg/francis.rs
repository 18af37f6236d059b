use num_complex::Complex;

use crate::linalg::schur::pair_eigenvalues;
use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Helper: get element with dereference for calling Float methods.
#[inline]
fn g<T: Copy>(m: &impl MatrixRef<T>, i: usize, j: usize) -> T {
    *m.get(i, j)
}

/// Settings for the shifted QR iteration.
///
/// The defaults are the classical EISPACK / LAPACK values. Changing them
/// affects robustness on near-defective matrices; re-check against hard
/// cases (e.g. the Rosser matrix) before tuning.
///
/// ```
/// use eigval::linalg::EigenSettings;
///
/// let strict = EigenSettings::<f64> {
///     max_iter_per_dim: 10,
///     ..EigenSettings::default()
/// };
/// assert_eq!(strict.exceptional_shift_interval, Some(10));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EigenSettings<T> {
    /// Multiplier on machine epsilon in the deflation test
    /// `|h[i,i-1]| <= tol * eps * (|h[i-1,i-1]| + |h[i,i]|)` and in the
    /// Ahues–Tisseur check that confirms it.
    pub deflation_tol: T,
    /// Total iteration budget per matrix dimension (budget = value * n).
    pub max_iter_per_dim: usize,
    /// Use an exceptional shift after this many consecutive iterations
    /// without deflation. `None` disables exceptional shifts.
    pub exceptional_shift_interval: Option<usize>,
    /// Exceptional shift: diagonal offset coefficient.
    pub exceptional_diag: T,
    /// Exceptional shift: off-diagonal coefficient.
    pub exceptional_offdiag: T,
}

impl<T: FloatScalar> Default for EigenSettings<T> {
    fn default() -> Self {
        Self {
            deflation_tol: T::one(),
            max_iter_per_dim: 30,
            exceptional_shift_interval: Some(10),
            exceptional_diag: T::from(0.75).unwrap(),
            exceptional_offdiag: T::from(-0.4375).unwrap(),
        }
    }
}

/// Bookkeeping from one run of [`francis_qr`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QrStats {
    /// Francis double-shift sweeps performed.
    pub iterations: usize,
    /// Sweeps that used an exceptional shift.
    pub exceptional_shifts: usize,
    /// Deflation events (each retires a 1×1 or 2×2 block).
    pub deflations: usize,
}

/// The still-unconverged index range `[lo, hi)`.
///
/// `hi` only ever decreases; iteration is finished once the range is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveBlock {
    lo: usize,
    hi: usize,
}

impl ActiveBlock {
    #[inline]
    fn is_empty(&self) -> bool {
        self.hi <= self.lo
    }

    #[inline]
    fn retire(&mut self, size: usize) {
        self.hi -= size;
    }
}

/// Francis double-shift QR iteration on an upper Hessenberg matrix.
///
/// Transforms `h` in place to real Schur form: quasi-upper-triangular with
/// 1×1 diagonal blocks for real eigenvalues and 2×2 blocks for the rest.
/// Every block boundary has its sub-diagonal entry set to exactly zero, so
/// [`block_eigenvalues`](crate::linalg::block_eigenvalues) can read the
/// structure back without a tolerance.
///
/// The whole matrix is updated by each reflector (not only the active
/// window), so the result stays orthogonally similar to the input.
///
/// Returns [`LinalgError::ConvergenceFailure`] once `settings.max_iter_per_dim * n`
/// sweeps have run without emptying the active block. `h` is then left in a
/// partially reduced state.
pub fn francis_qr<T: FloatScalar>(
    h: &mut impl MatrixMut<T>,
    settings: &EigenSettings<T>,
) -> Result<QrStats, LinalgError> {
    let n = h.nrows();
    assert_eq!(n, h.ncols(), "francis_qr requires a square matrix");

    let mut stats = QrStats::default();
    let tol = settings.deflation_tol * T::epsilon();
    let budget = settings.max_iter_per_dim * n;
    let interval = settings.exceptional_shift_interval.filter(|&m| m > 0);

    // Fallback scale for the deflation test when both neighbours are zero.
    let mut norm = T::zero();
    for j in 0..n {
        for i in 0..n.min(j + 2) {
            norm = norm + g(h, i, j).abs();
        }
    }

    let mut active = ActiveBlock { lo: 0, hi: n };
    // Consecutive sweeps since the last deflation.
    let mut its = 0usize;

    while !active.is_empty() {
        let hi = active.hi;
        let l = find_small_subdiagonal(h, active, norm, tol);

        if l + 1 == hi || l + 2 == hi {
            let size = hi - l;
            active.retire(size);
            stats.deflations += 1;
            its = 0;
            log::trace!(
                target: "eigval",
                "deflated {}x{} block at {} after {} sweeps",
                size, size, l, stats.iterations
            );
            continue;
        }

        if stats.iterations >= budget {
            log::warn!(
                target: "eigval",
                "QR iteration did not converge: {} sweeps, {} of {} rows unreduced",
                stats.iterations, hi - active.lo, n
            );
            return Err(LinalgError::ConvergenceFailure);
        }
        stats.iterations += 1;
        its += 1;

        let (mut s1, mut s2) = match interval {
            Some(m) if its % m == 0 => {
                stats.exceptional_shifts += 1;
                log::debug!(
                    target: "eigval",
                    "exceptional shift after {} sweeps without deflation (window {}..{})",
                    its, l, hi
                );
                exceptional_shift(h, hi, settings)
            }
            // Eigenvalues of the trailing 2×2 block
            _ => pair_eigenvalues(
                g(h, hi - 2, hi - 2),
                g(h, hi - 2, hi - 1),
                g(h, hi - 1, hi - 2),
                g(h, hi - 1, hi - 1),
            ),
        };
        if s1.im == T::zero() && s2.im == T::zero() {
            // Two real shifts: use the one closest to the corner twice
            let corner = g(h, hi - 1, hi - 1);
            if (s1.re - corner).abs() <= (s2.re - corner).abs() {
                s2 = s1;
            } else {
                s1 = s2;
            }
        }

        francis_step(h, l, hi, s1, s2);
    }

    log::debug!(
        target: "eigval",
        "QR iteration converged: n = {}, {} sweeps, {} exceptional shifts, {} deflations",
        n, stats.iterations, stats.exceptional_shifts, stats.deflations
    );
    Ok(stats)
}

/// Scan the sub-diagonal upwards from the bottom of the active block and
/// return the start `l` of the trailing unreduced window. The negligible
/// entry `h[l, l-1]` that ends the scan is set to exactly zero.
fn find_small_subdiagonal<T: FloatScalar>(
    h: &mut impl MatrixMut<T>,
    active: ActiveBlock,
    norm: T,
    tol: T,
) -> usize {
    // Below this a sub-diagonal entry is dropped regardless of its neighbours.
    let small_num = T::min_positive_value() / T::epsilon();

    let mut l = active.hi - 1;
    while l > active.lo {
        let sub = g(h, l, l - 1).abs();
        if sub < small_num {
            *h.get_mut(l, l - 1) = T::zero();
            break;
        }

        let (prev, diag) = (g(h, l - 1, l - 1), g(h, l, l));
        let mut s = prev.abs() + diag.abs();
        if s == T::zero() {
            s = norm;
        }
        if sub <= tol * s {
            // Second test (Ahues & Tisseur):
            // |h[l,l-1]| |h[l-1,l]| <= tol |h[l,l]| |h[l,l] - h[l-1,l-1]|, scaled.
            let sup = g(h, l - 1, l).abs();
            let (ab, ba) = (sub.max(sup), sub.min(sup));
            let gap = (diag - prev).abs();
            let (aa, bb) = (diag.abs().max(gap), diag.abs().min(gap));
            let scale = aa + ab;
            if ba * (ab / scale) <= small_num.max(tol * (bb * (aa / scale))) {
                *h.get_mut(l, l - 1) = T::zero();
                break;
            }
        }
        l -= 1;
    }
    l
}

/// Ad hoc shift to break cycles: the eigenvalues of
/// `[[d + a w, b w], [w, d + a w]]` with `w = |h[hi-1,hi-2]| + |h[hi-2,hi-3]|`,
/// `d = h[hi-1,hi-1]` and `a`, `b` the configured coefficients.
fn exceptional_shift<T: FloatScalar>(
    h: &impl MatrixRef<T>,
    hi: usize,
    settings: &EigenSettings<T>,
) -> (Complex<T>, Complex<T>) {
    let w = g(h, hi - 1, hi - 2).abs() + g(h, hi - 2, hi - 3).abs();
    let diag = g(h, hi - 1, hi - 1) + settings.exceptional_diag * w;
    let off = settings.exceptional_offdiag * w;
    pair_eigenvalues(diag, off, w, diag)
}

/// First column of `(H - s1 I)(H - s2 I)` at the top of the window `l..`,
/// up to a positive factor.
///
/// Built from the differences `h[l,l] - s` rather than from `H^2 - tr H + det`,
/// which cancels to rounding noise when the diagonal sits next to the shifts.
/// Everything is divided by `|h[l,l] - s2| + |im s2| + |h[l+1,l]|` before it
/// is multiplied.
fn shift_column<T: FloatScalar>(
    h: &impl MatrixRef<T>,
    l: usize,
    s1: Complex<T>,
    s2: Complex<T>,
) -> (T, T, T) {
    let zero = T::zero();
    let h00 = g(h, l, l);
    let h10 = g(h, l + 1, l);

    let scale = (h00 - s2.re).abs() + s2.im.abs() + h10.abs();
    if scale == zero {
        return (zero, zero, zero);
    }
    let h10s = h10 / scale;

    let x = (h00 - s1.re) * ((h00 - s2.re) / scale) - s1.im * (s2.im / scale)
        + g(h, l, l + 1) * h10s;
    let y = h10s * (h00 + g(h, l + 1, l + 1) - s1.re - s2.re);
    let z = h10s * g(h, l + 2, l + 1);
    (x, y, z)
}

/// Householder reflector `P = I - tau v v^T`, `v = [1, v1, v2]`, mapping
/// `[x, y, z]` to `[beta, 0, 0]`.
#[derive(Debug, Clone, Copy)]
struct Reflector<T> {
    v1: T,
    v2: T,
    tau: T,
    beta: T,
}

impl<T: FloatScalar> Reflector<T> {
    /// `None` when `y` and `z` are already zero (identity transform).
    fn new(x: T, y: T, z: T) -> Option<Self> {
        if y == T::zero() && z == T::zero() {
            return None;
        }
        let scale = x.abs() + y.abs() + z.abs();
        let (x, y, z) = (x / scale, y / scale, z / scale);
        let norm = (x * x + y * y + z * z).sqrt();
        let alpha = if x >= T::zero() { norm } else { -norm };
        let u0 = x + alpha;
        let v1 = y / u0;
        let v2 = z / u0;
        let two = T::one() + T::one();
        Some(Self {
            v1,
            v2,
            tau: two / (T::one() + v1 * v1 + v2 * v2),
            beta: -alpha * scale,
        })
    }

    /// Apply from the left to rows `k..k+len` of columns `cols`.
    #[inline]
    fn apply_left(
        &self,
        h: &mut impl MatrixMut<T>,
        k: usize,
        three: bool,
        cols: core::ops::Range<usize>,
    ) {
        for j in cols {
            let mut dot = g(h, k, j) + self.v1 * g(h, k + 1, j);
            if three {
                dot = dot + self.v2 * g(h, k + 2, j);
            }
            dot = self.tau * dot;
            *h.get_mut(k, j) = g(h, k, j) - dot;
            *h.get_mut(k + 1, j) = g(h, k + 1, j) - dot * self.v1;
            if three {
                *h.get_mut(k + 2, j) = g(h, k + 2, j) - dot * self.v2;
            }
        }
    }

    /// Apply from the right to columns `k..k+len` of rows `rows`.
    #[inline]
    fn apply_right(
        &self,
        h: &mut impl MatrixMut<T>,
        k: usize,
        three: bool,
        rows: core::ops::Range<usize>,
    ) {
        for i in rows {
            let mut dot = g(h, i, k) + self.v1 * g(h, i, k + 1);
            if three {
                dot = dot + self.v2 * g(h, i, k + 2);
            }
            dot = self.tau * dot;
            *h.get_mut(i, k) = g(h, i, k) - dot;
            *h.get_mut(i, k + 1) = g(h, i, k + 1) - dot * self.v1;
            if three {
                *h.get_mut(i, k + 2) = g(h, i, k + 2) - dot * self.v2;
            }
        }
    }
}

/// One implicit double-shift sweep over the window `[l, hi)`, `hi - l >= 3`.
///
/// The first reflector is built from [`shift_column`]; the rest chase the
/// resulting bulge down the diagonal.
fn francis_step<T: FloatScalar>(
    h: &mut impl MatrixMut<T>,
    l: usize,
    hi: usize,
    s1: Complex<T>,
    s2: Complex<T>,
) {
    let n = h.nrows();
    let (mut x, mut y, mut z) = shift_column(h, l, s1, s2);

    for k in l..(hi - 1) {
        let three = k + 2 < hi;
        if !three {
            z = T::zero();
        }

        if let Some(p) = Reflector::new(x, y, z) {
            if k > l {
                // The reflector maps the bulge column onto [beta, 0, 0].
                *h.get_mut(k, k - 1) = p.beta;
                *h.get_mut(k + 1, k - 1) = T::zero();
                if three {
                    *h.get_mut(k + 2, k - 1) = T::zero();
                }
            }
            p.apply_left(h, k, three, k..n);
            p.apply_right(h, k, three, 0..(k + 4).min(hi));
        }

        // Pick up the bulge for the next reflector.
        if k + 2 < hi {
            x = g(h, k + 1, k);
            y = g(h, k + 2, k);
            z = if k + 3 < hi { g(h, k + 3, k) } else { T::zero() };
        }
    }
}
