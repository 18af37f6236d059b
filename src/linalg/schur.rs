use num_complex::Complex;

use crate::linalg::francis::{francis_qr, EigenSettings, QrStats};
use crate::linalg::hessenberg::hessenberg;
use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};
use crate::Matrix;

/// A diagonal block of a real Schur form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagonalBlock {
    /// 1×1 block at `(i, i)`: one real eigenvalue.
    Single(usize),
    /// 2×2 block at rows/columns `i, i+1`: a conjugate pair or two reals.
    Pair(usize),
}

impl DiagonalBlock {
    /// First row/column of the block.
    #[inline]
    pub fn start(&self) -> usize {
        match *self {
            DiagonalBlock::Single(i) | DiagonalBlock::Pair(i) => i,
        }
    }

    /// 1 or 2.
    #[inline]
    pub fn size(&self) -> usize {
        match self {
            DiagonalBlock::Single(_) => 1,
            DiagonalBlock::Pair(_) => 2,
        }
    }
}

/// Iterator over the diagonal blocks of a quasi-upper-triangular matrix,
/// top to bottom (or bottom to top with `.rev()`).
///
/// A non-zero sub-diagonal entry `s[i+1, i]` marks a 2×2 block at `i`.
/// [`francis_qr`] zeroes every block boundary exactly, so no tolerance is used.
#[derive(Debug, Clone)]
pub struct Blocks<'a, T, M: ?Sized> {
    s: &'a M,
    front: usize,
    back: usize,
    _t: core::marker::PhantomData<T>,
}

impl<'a, T, M: MatrixRef<T> + ?Sized> Blocks<'a, T, M> {
    pub fn new(s: &'a M) -> Self {
        Self {
            s,
            front: 0,
            back: s.nrows(),
            _t: core::marker::PhantomData,
        }
    }
}

impl<T: FloatScalar, M: MatrixRef<T> + ?Sized> Iterator for Blocks<'_, T, M> {
    type Item = DiagonalBlock;

    fn next(&mut self) -> Option<DiagonalBlock> {
        if self.front >= self.back {
            return None;
        }
        let i = self.front;
        if i + 1 < self.back && *self.s.get(i + 1, i) != T::zero() {
            self.front += 2;
            Some(DiagonalBlock::Pair(i))
        } else {
            self.front += 1;
            Some(DiagonalBlock::Single(i))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rows = self.back - self.front;
        ((rows + 1) / 2, Some(rows))
    }
}

impl<T: FloatScalar, M: MatrixRef<T> + ?Sized> DoubleEndedIterator for Blocks<'_, T, M> {
    fn next_back(&mut self) -> Option<DiagonalBlock> {
        if self.front >= self.back {
            return None;
        }
        let j = self.back - 1;
        if j > self.front && *self.s.get(j, j - 1) != T::zero() {
            self.back -= 2;
            Some(DiagonalBlock::Pair(j - 1))
        } else {
            self.back -= 1;
            Some(DiagonalBlock::Single(j))
        }
    }
}

impl<T: FloatScalar, M: MatrixRef<T> + ?Sized> core::iter::FusedIterator for Blocks<'_, T, M> {}

/// Eigenvalues of the 2×2 block `[[a, b], [c, d]]`.
///
/// Complex roots come out as `(re + i im, re - i im)` with `im > 0`.
/// Real roots are ordered larger magnitude first; the second is computed as
/// `det / first` to avoid cancellation.
///
/// The block is divided by `|a| + |b| + |c| + |d|` before any product is
/// formed, so entries near the overflow or underflow threshold keep their
/// discriminant.
pub(crate) fn pair_eigenvalues<T: FloatScalar>(a: T, b: T, c: T, d: T) -> (Complex<T>, Complex<T>) {
    let zero = T::zero();
    let scale = a.abs() + b.abs() + c.abs() + d.abs();
    if scale == zero {
        return (Complex::new(zero, zero), Complex::new(zero, zero));
    }
    let (a, b, c, d) = (a / scale, b / scale, c / scale, d / scale);

    let two = T::one() + T::one();
    let half_tr = (a + d) / two;
    let p = (a - d) / two;
    // Quarter discriminant: (tr^2 - 4 det) / 4, written without forming tr^2
    let disc = p * p + b * c;

    if disc < zero {
        let re = half_tr * scale;
        let im = (-disc).sqrt() * scale;
        (Complex::new(re, im), Complex::new(re, -im))
    } else {
        let root = disc.sqrt();
        let big = if half_tr >= zero {
            half_tr + root
        } else {
            half_tr - root
        };
        let small = if big == zero {
            zero
        } else {
            (a * d - b * c) / big
        };
        (Complex::new(big * scale, zero), Complex::new(small * scale, zero))
    }
}

/// Read the eigenvalues off a real Schur form, in diagonal-block order.
///
/// `s` must be quasi-upper-triangular with exact zeros at block boundaries
/// (the output of [`francis_qr`]). `out.len()` must equal `s.nrows()`.
pub fn block_eigenvalues<T: FloatScalar>(s: &impl MatrixRef<T>, out: &mut [Complex<T>]) {
    assert_eq!(
        out.len(),
        s.nrows(),
        "output length {} does not match matrix dimension {}",
        out.len(),
        s.nrows()
    );
    for block in Blocks::<T, _>::new(s) {
        match block {
            DiagonalBlock::Single(i) => {
                out[i] = Complex::new(*s.get(i, i), T::zero());
            }
            DiagonalBlock::Pair(i) => {
                let (l1, l2) = pair_eigenvalues(
                    *s.get(i, i),
                    *s.get(i, i + 1),
                    *s.get(i + 1, i),
                    *s.get(i + 1, i + 1),
                );
                out[i] = l1;
                out[i + 1] = l2;
            }
        }
    }
}

/// Check the solver preconditions: square, non-empty, finite.
pub(crate) fn validate<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<(), LinalgError> {
    let (rows, cols) = (a.nrows(), a.ncols());
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Err(LinalgError::Empty);
    }
    for j in 0..cols {
        if a.col_as_slice(j, 0).iter().any(|v| !v.is_finite()) {
            return Err(LinalgError::NotFinite);
        }
    }
    Ok(())
}

/// Compute all eigenvalues of `a`, destroying it.
///
/// Validates the input, reduces it to Hessenberg form, iterates to real Schur
/// form and extracts the eigenvalues into `out` (diagonal-block order). On
/// return `a` holds the Schur form. On error `out` is not written; `a` is
/// untouched for precondition errors and partially reduced for
/// [`LinalgError::ConvergenceFailure`].
///
/// No allocation is performed, so this works without the `alloc` feature.
///
/// ```
/// use eigval::Matrix;
/// use eigval::linalg::{eigenvalues_in_place, EigenSettings};
/// use eigval::Complex;
///
/// let mut a = Matrix::new([[2.0_f64, 0.0], [0.0, 3.0]]);
/// let mut out = [Complex::new(0.0, 0.0); 2];
/// eigenvalues_in_place(&mut a, &mut out, &EigenSettings::default()).unwrap();
/// assert_eq!(out[0].re + out[1].re, 5.0);
/// ```
pub fn eigenvalues_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    out: &mut [Complex<T>],
    settings: &EigenSettings<T>,
) -> Result<QrStats, LinalgError> {
    validate(a)?;
    assert_eq!(
        out.len(),
        a.nrows(),
        "output length {} does not match matrix dimension {}",
        out.len(),
        a.nrows()
    );

    hessenberg(a);
    let stats = francis_qr(a, settings)?;
    block_eigenvalues(a, out);
    Ok(stats)
}

/// Compute all eigenvalues of a square matrix without modifying it.
///
/// The input is copied into a `DynMatrix` working buffer. Eigenvalues are
/// returned in diagonal-block order of the final Schur form; sort them if a
/// canonical order is needed.
///
/// ```
/// use eigval::Matrix;
/// use eigval::linalg::eigenvalues;
///
/// let a = Matrix::new([[0.0_f64, -1.0], [1.0, 0.0]]);
/// let ev = eigenvalues(&a).unwrap();
/// assert_eq!(ev.len(), 2);
/// assert!((ev[0].im.abs() - 1.0).abs() < 1e-12);
/// assert_eq!(ev[0], ev[1].conj());
/// ```
#[cfg(feature = "alloc")]
pub fn eigenvalues<T: FloatScalar>(
    a: &impl MatrixRef<T>,
) -> Result<alloc::vec::Vec<Complex<T>>, LinalgError> {
    validate(a)?;
    let n = a.nrows();
    let mut work = crate::DynMatrix::from_fn(n, n, |i, j| *a.get(i, j));
    let mut out = alloc::vec![Complex::new(T::zero(), T::zero()); n];
    eigenvalues_in_place(&mut work, &mut out, &EigenSettings::default())?;
    Ok(out)
}

/// Real Schur form of a fixed-size square matrix.
///
/// Holds the quasi-upper-triangular matrix S (orthogonally similar to the
/// input) produced by Hessenberg reduction and Francis QR iteration. The
/// orthogonal factor is not accumulated. The diagonal of S consists of 1×1
/// blocks (real eigenvalues) and 2×2 blocks (conjugate pairs, or two reals
/// that were retired together).
///
/// # Example
///
/// ```
/// use eigval::Matrix;
/// use eigval::linalg::Schur;
///
/// let a = Matrix::new([
///     [1.0_f64, 2.0],
///     [3.0, 4.0],
/// ]);
/// let schur = Schur::new(&a).unwrap();
/// let ev = schur.eigenvalues();
///
/// // For this matrix, eigenvalues are real: (5 ± √33) / 2
/// let expected = [
///     (5.0 + 33.0_f64.sqrt()) / 2.0,
///     (5.0 - 33.0_f64.sqrt()) / 2.0,
/// ];
/// assert!((ev[0].re - expected[0]).abs() < 1e-12);
/// assert!((ev[1].re - expected[1]).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Schur<T: FloatScalar, const N: usize> {
    s: Matrix<T, N, N>,
    stats: QrStats,
}

impl<T: FloatScalar, const N: usize> Schur<T, N> {
    /// Compute the real Schur form with default settings.
    pub fn new(a: &Matrix<T, N, N>) -> Result<Self, LinalgError> {
        Self::with_settings(a, &EigenSettings::default())
    }

    /// Compute the real Schur form with explicit iteration settings.
    pub fn with_settings(
        a: &Matrix<T, N, N>,
        settings: &EigenSettings<T>,
    ) -> Result<Self, LinalgError> {
        validate(a)?;
        let mut s = *a;
        hessenberg(&mut s);
        let stats = francis_qr(&mut s, settings)?;
        Ok(Self { s, stats })
    }

    /// The quasi-upper-triangular Schur form S.
    #[inline]
    pub fn schur_form(&self) -> &Matrix<T, N, N> {
        &self.s
    }

    /// Iteration statistics of the QR phase.
    #[inline]
    pub fn stats(&self) -> QrStats {
        self.stats
    }

    /// Diagonal blocks of S, top to bottom.
    pub fn blocks(&self) -> Blocks<'_, T, Matrix<T, N, N>> {
        Blocks::new(&self.s)
    }

    /// Eigenvalues in diagonal-block order.
    pub fn eigenvalues(&self) -> [Complex<T>; N] {
        let mut out = [Complex::new(T::zero(), T::zero()); N];
        block_eigenvalues(&self.s, &mut out);
        out
    }
}

/// Convenience methods for the Schur form and general eigenvalues.
impl<T: FloatScalar, const N: usize> Matrix<T, N, N> {
    /// Real Schur form: `S = Q^T A Q`, quasi-upper-triangular.
    ///
    /// ```
    /// use eigval::Matrix;
    ///
    /// let a = Matrix::new([
    ///     [0.0_f64, -1.0],
    ///     [1.0, 0.0],
    /// ]);
    /// let schur = a.schur().unwrap();
    /// assert_eq!(schur.blocks().count(), 1);
    /// ```
    pub fn schur(&self) -> Result<Schur<T, N>, LinalgError> {
        Schur::new(self)
    }

    /// All eigenvalues as complex numbers, in diagonal-block order.
    ///
    /// ```
    /// use eigval::Matrix;
    ///
    /// let a = Matrix::new([
    ///     [2.0_f64, -1.0],
    ///     [1.0, 0.0],
    /// ]);
    /// let ev = a.eigenvalues().unwrap();
    /// assert!((ev[0].re - 1.0).abs() < 1e-7);
    /// assert!((ev[1].re - 1.0).abs() < 1e-7);
    /// ```
    pub fn eigenvalues(&self) -> Result<[Complex<T>; N], LinalgError> {
        Ok(self.schur()?.eigenvalues())
    }

    /// Eigenvalues with explicit iteration settings.
    pub fn eigenvalues_with(
        &self,
        settings: &EigenSettings<T>,
    ) -> Result<[Complex<T>; N], LinalgError> {
        Ok(Schur::with_settings(self, settings)?.eigenvalues())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn sorted_re<const N: usize>(ev: &[Complex<f64>; N]) -> [f64; N] {
        let mut re = [0.0; N];
        for i in 0..N {
            re[i] = ev[i].re;
        }
        re.sort_by(|a, b| a.partial_cmp(b).unwrap());
        re
    }

    #[test]
    fn pair_complex() {
        let (l1, l2) = pair_eigenvalues(1.0_f64, -2.0, 2.0, 1.0);
        assert_near(l1.re, 1.0, TOL, "re");
        assert_near(l1.im, 2.0, TOL, "im");
        assert_eq!(l2, l1.conj());
    }

    #[test]
    fn pair_huge_entries() {
        // 1e200 * [[1, 3], [2, 1]]: roots 1e200 * (1 ± √6)
        let (l1, l2) = pair_eigenvalues(1e200_f64, 3e200, 2e200, 1e200);
        let r6 = 6.0_f64.sqrt();
        assert!(l1.re.is_finite() && l2.re.is_finite());
        assert_near(l1.re / 1e200, 1.0 + r6, 1e-12, "large root");
        assert_near(l2.re / 1e200, 1.0 - r6, 1e-12, "small root");
        assert_eq!(l1.im, 0.0);
        assert_eq!(l2.im, 0.0);
    }

    #[test]
    fn pair_tiny_entries_stay_complex() {
        // 1e-200 * [[1, 3], [-2, 1]]: roots 1e-200 * (1 ± i√6)
        let (l1, l2) = pair_eigenvalues(1e-200_f64, 3e-200, -2e-200, 1e-200);
        assert_near(l1.re / 1e-200, 1.0, 1e-12, "re");
        assert_near(l1.im / 1e-200, 6.0_f64.sqrt(), 1e-12, "im");
        assert_eq!(l2, l1.conj());
    }

    #[test]
    fn scaled_blocks_through_public_api() {
        let big = Matrix::new([[1e200_f64, 3e200], [2e200, 1e200]]);
        let ev = big.eigenvalues().unwrap();
        assert!(ev.iter().all(|l| l.re.is_finite() && l.im == 0.0));
        assert_near(ev[0].re / 1e200, 1.0 + 6.0_f64.sqrt(), 1e-12, "large root");

        let tiny = Matrix::new([[1e-200_f64, 3e-200], [-2e-200, 1e-200]]);
        let ev = tiny.eigenvalues().unwrap();
        assert!(ev[0].im > 0.0);
        assert_near(ev[0].im / 1e-200, 6.0_f64.sqrt(), 1e-12, "im");
        assert_eq!(ev[1], ev[0].conj());
    }

    #[test]
    fn pair_real_stable_roots() {
        // Roots 1e8 and 1e-8: naive tr/2 - sqrt(disc) loses every digit of the small one
        let (l1, l2) = pair_eigenvalues(1e8_f64, 1.0, -1.0, 0.0);
        assert_near(l1.re, 1e8, 1e-6, "large root");
        assert_near(l2.re / 1e-8, 1.0, 1e-12, "small root relative");
        assert_eq!(l1.im, 0.0);
        assert_eq!(l2.im, 0.0);
    }

    #[test]
    fn pair_negative_trace() {
        let (l1, l2) = pair_eigenvalues(-3.0_f64, 0.0, 0.0, -1.0);
        assert_eq!(l1.re, -3.0);
        assert_eq!(l2.re, -1.0);
    }

    #[test]
    fn pair_zero() {
        let (l1, l2) = pair_eigenvalues(0.0_f64, 1.0, 0.0, 0.0);
        assert_eq!(l1, Complex::new(0.0, 0.0));
        assert_eq!(l2, Complex::new(0.0, 0.0));
    }

    #[test]
    fn blocks_forward_and_back() {
        let s = Matrix::new([
            [1.0_f64, 2.0, 3.0, 4.0, 5.0],
            [0.0, 1.0, -1.0, 2.0, 3.0],
            [0.0, 1.0, 1.0, 2.0, 3.0],
            [0.0, 0.0, 0.0, 7.0, 1.0],
            [0.0, 0.0, 0.0, 0.0, 8.0],
        ]);
        let fwd: [DiagonalBlock; 4] = {
            let mut it = Blocks::new(&s);
            [
                it.next().unwrap(),
                it.next().unwrap(),
                it.next().unwrap(),
                it.next().unwrap(),
            ]
        };
        assert_eq!(
            fwd,
            [
                DiagonalBlock::Single(0),
                DiagonalBlock::Pair(1),
                DiagonalBlock::Single(3),
                DiagonalBlock::Single(4),
            ]
        );

        let mut rev = Blocks::new(&s).rev();
        assert_eq!(rev.next(), Some(DiagonalBlock::Single(4)));
        assert_eq!(rev.next(), Some(DiagonalBlock::Single(3)));
        assert_eq!(rev.next(), Some(DiagonalBlock::Pair(1)));
        assert_eq!(rev.next(), Some(DiagonalBlock::Single(0)));
        assert_eq!(rev.next(), None);

        // Meeting in the middle
        let mut it = Blocks::new(&s);
        assert_eq!(it.next(), Some(DiagonalBlock::Single(0)));
        assert_eq!(it.next_back(), Some(DiagonalBlock::Single(4)));
        assert_eq!(it.next_back(), Some(DiagonalBlock::Single(3)));
        assert_eq!(it.next(), Some(DiagonalBlock::Pair(1)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);

        assert_eq!(Blocks::new(&s).map(|b| b.size()).sum::<usize>(), 5);
        assert_eq!(DiagonalBlock::Pair(1).start(), 1);
    }

    #[test]
    fn extraction_order_follows_blocks() {
        let s = Matrix::new([
            [4.0_f64, 1.0, 1.0],
            [0.0, 1.0, -2.0],
            [0.0, 2.0, 1.0],
        ]);
        let mut out = [Complex::new(0.0, 0.0); 3];
        block_eigenvalues(&s, &mut out);
        assert_eq!(out[0], Complex::new(4.0, 0.0));
        assert_near(out[1].re, 1.0, TOL, "re");
        assert_near(out[1].im, 2.0, TOL, "im");
        assert_eq!(out[2], out[1].conj());
    }

    #[test]
    fn schur_all_real_eigenvalues() {
        let a = Matrix::new([
            [1.0_f64, 2.0, 3.0],
            [0.0, 4.0, 5.0],
            [0.0, 0.0, 6.0],
        ]);
        let schur = a.schur().unwrap();
        let ev = schur.eigenvalues();
        let sorted = sorted_re(&ev);
        assert_near(sorted[0], 1.0, TOL, "λ[0]");
        assert_near(sorted[1], 4.0, TOL, "λ[1]");
        assert_near(sorted[2], 6.0, TOL, "λ[2]");
        for i in 0..3 {
            assert_near(ev[i].im, 0.0, TOL, &format!("im[{}]", i));
        }
    }

    #[test]
    fn schur_general_3x3() {
        let a = Matrix::new([
            [1.0_f64, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 0.0],
        ]);
        let schur = a.schur().unwrap();
        let s = schur.schur_form();
        assert_near(s.trace(), a.trace(), TOL, "trace of S");

        let ev = schur.eigenvalues();
        let eig_sum: f64 = ev.iter().map(|l| l.re).sum();
        assert_near(eig_sum, a.trace(), TOL, "trace");
        let prod = ev.iter().fold(Complex::new(1.0, 0.0), |acc, l| acc * l);
        assert_near(prod.re, a.det(), 1e-9, "det");
        assert_near(prod.im, 0.0, 1e-9, "det imaginary part");
    }

    #[test]
    fn schur_complex_conjugate_pair() {
        let theta = core::f64::consts::FRAC_PI_4;
        let c = theta.cos();
        let s = theta.sin();
        let a = Matrix::new([[c, -s], [s, c]]);
        let ev = a.eigenvalues().unwrap();

        assert_near(ev[0].re, c, TOL, "re[0]");
        assert_near(ev[1].re, c, TOL, "re[1]");
        assert_near(ev[0].im.abs(), s, TOL, "|im[0]|");
        assert_near(ev[1].im.abs(), s, TOL, "|im[1]|");
        assert!(ev[0].im * ev[1].im < 0.0, "conjugate pair should have opposite signs");
    }

    #[test]
    fn schur_companion_matrix() {
        // p(x) = x^3 - 6x^2 + 11x - 6 = (x-1)(x-2)(x-3)
        let a = Matrix::new([
            [0.0_f64, 0.0, 6.0],
            [1.0, 0.0, -11.0],
            [0.0, 1.0, 6.0],
        ]);
        let ev = a.eigenvalues().unwrap();
        let sorted = sorted_re(&ev);
        assert_near(sorted[0], 1.0, 1e-9, "root 1");
        assert_near(sorted[1], 2.0, 1e-9, "root 2");
        assert_near(sorted[2], 3.0, 1e-9, "root 3");
        for i in 0..3 {
            assert_near(ev[i].im, 0.0, TOL, &format!("im[{}]", i));
        }
    }

    #[test]
    fn schur_cube_roots_of_unity() {
        let a = Matrix::new([
            [0.0_f64, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]);
        let schur = a.schur().unwrap();
        assert!(schur.stats().exceptional_shifts >= 1);

        let ev = schur.eigenvalues();
        let real: [_; 3] = core::array::from_fn(|i| ev[i].im.abs() < TOL);
        assert_eq!(real.iter().filter(|&&r| r).count(), 1);
        for l in ev.iter() {
            assert_near(l.norm(), 1.0, 1e-9, "|λ|");
            if l.im.abs() < TOL {
                assert_near(l.re, 1.0, 1e-9, "real root");
            } else {
                assert_near(l.re, -0.5, 1e-9, "re of complex root");
                assert_near(l.im.abs(), 0.75_f64.sqrt(), 1e-9, "im of complex root");
            }
        }
    }

    #[test]
    fn schur_4x4() {
        let a = Matrix::new([
            [4.0_f64, 1.0, -2.0, 2.0],
            [1.0, 2.0, 0.0, 1.0],
            [-2.0, 0.0, 3.0, -2.0],
            [2.0, 1.0, -2.0, 1.0],
        ]);
        let schur = a.schur().unwrap();
        let s = schur.schur_form();
        for i in 0usize..4 {
            for j in 0..i.saturating_sub(1) {
                assert_eq!(s[(i, j)], 0.0, "S[({},{})]", i, j);
            }
        }
        let ev = schur.eigenvalues();
        let eig_sum: f64 = ev.iter().map(|l| l.re).sum();
        assert_near(eig_sum, a.trace(), TOL, "trace");
        for l in ev.iter() {
            assert_near(l.im, 0.0, TOL, "symmetric input has real spectrum");
        }
    }

    #[test]
    fn f32_support() {
        let a = Matrix::new([[1.0_f32, 2.0], [3.0, 4.0]]);
        let ev = a.eigenvalues().unwrap();
        let trace = a[(0, 0)] + a[(1, 1)];
        assert!((ev[0].re + ev[1].re - trace).abs() < 1e-5);
        assert!(ev[0].im.abs() < 1e-5);
        assert!(ev[1].im.abs() < 1e-5);
    }

    #[test]
    fn schur_1x1() {
        let a = Matrix::new([[42.0_f64]]);
        let ev = a.eigenvalues().unwrap();
        assert_eq!(ev[0], Complex::new(42.0, 0.0));
    }

    #[test]
    fn empty_matrix_rejected() {
        let a: Matrix<f64, 0, 0> = Matrix::zeros();
        assert_eq!(a.eigenvalues().unwrap_err(), LinalgError::Empty);
    }

    #[test]
    fn non_finite_rejected_without_mutation() {
        let orig = Matrix::new([[1.0_f64, f64::NAN], [0.0, 1.0]]);
        let mut a = orig;
        let mut out = [Complex::new(-1.0, -1.0); 2];
        assert_eq!(
            eigenvalues_in_place(&mut a, &mut out, &EigenSettings::default()),
            Err(LinalgError::NotFinite)
        );
        assert_eq!(a[(0, 0)], 1.0);
        assert!(a[(0, 1)].is_nan());
        assert_eq!(out[0], Complex::new(-1.0, -1.0));

        let inf = Matrix::new([[f64::INFINITY]]);
        assert_eq!(inf.eigenvalues().unwrap_err(), LinalgError::NotFinite);
    }

    #[test]
    fn convergence_failure_writes_nothing() {
        let mut a = Matrix::new([
            [0.0_f64, 0.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]);
        let mut out = [Complex::new(9.0, 9.0); 3];
        let settings = EigenSettings {
            exceptional_shift_interval: None,
            ..EigenSettings::default()
        };
        assert_eq!(
            eigenvalues_in_place(&mut a, &mut out, &settings),
            Err(LinalgError::ConvergenceFailure)
        );
        assert!(out.iter().all(|l| *l == Complex::new(9.0, 9.0)));
    }

    #[test]
    fn in_place_leaves_schur_form() {
        let orig = Matrix::new([
            [2.0_f64, 1.0, 0.0],
            [0.0, 3.0, 1.0],
            [1.0, 0.0, 1.0],
        ]);
        let mut a = orig;
        let mut out = [Complex::new(0.0, 0.0); 3];
        let stats = eigenvalues_in_place(&mut a, &mut out, &EigenSettings::default()).unwrap();
        assert!(stats.iterations > 0);
        assert_eq!(a[(2, 0)], 0.0);
        assert_near(a.trace(), orig.trace(), TOL, "trace");
        assert_eq!(out, orig.eigenvalues().unwrap());
    }
}
