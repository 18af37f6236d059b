use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex;

use crate::linalg::schur::validate;
use crate::linalg::{block_eigenvalues, francis_qr, hessenberg, Blocks, EigenSettings, LinalgError, QrStats};
use crate::traits::FloatScalar;

use super::DynMatrix;

// ── DynSchur ──────────────────────────────────────────────────────

/// Real Schur form of a dynamically-sized square matrix.
///
/// Holds the quasi-upper-triangular matrix S, orthogonally similar to the
/// input. The input matrix is copied; the caller's buffer is never modified.
///
/// # Example
///
/// ```
/// use eigval::DynMatrix;
///
/// let a = DynMatrix::from_rows(2, 2, &[0.0_f64, -1.0, 1.0, 0.0]);
/// let schur = a.schur().unwrap();
/// let ev = schur.eigenvalues();
/// assert!(ev[0].re.abs() < 1e-10);
/// assert!((ev[0].im.abs() - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DynSchur<T: FloatScalar> {
    s: DynMatrix<T>,
    stats: QrStats,
}

impl<T: FloatScalar> DynSchur<T> {
    /// Compute the real Schur form with default settings.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        Self::with_settings(a, &EigenSettings::default())
    }

    /// Compute the real Schur form with explicit iteration settings.
    pub fn with_settings(a: &DynMatrix<T>, settings: &EigenSettings<T>) -> Result<Self, LinalgError> {
        validate(a)?;
        let mut s = a.clone();
        hessenberg(&mut s);
        let stats = francis_qr(&mut s, settings)?;
        Ok(Self { s, stats })
    }

    /// The quasi-upper-triangular Schur form S.
    #[inline]
    pub fn schur_form(&self) -> &DynMatrix<T> {
        &self.s
    }

    /// Iteration statistics of the QR phase.
    #[inline]
    pub fn stats(&self) -> QrStats {
        self.stats
    }

    /// Diagonal blocks of S, top to bottom.
    pub fn blocks(&self) -> Blocks<'_, T, DynMatrix<T>> {
        Blocks::new(&self.s)
    }

    /// Eigenvalues in diagonal-block order.
    pub fn eigenvalues(&self) -> Vec<Complex<T>> {
        let mut out = vec![Complex::new(T::zero(), T::zero()); self.s.nrows()];
        block_eigenvalues(&self.s, &mut out);
        out
    }
}

// ── Convenience methods ───────────────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Real Schur form: `S = Q^T A Q`, quasi-upper-triangular.
    pub fn schur(&self) -> Result<DynSchur<T>, LinalgError> {
        DynSchur::new(self)
    }

    /// All eigenvalues as complex numbers, in diagonal-block order.
    ///
    /// ```
    /// use eigval::DynMatrix;
    ///
    /// let a = DynMatrix::from_diag(&[3.0_f64, -2.0, 5.0]);
    /// let ev = a.eigenvalues().unwrap();
    /// let mut re: Vec<f64> = ev.iter().map(|l| l.re).collect();
    /// re.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(re, [-2.0, 3.0, 5.0]);
    /// ```
    pub fn eigenvalues(&self) -> Result<Vec<Complex<T>>, LinalgError> {
        Ok(self.schur()?.eigenvalues())
    }

    /// Eigenvalues with explicit iteration settings.
    pub fn eigenvalues_with(&self, settings: &EigenSettings<T>) -> Result<Vec<Complex<T>>, LinalgError> {
        Ok(DynSchur::with_settings(self, settings)?.eigenvalues())
    }
}
