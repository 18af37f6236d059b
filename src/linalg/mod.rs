//! Dense non-symmetric eigenvalue solver.
//!
//! The pipeline has three phases, each available as a free function over
//! `&mut impl MatrixMut<T>` so it works for both [`Matrix`](crate::Matrix)
//! and `DynMatrix`:
//!
//! 1. [`hessenberg`] reduces the buffer in place to upper Hessenberg form.
//! 2. [`francis_qr`] runs implicit double-shift QR with deflation until the
//!    buffer is quasi-upper-triangular (real Schur form).
//! 3. [`block_eigenvalues`] reads one eigenvalue per 1×1 diagonal block and a
//!    conjugate pair (or two reals) per 2×2 block.
//!
//! [`eigenvalues_in_place`] chains the three after validating the input.
//! The wrapper structs [`Schur`] and `DynSchur` copy the input first, so the
//! caller's matrix is never touched.

pub(crate) mod francis;
pub(crate) mod hessenberg;
pub(crate) mod schur;

pub use francis::{francis_qr, EigenSettings, QrStats};
pub use hessenberg::hessenberg;
pub use schur::{block_eigenvalues, eigenvalues_in_place, Blocks, DiagonalBlock, Schur};

#[cfg(feature = "alloc")]
pub use schur::eigenvalues;

/// Errors from the eigenvalue solver.
///
/// Precondition violations (`NotSquare`, `Empty`, `NotFinite`) are reported
/// before any transform touches the buffer. `ConvergenceFailure` is terminal
/// for that input: no eigenvalues are returned.
///
/// ```
/// use eigval::DynMatrix;
/// use eigval::linalg::LinalgError;
///
/// let wide = DynMatrix::zeros(2, 3, 0.0_f64);
/// assert_eq!(
///     wide.eigenvalues().unwrap_err(),
///     LinalgError::NotSquare { rows: 2, cols: 3 }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Eigenvalues are only defined for square matrices.
    NotSquare { rows: usize, cols: usize },
    /// The matrix has dimension zero.
    Empty,
    /// The matrix contains NaN or infinity.
    NotFinite,
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::NotSquare { rows, cols } => {
                write!(f, "matrix must be square, got {}x{}", rows, cols)
            }
            LinalgError::Empty => write!(f, "matrix has dimension zero"),
            LinalgError::NotFinite => write!(f, "matrix contains NaN or infinity"),
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}
