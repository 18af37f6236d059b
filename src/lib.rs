//! # eigval
//!
//! Eigenvalues of small, dense, real, generally non-symmetric matrices.
//! Pure Rust, no-std compatible, no heap allocation on the fixed-size path.
//!
//! ## Quick start
//!
//! ```
//! use eigval::Matrix;
//!
//! let a = Matrix::new([
//!     [0.0_f64, -1.0],
//!     [1.0, 0.0],
//! ]);
//! let ev = a.eigenvalues().unwrap(); // ±i
//! assert!((ev[0].im.abs() - 1.0).abs() < 1e-12);
//! assert_eq!(ev[0], ev[1].conj());
//! ```
//!
//! ## Algorithm
//!
//! 1. Householder reduction to upper Hessenberg form
//!    ([`linalg::hessenberg`]).
//! 2. Francis implicit double-shift QR with deflation and exceptional shifts
//!    ([`linalg::francis_qr`]), converging to real Schur form: 1×1 and 2×2
//!    diagonal blocks.
//! 3. Extraction ([`linalg::block_eigenvalues`]): one real eigenvalue per
//!    1×1 block, two roots of the characteristic quadratic per 2×2 block.
//!
//! Each eigenvalue is a [`Complex<T>`]. Non-real eigenvalues come in
//! conjugate pairs. The order follows the diagonal blocks of the Schur form;
//! sort if you need a canonical order. The iteration gives up with
//! [`LinalgError::ConvergenceFailure`](linalg::LinalgError::ConvergenceFailure)
//! after `30 * n` sweeps (configurable via [`linalg::EigenSettings`]).
//!
//! ## Modules
//!
//! - [`matrix`] — Fixed-size `Matrix<T, M, N>` with const-generic dimensions.
//!   Stack-allocated, column-major storage.
//!
//! - [`dynmatrix`] — Heap-allocated `DynMatrix<T>` with runtime dimensions
//!   (requires `alloc` feature, included with `std`).
//!
//! - [`linalg`] — The solver: free functions over `&mut impl MatrixMut<T>`
//!   plus the [`Schur`](linalg::Schur) / `DynSchur` wrappers and
//!   `eigenvalues()` convenience methods on both matrix types.
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats (`Scalar + Float`), used by the solver
//!   - [`MatrixRef`] / [`MatrixMut`] — generic read/write access for algorithms
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade under the
//! `eigval` target: deflations at `trace`, exceptional shifts and convergence
//! summaries at `debug`, convergence failures at `warn`. Install any logger to
//! see them.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Implies `alloc`. Hardware FPU via system libm |
//! | `alloc`   | via std  | `DynMatrix` and `Vec`-returning convenience functions |
//!
//! Without `std`, floating-point intrinsics come from the pure-Rust `libm`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod dynmatrix;
pub mod linalg;
pub mod matrix;
pub mod traits;

pub use matrix::Matrix;
#[cfg(feature = "alloc")]
pub use dynmatrix::DynMatrix;
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};

pub use num_complex::Complex;
