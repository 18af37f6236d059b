use crate::traits::{FloatScalar, Scalar};
use crate::Matrix;

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Sum of diagonal elements.
    pub fn trace(&self) -> T {
        let mut sum = T::zero();
        for i in 0..N {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Create a diagonal matrix from an array.
    ///
    /// ```
    /// use eigval::Matrix;
    /// let d = Matrix::from_diag([3.0_f64, -2.0, 5.0]);
    /// assert_eq!(d[(1, 1)], -2.0);
    /// assert_eq!(d[(0, 1)], 0.0);
    /// ```
    pub fn from_diag(diag: [T; N]) -> Self {
        let mut m = Self::zeros();
        for (i, &v) in diag.iter().enumerate() {
            m[(i, i)] = v;
        }
        m
    }

    /// Check if the matrix is symmetric (A == A^T).
    pub fn is_symmetric(&self) -> bool {
        for i in 0..N {
            for j in (i + 1)..N {
                if self[(i, j)] != self[(j, i)] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: FloatScalar, const N: usize> Matrix<T, N, N> {
    /// Determinant via Gaussian elimination with partial pivoting.
    ///
    /// Used as the independent reference when checking that the product of
    /// the eigenvalues reproduces the determinant.
    pub fn det(&self) -> T {
        let mut a = *self;
        let mut sign = T::one();

        for col in 0..N {
            // Partial pivoting: find row with largest magnitude
            let mut max_row = col;
            let mut max_val = a[(col, col)].abs();
            for row in (col + 1)..N {
                let val = a[(row, col)].abs();
                if val > max_val {
                    max_val = val;
                    max_row = row;
                }
            }

            if max_val == T::zero() {
                return T::zero();
            }

            if max_row != col {
                for j in col..N {
                    let tmp = a[(col, j)];
                    a[(col, j)] = a[(max_row, j)];
                    a[(max_row, j)] = tmp;
                }
                sign = -sign;
            }

            // Eliminate below pivot
            let pivot = a[(col, col)];
            for row in (col + 1)..N {
                let factor = a[(row, col)] / pivot;
                for j in (col + 1)..N {
                    let val = a[(col, j)];
                    a[(row, j)] = a[(row, j)] - factor * val;
                }
                a[(row, col)] = T::zero();
            }
        }

        let mut det = sign;
        for i in 0..N {
            det = det * a[(i, i)];
        }
        det
    }
}
