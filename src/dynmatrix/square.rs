use crate::traits::{FloatScalar, Scalar};

use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    /// Sum of diagonal elements. Panics if the matrix is not square.
    pub fn trace(&self) -> T {
        assert!(self.is_square(), "trace requires a square matrix");
        let mut sum = T::zero();
        for i in 0..self.nrows() {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Check if the matrix is square and symmetric (A == A^T).
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows();
        for i in 0..n {
            for j in (i + 1)..n {
                if self[(i, j)] != self[(j, i)] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: FloatScalar> DynMatrix<T> {
    /// Determinant via Gaussian elimination with partial pivoting.
    ///
    /// Panics if the matrix is not square.
    ///
    /// ```
    /// use eigval::DynMatrix;
    /// let m = DynMatrix::from_rows(3, 3, &[6.0_f64, 1.0, 1.0, 4.0, -2.0, 5.0, 2.0, 8.0, 7.0]);
    /// assert!((m.det() - (-306.0)).abs() < 1e-10);
    /// ```
    pub fn det(&self) -> T {
        assert!(self.is_square(), "det requires a square matrix");
        let n = self.nrows();
        let mut a = self.clone();
        let mut sign = T::one();

        for col in 0..n {
            let mut max_row = col;
            let mut max_val = a[(col, col)].abs();
            for row in (col + 1)..n {
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
                for j in col..n {
                    let tmp = a[(col, j)];
                    a[(col, j)] = a[(max_row, j)];
                    a[(max_row, j)] = tmp;
                }
                sign = -sign;
            }

            let pivot = a[(col, col)];
            for row in (col + 1)..n {
                let factor = a[(row, col)] / pivot;
                for j in (col + 1)..n {
                    let val = a[(col, j)];
                    a[(row, j)] = a[(row, j)] - factor * val;
                }
                a[(row, col)] = T::zero();
            }
        }

        let mut det = sign;
        for i in 0..n {
            det = det * a[(i, i)];
        }
        det
    }
}
