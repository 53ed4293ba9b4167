use std::ops::Index;

use crate::elem::Real;
use crate::error::DimensionError;
use crate::linal::{Scalar, Vector};

/// A dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MatrixParts<T>"))]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Unchecked serialized form; deserializing goes through [`Matrix::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MatrixParts<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<MatrixParts<T>> for Matrix<T> {
    type Error = DimensionError;

    fn try_from(parts: MatrixParts<T>) -> Result<Self, Self::Error> {
        Matrix::new(parts.rows, parts.cols, parts.data)
    }
}

impl<T> Matrix<T> {
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Matrix<T>, DimensionError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(DimensionError::new(
                "matrix",
                vec![rows, cols],
                vec![data.len()],
            ));
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn require_square(&self, operation: &'static str) -> Result<(), DimensionError> {
        if self.is_square() {
            Ok(())
        } else {
            Err(DimensionError::new(
                operation,
                vec![self.rows, self.rows],
                vec![self.rows, self.cols],
            ))
        }
    }
}

impl<T: Clone> Matrix<T> {
    pub fn row(&self, row: usize) -> Option<Vector<T>> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(Vector::new(&self.data[start..start + self.cols]))
    }

    pub fn column(&self, col: usize) -> Option<Vector<T>> {
        if col >= self.cols {
            return None;
        }
        Some(
            self.data
                .iter()
                .skip(col)
                .step_by(self.cols)
                .cloned()
                .collect(),
        )
    }

    pub fn transpose(&self) -> Matrix<T> {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c].clone());
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }
}

impl<T: Scalar> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Matrix<T> {
        Matrix {
            rows,
            cols,
            data: vec![T::ZERO; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Matrix<T> {
        let mut m = Matrix::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::ONE;
        }
        m
    }

    pub fn mul_vector(&self, v: &Vector<T>) -> Result<Vector<T>, DimensionError> {
        if v.len() != self.cols {
            return Err(DimensionError::new(
                "mul_vector",
                vec![self.cols],
                vec![v.len()],
            ));
        }
        Ok((0..self.rows)
            .map(|r| {
                let row = &self.data[r * self.cols..(r + 1) * self.cols];
                row.iter().zip(v.iter()).map(|(a, b)| *a * *b).sum()
            })
            .collect())
    }

    pub fn mul_matrix(&self, other: &Matrix<T>) -> Result<Matrix<T>, DimensionError> {
        if self.cols != other.rows {
            return Err(DimensionError::new(
                "mul_matrix",
                vec![self.cols, other.cols],
                vec![other.rows, other.cols],
            ));
        }
        let mut data = Vec::with_capacity(self.rows * other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                data.push(
                    (0..self.cols)
                        .map(|k| self.data[r * self.cols + k] * other.data[k * other.cols + c])
                        .sum(),
                );
            }
        }
        Ok(Matrix {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    pub fn add(&self, other: &Matrix<T>) -> Result<Matrix<T>, DimensionError> {
        if self.shape() != other.shape() {
            return Err(DimensionError::new(
                "add",
                vec![self.rows, self.cols],
                vec![other.rows, other.cols],
            ));
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| *a + *b)
                .collect(),
        })
    }

    pub fn scale(&self, factor: T) -> Matrix<T> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|x| *x * factor).collect(),
        }
    }

    pub fn trace(&self) -> Result<T, DimensionError> {
        self.require_square("trace")?;
        Ok((0..self.rows)
            .map(|i| self.data[i * self.cols + i])
            .sum())
    }
}

impl Matrix<Real> {
    /// Determinant by Gaussian elimination with partial pivoting.
    pub fn determinant(&self) -> Result<Real, DimensionError> {
        self.require_square("determinant")?;
        let n = self.rows;
        let mut a: Vec<f64> = self.data.iter().map(|x| x.value()).collect();
        let mut det = 1.0;
        for k in 0..n {
            let pivot = (k..n)
                .max_by(|&i, &j| a[i * n + k].abs().total_cmp(&a[j * n + k].abs()))
                .unwrap_or(k);
            if a[pivot * n + k] == 0.0 {
                return Ok(Real::ZERO);
            }
            if pivot != k {
                for c in 0..n {
                    a.swap(k * n + c, pivot * n + c);
                }
                det = -det;
            }
            let p = a[k * n + k];
            det *= p;
            for r in k + 1..n {
                let factor = a[r * n + k] / p;
                if factor == 0.0 {
                    continue;
                }
                for c in k..n {
                    a[r * n + c] -= factor * a[k * n + c];
                }
            }
        }
        Ok(Real::new(det))
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(col < self.cols, "column {col} out of bounds");
        &self.data[row * self.cols + col]
    }
}
