use std::ops::Index;
use std::slice;

use crate::elem::Real;
use crate::error::{DimensionError, DomainError, DomainReason};
use crate::linal::Scalar;

/// Representation of finite-dimensional vectors
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector<T> {
    components: Vec<T>,
}

impl<T: Clone> Vector<T> {
    pub fn new(components: &[T]) -> Vector<T> {
        Vector {
            components: components.to_vec(),
        }
    }
}

impl<T> Vector<T> {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.components.iter()
    }

    pub fn components(&self) -> &[T] {
        &self.components
    }

    pub fn into_components(self) -> Vec<T> {
        self.components
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Vector<U> {
        Vector {
            components: self.components.iter().map(f).collect(),
        }
    }
}

impl<T: Scalar> Vector<T> {
    pub fn zeros(len: usize) -> Vector<T> {
        Vector {
            components: vec![T::ZERO; len],
        }
    }

    /// Inner product, conjugate-linear in `self`.
    pub fn dot(&self, other: &Vector<T>) -> Result<T, DimensionError> {
        self.check_len("dot", other)?;
        Ok(self
            .iter()
            .zip(other.iter())
            .map(|(a, b)| a.conjugate() * *b)
            .sum())
    }

    /// Euclidean norm, scaled by the largest modulus so that squaring
    /// neither overflows nor underflows.
    pub fn norm(&self) -> Real {
        let moduli: Vec<f64> = self.iter().map(|x| x.modulus()).collect();
        if moduli.iter().any(|m| m.is_nan()) {
            return Real::NAN;
        }
        let scale = moduli.iter().copied().fold(0.0, f64::max);
        if scale == 0.0 || scale.is_infinite() {
            return Real::new(scale);
        }
        let sum: f64 = moduli.iter().map(|m| (m / scale).powi(2)).sum();
        Real::new(scale * sum.sqrt())
    }

    pub fn scale(&self, factor: T) -> Vector<T> {
        self.map(|x| *x * factor)
    }

    pub fn add(&self, other: &Vector<T>) -> Result<Vector<T>, DimensionError> {
        self.check_len("add", other)?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    pub fn sub(&self, other: &Vector<T>) -> Result<Vector<T>, DimensionError> {
        self.check_len("sub", other)?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    /// The unit vector in the direction of `self`.
    pub fn normalized(&self) -> Result<Vector<T>, DomainError> {
        let norm = self.norm();
        if norm.is_zero() {
            return Err(DomainError::new(
                "normalize",
                DomainReason::ZeroDivisor,
                "zero vector",
            ));
        }
        let divisor = T::from_real(norm);
        Ok(self.map(|x| *x / divisor))
    }

    fn zip_with(&self, other: &Vector<T>, f: impl Fn(T, T) -> T) -> Vector<T> {
        Vector {
            components: self
                .iter()
                .zip(other.iter())
                .map(|(a, b)| f(*a, *b))
                .collect(),
        }
    }

    fn check_len(&self, operation: &'static str, other: &Vector<T>) -> Result<(), DimensionError> {
        if self.len() == other.len() {
            Ok(())
        } else {
            Err(DimensionError::new(
                operation,
                vec![self.len()],
                vec![other.len()],
            ))
        }
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(components: Vec<T>) -> Self {
        Vector { components }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Vector {
            components: iter.into_iter().collect(),
        }
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.components[index]
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Vector<T>) -> bool {
        self.components == other.components
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::elem::Complex;

    fn reals(values: &[f64]) -> Vector<Real> {
        values.iter().copied().map(Real::new).collect()
    }

    mod equality {
        use super::*;

        #[test]
        fn equality() {
            let a = Vector::new(&[1, 2, 3]);
            let b = Vector::new(&[1, 2, 3]);
            assert_eq!(a, b)
        }

        #[test]
        fn normal_inequality() {
            let a = Vector::new(&[1, 2, 3]);
            let b = Vector::new(&[4, 5, 6]);
            assert_ne!(a, b)
        }

        #[test]
        fn mixed_inequality() {
            let a = Vector::new(&[1, 2, 3]);
            let b = Vector::new(&[3, 2, 1]);
            assert_ne!(a, b)
        }

        #[test]
        fn prefix_is_not_equal() {
            let a = Vector::new(&[1, 2]);
            let b = Vector::new(&[1, 2, 3]);
            assert_ne!(a, b)
        }
    }

    mod arithmetic {
        use super::*;

        #[test]
        fn dot_and_norm() {
            let a = reals(&[1.0, 2.0, 2.0]);
            let b = reals(&[3.0, 0.0, -1.0]);
            assert_eq!(a.dot(&b).unwrap(), Real::new(1.0));
            assert_eq!(a.norm(), Real::new(3.0));
        }

        #[test]
        fn complex_dot_conjugates_left() {
            let a = Vector::from(vec![Complex::I]);
            assert_eq!(a.dot(&a).unwrap(), Complex::ONE);
        }

        #[test]
        fn add_sub_scale() {
            let a = reals(&[1.0, 2.0]);
            let b = reals(&[0.5, -1.0]);
            assert_eq!(a.add(&b).unwrap(), reals(&[1.5, 1.0]));
            assert_eq!(a.sub(&b).unwrap(), reals(&[0.5, 3.0]));
            assert_eq!(a.scale(Real::new(2.0)), reals(&[2.0, 4.0]));
        }

        #[test]
        fn length_mismatch() {
            let err = reals(&[1.0]).add(&reals(&[1.0, 2.0])).unwrap_err();
            assert_eq!(err.expected(), &[1]);
            assert_eq!(err.found(), &[2]);
            assert!(reals(&[1.0]).dot(&reals(&[])).is_err());
        }

        #[test]
        fn normalize() {
            let unit = reals(&[3.0, 4.0]).normalized().unwrap();
            assert_eq!(unit, reals(&[0.6, 0.8]));
            assert!(Vector::<Real>::zeros(3).normalized().is_err());
        }

        #[test]
        fn norm_at_extreme_magnitudes() {
            let tiny = reals(&[1e-200, 0.0]);
            assert_eq!(tiny.norm(), Real::new(1e-200));
            assert_eq!(tiny.normalized().unwrap(), reals(&[1.0, 0.0]));

            let huge = reals(&[3e200, 4e200]);
            assert!(huge.norm().approx_eq(Real::new(5e200), 1e-12));
            let unit = huge.normalized().unwrap();
            assert!(unit[0].approx_eq(Real::new(0.6), 1e-12));
            assert!(unit[1].approx_eq(Real::new(0.8), 1e-12));

            let z = Vector::from(vec![Complex::new(3e-200, 4e-200)]);
            assert!(z.norm().approx_eq(Real::new(5e-200), 1e-12));
            assert!(reals(&[f64::INFINITY, 1.0]).norm().is_infinite());
            assert!(reals(&[f64::NAN, 1.0]).norm().is_nan());
        }
    }
}
