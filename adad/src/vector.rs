//! Vectors whose length is a quantity.

use crate::{Operand, Product, Quantity, QuantityResult};
use core::ops::Mul;

/// A [`Quantity`] length pointing along a direction.
///
/// The direction is an arbitrary list of components; it is carried along unchanged and never normalised.
///
/// ```rust
/// use adad::{Operand, Quantity, Vector};
///
/// let v = Vector::new(Quantity::new(67.48, &[0.98], &[("km", 1), ("s", -1)]).unwrap(), vec![1.0, 0.0]);
/// let doubled = v.scale(&Operand::from(2.0)).unwrap();
/// assert_eq!(doubled.length().value(), 134.96);
/// assert_eq!(doubled.direction(), &[1.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    length: Quantity,
    direction: Vec<f64>,
}

impl Vector {
    /// Creates a vector; a plain number becomes a dimensionless length.
    pub fn new(length: impl Into<Quantity>, direction: impl Into<Vec<f64>>) -> Self {
        Self {
            length: length.into(),
            direction: direction.into(),
        }
    }

    /// Creates a vector with a single-component direction.
    pub fn along(length: impl Into<Quantity>, direction: f64) -> Self {
        Self::new(length, vec![direction])
    }

    /// Length of the vector.
    pub fn length(&self) -> &Quantity {
        &self.length
    }

    /// Direction components.
    pub fn direction(&self) -> &[f64] {
        &self.direction
    }

    /// Multiplies the length by a scalar or a quantity; the direction is kept.
    ///
    /// # Errors
    ///
    /// [`QuantityError::UnsupportedOperand`](crate::QuantityError::UnsupportedOperand) for anything else.
    pub fn scale(&self, by: &Operand) -> QuantityResult<Self> {
        Ok(Self {
            length: self.length.product(by, Product::Multiply)?,
            direction: self.direction.clone(),
        })
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        Vector {
            length: &self.length * rhs,
            direction: self.direction.clone(),
        }
    }
}

impl Mul<&Quantity> for &Vector {
    type Output = Vector;
    fn mul(self, rhs: &Quantity) -> Vector {
        Vector {
            length: &self.length * rhs,
            direction: self.direction.clone(),
        }
    }
}
