//! Macros for building quantities.

/// Builds a [`Quantity`](crate::Quantity) through the process-wide registry.
///
/// The value comes first, then an optional bracketed uncertainty (zero, one or two values), then `unit => exponent`
/// pairs after a semicolon. Unit symbols are written as bare identifiers. Expands to
/// [`Quantity::new`](crate::Quantity::new), so the result is a `QuantityResult<Quantity>`.
///
/// ```rust
/// use adad_core::quantity;
///
/// let h0 = quantity!(67.26, [0.98]; km => 1, Mpc => -1, s => -1).unwrap();
/// assert_eq!(h0.unit_string(), "km Mpc^-1 s^-1");
///
/// let p = quantity!(101_325; Pa => 1).unwrap();
/// assert_eq!(p.value(), 101_325.0);
///
/// let n = quantity!(0.5).unwrap();
/// assert!(n.is_dimensionless());
/// ```
#[macro_export]
macro_rules! quantity {
    ($value:expr $(, [$($eps:expr),* $(,)?])? $(; $($unit:ident => $exp:expr),+ $(,)?)?) => {
        $crate::Quantity::new(
            $value as f64,
            &[$($($eps as f64),*)?],
            &[$($((stringify!($unit), $exp)),+)?],
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::{Dimension, QuantityError};

    #[test]
    fn builds_with_uncertainty_and_units() {
        let v = quantity!(3.0, [0.1, 0.2]; km => 1, s => -1).unwrap();
        assert_eq!(v.value(), 3.0);
        assert_eq!(v.uncertainty(), (0.1, 0.2));
        assert_eq!(v.net_exponent(Dimension::Time), -1);
    }

    #[test]
    fn builds_without_uncertainty() {
        let m = quantity!(1; Msun => 1).unwrap();
        assert_eq!(m.unit_string(), "Msun");
    }

    #[test]
    fn rejects_three_uncertainties() {
        assert_eq!(
            quantity!(1.0, [1, 2, 3]),
            Err(QuantityError::InvalidUncertainty(3))
        );
    }
}
