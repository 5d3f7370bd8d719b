//! Quantity type and its implementations.

use crate::dimension::{Dimension, Exponents};
use crate::error::{QuantityError, QuantityResult};
use crate::registry::{self, UnitRegistry};
use crate::unit::Units;
use core::fmt;
use core::ops::*;
use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Uncertainty
// ─────────────────────────────────────────────────────────────────────────────

/// Two-sided absolute deviation `(lower, upper)`, expressed in the owning quantity's current units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Uncertainty {
    /// Deviation below the value.
    pub lower: f64,
    /// Deviation above the value.
    pub upper: f64,
}

impl Uncertainty {
    /// No uncertainty.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Explicit `(lower, upper)` pair.
    #[inline]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Same deviation on both sides.
    #[inline]
    pub const fn symmetric(e: f64) -> Self {
        Self::new(e, e)
    }

    /// Builds an uncertainty from zero, one (symmetric) or two (`lower`, `upper`) values.
    ///
    /// ```rust
    /// use adad_core::{QuantityError, Uncertainty};
    ///
    /// assert_eq!(Uncertainty::from_slice(&[]).unwrap(), Uncertainty::ZERO);
    /// assert_eq!(Uncertainty::from_slice(&[0.5]).unwrap(), Uncertainty::symmetric(0.5));
    /// assert_eq!(
    ///     Uncertainty::from_slice(&[1.0, 2.0, 3.0]),
    ///     Err(QuantityError::InvalidUncertainty(3))
    /// );
    /// ```
    pub fn from_slice(values: &[f64]) -> QuantityResult<Self> {
        match *values {
            [] => Ok(Self::ZERO),
            [e] => Ok(Self::symmetric(e)),
            [lower, upper] => Ok(Self::new(lower, upper)),
            _ => Err(QuantityError::InvalidUncertainty(values.len())),
        }
    }

    /// `(lower, upper)`.
    #[inline]
    pub const fn as_tuple(self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// `true` if both sides are zero.
    pub fn is_zero(&self) -> bool {
        self.lower == 0.0 && self.upper == 0.0
    }

    /// `true` if both sides are equal.
    pub fn is_symmetric(&self) -> bool {
        self.lower == self.upper
    }

    /// Both sides multiplied by `k`, sign included.
    #[inline]
    fn scaled(self, k: f64) -> Self {
        Self::new(self.lower * k, self.upper * k)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operand
// ─────────────────────────────────────────────────────────────────────────────

/// Right-hand side of a product or quotient.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A plain number.
    Scalar(f64),
    /// A quantity with units.
    Quantity(Quantity),
    /// Anything else, described by its kind; rejected with [`QuantityError::UnsupportedOperand`].
    Unsupported(String),
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<Quantity> for Operand {
    fn from(value: Quantity) -> Self {
        Operand::Quantity(value)
    }
}

impl From<&Quantity> for Operand {
    fn from(value: &Quantity) -> Self {
        Operand::Quantity(value.clone())
    }
}

/// Numbers become scalars; strings, tables, arrays, booleans and dates are unsupported.
#[cfg(feature = "config")]
impl From<&toml::Value> for Operand {
    fn from(value: &toml::Value) -> Self {
        match value {
            toml::Value::Float(f) => Operand::Scalar(*f),
            toml::Value::Integer(i) => Operand::Scalar(*i as f64),
            other => Operand::Unsupported(other.type_str().to_string()),
        }
    }
}

/// Whether a product multiplies by or divides by its operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Product {
    /// `a * b`
    Multiply,
    /// `a / b`, i.e. `a * b^-1`
    Divide,
}

impl Product {
    /// `1` or `-1`, the power the operand enters with.
    #[inline]
    pub const fn exponent(self) -> i32 {
        match self {
            Product::Multiply => 1,
            Product::Divide => -1,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Quantity
// ─────────────────────────────────────────────────────────────────────────────

/// A value with a compound unit and a two-sided uncertainty.
///
/// Units are tracked at runtime as lists of [`UnitTerm`](crate::UnitTerm)s per [`Dimension`]. The value is always expressed in the
/// attached terms; nothing is normalised behind the caller's back. Every operation except
/// [`simplify`](Quantity::simplify) returns a new quantity.
///
/// # Examples
///
/// ```rust
/// use adad_core::Quantity;
///
/// let h0 = Quantity::new(67.26, &[0.98], &[("km", 1), ("Mpc", -1), ("s", -1)]).unwrap();
/// assert_eq!(h0.value(), 67.26);
/// assert_eq!(h0.unit_string(), "km Mpc^-1 s^-1");
/// assert_eq!(h0.uncertainty(), (0.98, 0.98));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "QuantitySpec", into = "QuantitySpec")
)]
pub struct Quantity {
    value: f64,
    units: Units,
    uncertainty: Uncertainty,
}

impl Quantity {
    /// Builds a quantity from a value, 0–2 uncertainty values and `(symbol, exponent)` pairs.
    ///
    /// Symbols may carry a prefix (`"km"`) and may name derived units (`"Pa"`), which are expanded into base terms.
    /// Symbols the registry cannot resolve are skipped with a warning.
    ///
    /// # Errors
    ///
    /// [`QuantityError::InvalidUncertainty`] when `uncertainty` holds more than two values.
    pub fn new(value: f64, uncertainty: &[f64], units: &[(&str, i32)]) -> QuantityResult<Self> {
        Self::new_in(registry::global(), value, uncertainty, units)
    }

    /// [`Quantity::new`] against an explicit registry.
    pub fn new_in(
        registry: &UnitRegistry,
        value: f64,
        uncertainty: &[f64],
        units: &[(&str, i32)],
    ) -> QuantityResult<Self> {
        let mut q = Self {
            value,
            units: Units::new(),
            uncertainty: Uncertainty::from_slice(uncertainty)?,
        };

        for &(symbol, exponent) in units {
            match registry.expand(symbol, exponent) {
                Ok(expansion) => {
                    q.rescale(expansion.factor);
                    for (dim, term) in expansion.terms {
                        q.units.push(dim, term);
                    }
                }
                Err(err) => warn!("Ignoring unit `{}^{}`: {}", symbol, exponent, err),
            }
        }

        Ok(q)
    }

    /// A dimensionless quantity without uncertainty.
    #[inline]
    pub fn dimensionless(value: f64) -> Self {
        Self {
            value,
            units: Units::new(),
            uncertainty: Uncertainty::ZERO,
        }
    }

    /// Assembles a quantity from already-resolved parts.
    pub fn from_parts(value: f64, units: Units, uncertainty: Uncertainty) -> Self {
        Self {
            value,
            units,
            uncertainty,
        }
    }

    /// Replaces the uncertainty.
    pub fn with_uncertainty(mut self, uncertainty: Uncertainty) -> Self {
        self.uncertainty = uncertainty;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Raw numeric value, in the currently attached units.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Compound unit, e.g. `"km Mpc^-1 s^-1"`; empty when dimensionless.
    pub fn unit_string(&self) -> String {
        self.units.to_string()
    }

    /// `(lower, upper)` uncertainty.
    #[inline]
    pub fn uncertainty(&self) -> (f64, f64) {
        self.uncertainty.as_tuple()
    }

    /// Attached unit terms.
    #[inline]
    pub fn units(&self) -> &Units {
        &self.units
    }

    /// Sum of the exponents attached to `dim`.
    pub fn net_exponent(&self, dim: Dimension) -> i32 {
        self.units.net_exponent(dim)
    }

    /// Net exponents over all dimensions.
    pub fn exponents(&self) -> Exponents {
        self.units.exponents()
    }

    /// `true` when every net exponent is zero.
    pub fn is_dimensionless(&self) -> bool {
        self.exponents().is_dimensionless()
    }

    /// Checks that the net exponents equal `expected`.
    ///
    /// # Errors
    ///
    /// [`QuantityError::DimensionMismatch`] naming this quantity's exponents on the left.
    pub fn expect_exponents(&self, expected: Exponents) -> QuantityResult<()> {
        let actual = self.exponents();
        if actual != expected {
            debug!("Rejected [{}] where [{}] was expected", actual, expected);
            return Err(QuantityError::DimensionMismatch {
                left: actual.to_string(),
                right: expected.to_string(),
            });
        }
        Ok(())
    }

    /// Product of the conversion factors of every attached term: how many reference units one current unit is.
    pub fn scale_factor(&self) -> QuantityResult<f64> {
        self.scale_factor_in(registry::global())
    }

    /// [`Quantity::scale_factor`] against an explicit registry.
    pub fn scale_factor_in(&self, registry: &UnitRegistry) -> QuantityResult<f64> {
        self.units
            .terms()
            .try_fold(1.0, |acc, (_, term)| -> QuantityResult<f64> {
                Ok(acc * registry.conversion_factor(term)?)
            })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-expresses this quantity in the requested `(symbol, exponent)` units.
    ///
    /// Every attached term is first reduced to reference units, then the value is divided by the factor of each
    /// requested unit in turn. Requesting the same dimension twice applies both. No dimensional compatibility check
    /// is made between source and target.
    ///
    /// # Errors
    ///
    /// [`QuantityError::UnknownUnit`] if an attached or requested unit is not registered.
    ///
    /// ```rust
    /// use adad_core::Quantity;
    ///
    /// let m = Quantity::new(5.0, &[], &[("kg", 1)]).unwrap();
    /// let g = m.to(&[("g", 1)]).unwrap();
    /// assert_eq!(g.value(), 5000.0);
    /// assert_eq!(g.unit_string(), "g");
    /// ```
    pub fn to(&self, units: &[(&str, i32)]) -> QuantityResult<Self> {
        self.to_in(registry::global(), units)
    }

    /// [`Quantity::to`] against an explicit registry.
    pub fn to_in(&self, registry: &UnitRegistry, units: &[(&str, i32)]) -> QuantityResult<Self> {
        let mut factor = self.scale_factor_in(registry)?;
        let mut target = Units::new();

        for &(symbol, exponent) in units {
            let expansion = registry.expand(symbol, exponent)?;
            factor /= expansion.factor;
            for (dim, term) in expansion.terms {
                factor /= registry.conversion_factor(&term)?;
                target.push(dim, term);
            }
        }

        // The uncertainty follows the value so it stays in the target units.
        let mut out = Self {
            value: self.value,
            units: target,
            uncertainty: self.uncertainty,
        };
        out.rescale(factor);
        Ok(out)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Simplification
    // ─────────────────────────────────────────────────────────────────────────

    /// Collapses every dimension holding several terms into its default unit, in place.
    ///
    /// A dimension whose exponents sum to zero disappears; dimensions with at most one term are untouched. On error
    /// the quantity is left unchanged. Idempotent.
    ///
    /// ```rust
    /// use adad_core::Quantity;
    ///
    /// let mut ratio = Quantity::new(3.0, &[], &[("km", 1), ("m", -1)]).unwrap();
    /// ratio.simplify().unwrap();
    /// assert_eq!(ratio.value(), 3000.0);
    /// assert!(ratio.unit_string().is_empty());
    /// ```
    pub fn simplify(&mut self) -> QuantityResult<()> {
        self.simplify_in(registry::global())
    }

    /// [`Quantity::simplify`] against an explicit registry.
    pub fn simplify_in(&mut self, registry: &UnitRegistry) -> QuantityResult<()> {
        *self = self.simplified_in(registry)?;
        Ok(())
    }

    /// Simplified copy; see [`Quantity::simplify`].
    pub fn simplified(&self) -> QuantityResult<Self> {
        self.simplified_in(registry::global())
    }

    /// [`Quantity::simplified`] against an explicit registry.
    pub fn simplified_in(&self, registry: &UnitRegistry) -> QuantityResult<Self> {
        let mut out = self.clone();

        for dim in Dimension::ALL {
            let terms = &out.units[dim];
            if terms.len() <= 1 {
                continue;
            }

            let mut factor = 1.0;
            let mut exponent = 0;
            for term in terms {
                factor *= registry.conversion_factor(term)?;
                exponent += term.exponent;
            }

            if exponent == 0 {
                out.units[dim].clear();
            } else {
                let default = registry.default_unit(dim).with_exponent(exponent);
                factor /= registry.conversion_factor(&default)?;
                out.units[dim] = vec![default];
            }
            debug!("Simplified {} to [{}]", dim, out.units);
            out.rescale(factor);
        }

        Ok(out)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Arithmetic
    // ─────────────────────────────────────────────────────────────────────────

    /// Sum of two quantities with identical net exponents in every dimension.
    ///
    /// `rhs` is rescaled into this quantity's units, so `1 km + 500 m` is `1.5 km`. The result keeps this quantity's
    /// units and uncertainty; uncertainties are not combined.
    ///
    /// # Errors
    ///
    /// [`QuantityError::DimensionMismatch`] if any net exponent differs, [`QuantityError::UnknownUnit`] if a term
    /// cannot be converted.
    pub fn try_add(&self, rhs: &Quantity) -> QuantityResult<Self> {
        self.try_add_in(registry::global(), rhs)
    }

    /// [`Quantity::try_add`] against an explicit registry.
    pub fn try_add_in(&self, registry: &UnitRegistry, rhs: &Quantity) -> QuantityResult<Self> {
        self.expect_exponents(rhs.exponents())?;

        let ratio = rhs.scale_factor_in(registry)? / self.scale_factor_in(registry)?;
        let mut out = self.clone();
        out.value += rhs.value * ratio;
        Ok(out)
    }

    /// `self + (-1 × rhs)`; see [`Quantity::try_add`].
    pub fn try_sub(&self, rhs: &Quantity) -> QuantityResult<Self> {
        self.try_add(&-rhs)
    }

    /// Multiplies or divides by a scalar or a quantity.
    ///
    /// - Scalar `b`: the value becomes `a * b^±1`; units are unchanged; each uncertainty side is multiplied by `b`,
    ///   for a quotient as well.
    /// - Quantity `b`: the value becomes `a * b^±1`; `b`'s terms merge into `a`'s (matching prefix and symbol add
    ///   exponents and vanish at zero, others are appended); uncertainty follows the linear product rule
    ///   `e = b·e_a + a·e_b` with the raw values and uncertainties of both operands, for a quotient as well.
    ///
    /// # Errors
    ///
    /// [`QuantityError::UnsupportedOperand`] for [`Operand::Unsupported`]. Anything that is neither a number nor
    /// a quantity is rejected outright rather than leaving the accumulator untouched.
    pub fn product(&self, rhs: &Operand, kind: Product) -> QuantityResult<Self> {
        match rhs {
            Operand::Scalar(b) => Ok(self.scaled(*b, kind)),
            Operand::Quantity(b) => Ok(self.merged(b, kind)),
            Operand::Unsupported(what) => {
                warn!("Cannot combine a quantity with {}", what);
                Err(QuantityError::UnsupportedOperand(what.clone()))
            }
        }
    }

    /// Raises the quantity to an integer power.
    ///
    /// Every exponent is multiplied by `n` and each uncertainty side by `n`. With `n == 0` the terms stay attached
    /// with exponent `0`.
    ///
    /// ```rust
    /// use adad_core::{Dimension, Quantity};
    ///
    /// let side = Quantity::new(3.0, &[0.1], &[("m", 1)]).unwrap();
    /// let area = side.pow(2);
    /// assert_eq!(area.value(), 9.0);
    /// assert_eq!(area.net_exponent(Dimension::Length), 2);
    /// ```
    pub fn pow(&self, n: i32) -> Self {
        let mut out = self.clone();
        out.value = self.value.powi(n);
        out.uncertainty = self.uncertainty.scaled(f64::from(n));
        out.units.scale_exponents(n);
        out
    }

    fn scaled(&self, b: f64, kind: Product) -> Self {
        let mut out = self.clone();
        out.value = self.value * b.powi(kind.exponent());
        out.uncertainty = self.uncertainty.scaled(b);
        out
    }

    fn merged(&self, b: &Quantity, kind: Product) -> Self {
        let sign = kind.exponent();
        let (ea, eb) = (self.uncertainty, b.uncertainty);

        let mut out = self.clone();
        out.value = self.value * b.value.powi(sign);
        out.uncertainty = Uncertainty::new(
            b.value * ea.lower + self.value * eb.lower,
            b.value * ea.upper + self.value * eb.upper,
        );

        for (dim, term) in b.units.terms() {
            let list = &mut out.units[dim];
            let delta = term.exponent * sign;
            match list.iter().position(|t| t.same_unit(term)) {
                Some(i) => {
                    list[i].exponent += delta;
                    if list[i].exponent == 0 {
                        list.remove(i);
                    }
                }
                None => list.push(term.with_exponent(delta)),
            }
        }

        out
    }

    #[inline]
    fn rescale(&mut self, factor: f64) {
        self.value *= factor;
        self.uncertainty = self.uncertainty.scaled(factor);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operator implementations
// ─────────────────────────────────────────────────────────────────────────────

impl From<f64> for Quantity {
    #[inline]
    fn from(value: f64) -> Self {
        Self::dimensionless(value)
    }
}

impl Mul<f64> for &Quantity {
    type Output = Quantity;
    #[inline]
    fn mul(self, rhs: f64) -> Quantity {
        self.scaled(rhs, Product::Multiply)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;
    #[inline]
    fn mul(self, rhs: f64) -> Quantity {
        &self * rhs
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;
    #[inline]
    fn mul(self, rhs: Quantity) -> Quantity {
        rhs * self
    }
}

impl Div<f64> for &Quantity {
    type Output = Quantity;
    #[inline]
    fn div(self, rhs: f64) -> Quantity {
        self.scaled(rhs, Product::Divide)
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;
    #[inline]
    fn div(self, rhs: f64) -> Quantity {
        &self / rhs
    }
}

impl Mul<&Quantity> for &Quantity {
    type Output = Quantity;
    #[inline]
    fn mul(self, rhs: &Quantity) -> Quantity {
        self.merged(rhs, Product::Multiply)
    }
}

impl Mul for Quantity {
    type Output = Quantity;
    #[inline]
    fn mul(self, rhs: Quantity) -> Quantity {
        &self * &rhs
    }
}

impl Div<&Quantity> for &Quantity {
    type Output = Quantity;
    #[inline]
    fn div(self, rhs: &Quantity) -> Quantity {
        self.merged(rhs, Product::Divide)
    }
}

impl Div for Quantity {
    type Output = Quantity;
    #[inline]
    fn div(self, rhs: Quantity) -> Quantity {
        &self / &rhs
    }
}

impl Neg for &Quantity {
    type Output = Quantity;
    #[inline]
    fn neg(self) -> Quantity {
        self * -1.0
    }
}

impl Neg for Quantity {
    type Output = Quantity;
    #[inline]
    fn neg(self) -> Quantity {
        -&self
    }
}

/// Fallible: the operands must share net exponents.
impl Add<&Quantity> for &Quantity {
    type Output = QuantityResult<Quantity>;
    #[inline]
    fn add(self, rhs: &Quantity) -> Self::Output {
        self.try_add(rhs)
    }
}

impl Add for Quantity {
    type Output = QuantityResult<Quantity>;
    #[inline]
    fn add(self, rhs: Quantity) -> Self::Output {
        self.try_add(&rhs)
    }
}

/// Fallible: the operands must share net exponents.
impl Sub<&Quantity> for &Quantity {
    type Output = QuantityResult<Quantity>;
    #[inline]
    fn sub(self, rhs: &Quantity) -> Self::Output {
        self.try_sub(rhs)
    }
}

impl Sub for Quantity {
    type Output = QuantityResult<Quantity>;
    #[inline]
    fn sub(self, rhs: Quantity) -> Self::Output {
        self.try_sub(&rhs)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        let e = self.uncertainty;
        if !e.is_zero() {
            if e.is_symmetric() {
                write!(f, " ± {}", e.upper)?;
            } else {
                write!(f, " -{}/+{}", e.lower, e.upper)?;
            }
        }
        if !self.units.is_empty() {
            write!(f, " {}", self.units)?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde support
// ─────────────────────────────────────────────────────────────────────────────

/// Serialised form of a [`Quantity`]: the same three inputs [`Quantity::new`] takes.
///
/// ```json
/// {"value": 67.26, "uncertainty": [0.98], "units": [["km", 1], ["Mpc", -1], ["s", -1]]}
/// ```
///
/// Deserialising re-runs construction, so the uncertainty count is validated and symbols are resolved against the
/// process-wide registry.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySpec {
    /// Numeric value.
    pub value: f64,
    /// Zero, one or two uncertainty values.
    #[serde(default)]
    pub uncertainty: Vec<f64>,
    /// `(symbol, exponent)` pairs.
    #[serde(default)]
    pub units: Vec<(String, i32)>,
}

#[cfg(feature = "serde")]
impl TryFrom<QuantitySpec> for Quantity {
    type Error = QuantityError;

    fn try_from(spec: QuantitySpec) -> QuantityResult<Self> {
        let units: Vec<(&str, i32)> = spec.units.iter().map(|(s, p)| (s.as_str(), *p)).collect();
        Quantity::new(spec.value, &spec.uncertainty, &units)
    }
}

#[cfg(feature = "serde")]
impl From<Quantity> for QuantitySpec {
    fn from(q: Quantity) -> Self {
        let e = q.uncertainty;
        let uncertainty = if e.is_zero() {
            Vec::new()
        } else if e.is_symmetric() {
            vec![e.upper]
        } else {
            vec![e.lower, e.upper]
        };
        QuantitySpec {
            value: q.value,
            uncertainty,
            units: q
                .units
                .terms()
                .map(|(_, t)| (t.prefixed_symbol(), t.exponent))
                .collect(),
        }
    }
}
