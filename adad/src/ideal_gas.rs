//! Ideal gas state.
//!
//! Inputs are given as [`Operand`]s: a plain number is taken in the expected unit (`Pa`, `mol`, `K`, `kg`, or
//! dimensionless), a quantity is accepted in any unit with the right dimensions.
//!
//! ```rust
//! use adad::IdealGas;
//!
//! let gas = IdealGas::new(101_325.0, 1.0, 273.15).unwrap();
//! let u = gas.internal_energy().unwrap();
//! assert!((u.value() - 1.5 * 8.314 * 273.15).abs() < 1e-9);
//! assert!((gas.gamma().unwrap().value() - 5.0 / 3.0).abs() < 1e-12);
//! ```

use crate::{Operand, Quantity, QuantityError, QuantityResult};
use log::warn;

/// Boltzmann constant, `J K^-1`.
pub const BOLTZMANN: f64 = 1.381e-23;

/// Molar gas constant, `J K^-1 mol^-1`.
pub const GAS_CONSTANT: f64 = 8.314;

/// Default proton mass, `kg`.
pub const PROTON_MASS: f64 = 1.617e-27;

/// Boltzmann constant as a quantity.
pub fn boltzmann() -> QuantityResult<Quantity> {
    Quantity::new(BOLTZMANN, &[], &[("J", 1), ("K", -1)])
}

/// Molar gas constant as a quantity.
pub fn gas_constant() -> QuantityResult<Quantity> {
    Quantity::new(GAS_CONSTANT, &[], &[("J", 1), ("K", -1), ("mol", -1)])
}

/// Takes a scalar in `unit`, or checks a quantity against `unit`'s dimensions.
fn coerce(input: Operand, unit: &[(&str, i32)]) -> QuantityResult<Quantity> {
    match input {
        Operand::Scalar(v) => Quantity::new(v, &[], unit),
        Operand::Quantity(q) => {
            q.expect_exponents(Quantity::new(1.0, &[], unit)?.exponents())?;
            Ok(q)
        }
        Operand::Unsupported(what) => {
            warn!("Ideal gas input cannot be {}", what);
            Err(QuantityError::UnsupportedOperand(what))
        }
    }
}

/// An ideal gas described by pressure, amount and temperature.
///
/// The mean molecular weight `mu` (default 1), proton mass `m_p` and dimensionless heat capacity `c_v` (default 3/2,
/// a monatomic gas) can be overridden after construction. `c_p` is always `c_v + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealGas {
    pressure: Quantity,
    amount: Quantity,
    temperature: Quantity,
    mu: Quantity,
    proton_mass: Quantity,
    c_v: Quantity,
    c_p: Quantity,
    k_b: Quantity,
    r: Quantity,
}

impl IdealGas {
    /// Creates a gas from pressure (`Pa`), amount (`mol`) and temperature (`K`).
    ///
    /// # Errors
    ///
    /// [`QuantityError::DimensionMismatch`] if a quantity input has the wrong dimensions,
    /// [`QuantityError::UnsupportedOperand`] for anything that is neither a number nor a quantity.
    pub fn new(
        pressure: impl Into<Operand>,
        amount: impl Into<Operand>,
        temperature: impl Into<Operand>,
    ) -> QuantityResult<Self> {
        let c_v = Quantity::dimensionless(1.5);
        Ok(Self {
            pressure: coerce(pressure.into(), &[("Pa", 1)])?,
            amount: coerce(amount.into(), &[("mol", 1)])?,
            temperature: coerce(temperature.into(), &[("K", 1)])?,
            mu: Quantity::dimensionless(1.0),
            proton_mass: coerce(Operand::Scalar(PROTON_MASS), &[("kg", 1)])?,
            c_p: c_v.try_add(&Quantity::dimensionless(1.0))?,
            c_v,
            k_b: boltzmann()?,
            r: gas_constant()?,
        })
    }

    /// Sets the mean molecular weight (dimensionless).
    pub fn with_mean_molecular_weight(mut self, mu: impl Into<Operand>) -> QuantityResult<Self> {
        self.mu = coerce(mu.into(), &[])?;
        Ok(self)
    }

    /// Sets the proton mass (`kg`).
    pub fn with_proton_mass(mut self, m_p: impl Into<Operand>) -> QuantityResult<Self> {
        self.proton_mass = coerce(m_p.into(), &[("kg", 1)])?;
        Ok(self)
    }

    /// Sets the dimensionless heat capacity at constant volume; `c_p` follows as `c_v + 1`.
    pub fn with_heat_capacity(mut self, c_v: impl Into<Operand>) -> QuantityResult<Self> {
        let c_v = coerce(c_v.into(), &[])?;
        self.c_p = c_v.try_add(&Quantity::dimensionless(1.0))?;
        self.c_v = c_v;
        Ok(self)
    }

    /// Pressure.
    pub fn pressure(&self) -> &Quantity {
        &self.pressure
    }

    /// Amount of substance.
    pub fn amount(&self) -> &Quantity {
        &self.amount
    }

    /// Temperature.
    pub fn temperature(&self) -> &Quantity {
        &self.temperature
    }

    /// Mean molecular weight.
    pub fn mean_molecular_weight(&self) -> &Quantity {
        &self.mu
    }

    /// Proton mass.
    pub fn proton_mass(&self) -> &Quantity {
        &self.proton_mass
    }

    /// Heat capacity at constant volume.
    pub fn c_v(&self) -> &Quantity {
        &self.c_v
    }

    /// Heat capacity at constant pressure.
    pub fn c_p(&self) -> &Quantity {
        &self.c_p
    }

    /// Internal energy `U = c_v n R T`, simplified to base units (`m^2 kg s^-2`).
    pub fn internal_energy(&self) -> QuantityResult<Quantity> {
        (&(&(&self.c_v * &self.amount) * &self.r) * &self.temperature).simplified()
    }

    /// Number of particles `N = n R / k_B`.
    pub fn particle_count(&self) -> QuantityResult<Quantity> {
        (&(&self.amount * &self.r) / &self.k_b).simplified()
    }

    /// Adiabatic index `γ = c_p / c_v`.
    pub fn gamma(&self) -> QuantityResult<Quantity> {
        (&self.c_p / &self.c_v).simplified()
    }

    /// Mass density `ρ = p μ m_p / (k_B T)`, simplified to base units (`m^-3 kg`).
    pub fn mass_density(&self) -> QuantityResult<Quantity> {
        let numerator = &(&self.pressure * &self.mu) * &self.proton_mass;
        let denominator = &self.k_b * &self.temperature;
        (&numerator / &denominator).simplified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimension;
    use approx::assert_relative_eq;

    fn gas() -> IdealGas {
        IdealGas::new(101_325.0, 2.0, 300.0).unwrap()
    }

    #[test]
    fn scalars_take_default_units() {
        let g = gas();
        assert_eq!(g.pressure().unit_string(), "m^-1 kg s^-2");
        assert_eq!(g.amount().unit_string(), "mol");
        assert_eq!(g.temperature().unit_string(), "K");
        assert_eq!(g.proton_mass().unit_string(), "kg");
        assert!(g.mean_molecular_weight().is_dimensionless());
    }

    #[test]
    fn heat_capacities() {
        let g = gas();
        assert_eq!(g.c_v().value(), 1.5);
        assert_eq!(g.c_p().value(), 2.5);
        let g = g.with_heat_capacity(2.5).unwrap();
        assert_eq!(g.c_p().value(), 3.5);
        assert_relative_eq!(g.gamma().unwrap().value(), 1.4, max_relative = 1e-12);
    }

    #[test]
    fn internal_energy_is_in_joules() {
        let u = gas().internal_energy().unwrap();
        assert_relative_eq!(u.value(), 1.5 * 2.0 * 8.314 * 300.0, max_relative = 1e-12);
        assert_eq!(u.unit_string(), "m^2 kg s^-2");
        assert_eq!(u.net_exponent(Dimension::Temperature), 0);
        assert_eq!(u.net_exponent(Dimension::AmountOfSubstance), 0);
    }

    #[test]
    fn particle_count_is_dimensionless() {
        let n = gas().particle_count().unwrap();
        assert!(n.is_dimensionless());
        assert_relative_eq!(n.value(), 2.0 * 8.314 / 1.381e-23, max_relative = 1e-12);
    }

    #[test]
    fn mass_density() {
        let rho = gas().with_mean_molecular_weight(0.6).unwrap().mass_density().unwrap();
        let expected = 101_325.0 * 0.6 * 1.617e-27 / (1.381e-23 * 300.0);
        assert_relative_eq!(rho.value(), expected, max_relative = 1e-12);
        assert_eq!(rho.unit_string(), "m^-3 kg");
    }

    #[test]
    fn accepts_quantities_in_other_units() {
        let p = Quantity::new(101.325, &[], &[("kPa", 1)]).unwrap();
        let n = Quantity::new(500.0, &[], &[("mmol", 1)]).unwrap();
        let g = IdealGas::new(p, n, 300.0).unwrap();
        assert_relative_eq!(g.pressure().value(), 101_325.0, max_relative = 1e-12);
        let u = g.internal_energy().unwrap();
        assert_relative_eq!(u.value(), 1.5 * 0.5 * 8.314 * 300.0, max_relative = 1e-12);
    }

    #[test]
    fn rejects_wrong_dimensions() {
        let not_a_pressure = Quantity::new(1.0, &[], &[("J", 1)]).unwrap();
        assert!(matches!(
            IdealGas::new(not_a_pressure, 1.0, 300.0),
            Err(QuantityError::DimensionMismatch { .. })
        ));
        let not_dimensionless = Quantity::new(1.0, &[], &[("K", 1)]).unwrap();
        assert!(gas().with_heat_capacity(not_dimensionless).is_err());
    }

    #[test]
    fn rejects_unsupported_inputs() {
        assert_eq!(
            IdealGas::new(Operand::Unsupported("string".into()), 1.0, 300.0),
            Err(QuantityError::UnsupportedOperand("string".into()))
        );
    }

    #[test]
    fn constants() {
        assert_eq!(boltzmann().unwrap().unit_string(), "m^2 kg s^-2 K^-1");
        assert_eq!(gas_constant().unwrap().net_exponent(Dimension::AmountOfSubstance), -1);
    }
}
