//! Cosmological parameter sets.
//!
//! A [`Cosmology`] bundles the measured parameters of one cosmological model as [`Quantity`] values with their
//! uncertainties. The Planck 2015 set is built in; others can be loaded from TOML:
//!
//! ```toml
//! description = "Planck 2015 F (CHM) (Plik)"
//! obh2 = { value = 0.02222, uncertainty = [0.00023] }
//! och2 = { value = 0.1199, uncertainty = [0.0022] }
//! om = { value = 0.316, uncertainty = [0.014] }
//! h = { value = 0.6726, uncertainty = [0.0098] }
//! h0 = { value = 67.26, uncertainty = [0.98], units = [["km", 1], ["Mpc", -1], ["s", -1]] }
//! n_s = { value = 0.9652, uncertainty = [0.0062] }
//! tau = { value = 0.078, uncertainty = [0.019] }
//! sigma_8 = { value = 0.830, uncertainty = [0.015] }
//! ```

use crate::{
    Dimension, Exponents, Prefix, Quantity, QuantityError, QuantityResult, Uncertainty, UnitTerm, Units,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Result type for loading cosmologies
pub type CosmologyResult<T> = Result<T, CosmologyError>;

/// Error type for loading cosmologies
#[derive(Debug, thiserror::Error)]
pub enum CosmologyError {
    /// The parameter file could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A parameter was given with the wrong dimensions or an invalid uncertainty.
    #[error("Invalid parameter `{name}`: {source}")]
    InvalidParameter {
        /// Parameter name as written in the file.
        name: &'static str,
        /// Underlying quantity error.
        source: QuantityError,
    },
}

/// Measured parameters of a cosmological model.
///
/// Every parameter except [`h0`](Cosmology::h0) is dimensionless. Density parameters come in two flavours: the
/// physical densities `Ω h²` as measured, and [`ob`](Cosmology::ob) / [`oc`](Cosmology::oc) derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cosmology {
    description: String,
    obh2: Quantity,
    och2: Quantity,
    om: Quantity,
    h: Quantity,
    h0: Quantity,
    n_s: Quantity,
    tau: Quantity,
    sigma_8: Quantity,
}

impl Default for Cosmology {
    fn default() -> Self {
        Self::planck15()
    }
}

fn dimensionless(value: f64, e: f64) -> Quantity {
    Quantity::dimensionless(value).with_uncertainty(Uncertainty::symmetric(e))
}

/// `value ± e` in `km Mpc^-1 s^-1`.
fn hubble_constant(value: f64, e: f64) -> Quantity {
    let mut units = Units::new();
    units.push(Dimension::Length, UnitTerm::new(Prefix::Kilo, "m", 1));
    units.push(Dimension::Length, UnitTerm::new(Prefix::Mega, "pc", -1));
    units.push(Dimension::Time, UnitTerm::plain("s", -1));
    Quantity::from_parts(value, units, Uncertainty::symmetric(e))
}

impl Cosmology {
    /// Planck 2015 results, "F (CHM) (Plik)" column.
    pub fn planck15() -> Self {
        Self {
            description: "Planck 2015 F (CHM) (Plik)".to_string(),
            obh2: dimensionless(0.02222, 0.00023),
            och2: dimensionless(0.1199, 0.0022),
            om: dimensionless(0.316, 0.014),
            h: dimensionless(0.6726, 0.0098),
            h0: hubble_constant(67.26, 0.98),
            n_s: dimensionless(0.9652, 0.0062),
            tau: dimensionless(0.078, 0.019),
            sigma_8: dimensionless(0.830, 0.015),
        }
    }

    /// Looks a built-in parameter set up by name; only `"planck15"` is known.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "planck15" => Some(Self::planck15()),
            _ => None,
        }
    }

    /// Loads a parameter set from a TOML file.
    ///
    /// # Returns
    /// * `Ok(Cosmology)` if successful
    /// * `Err(CosmologyError::ConfigurationError)` if the file cannot be read or parsed
    /// * `Err(CosmologyError::InvalidParameter)` if a parameter has the wrong dimensions
    pub fn from_file<P: AsRef<Path>>(path: P) -> CosmologyResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CosmologyError::ConfigurationError(format!("Failed to read cosmology file: {}", e))
        })?;
        let cosmo: Self = content.parse()?;
        info!(
            "Loaded cosmology `{}` from {}",
            cosmo.description,
            path.as_ref().display()
        );
        Ok(cosmo)
    }

    /// Dimensional check of every parameter.
    fn validate(&self) -> CosmologyResult<()> {
        let mut per_time = Exponents::default();
        per_time.0[Dimension::Time.index()] = -1;

        let checks: [(&'static str, &Quantity, Exponents); 8] = [
            ("obh2", &self.obh2, Exponents::default()),
            ("och2", &self.och2, Exponents::default()),
            ("om", &self.om, Exponents::default()),
            ("h", &self.h, Exponents::default()),
            ("h0", &self.h0, per_time),
            ("n_s", &self.n_s, Exponents::default()),
            ("tau", &self.tau, Exponents::default()),
            ("sigma_8", &self.sigma_8, Exponents::default()),
        ];
        for (name, q, expected) in checks {
            q.expect_exponents(expected)
                .map_err(|source| CosmologyError::InvalidParameter { name, source })?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Parameters
    // ─────────────────────────────────────────────────────────────────────────

    /// Human-readable name of the parameter set.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Physical baryon density `Ω_b h²`.
    pub fn obh2(&self) -> &Quantity {
        &self.obh2
    }

    /// Physical cold dark matter density `Ω_c h²`.
    pub fn och2(&self) -> &Quantity {
        &self.och2
    }

    /// Total matter density `Ω_m`.
    pub fn om(&self) -> &Quantity {
        &self.om
    }

    /// Dimensionless Hubble parameter.
    pub fn h(&self) -> &Quantity {
        &self.h
    }

    /// Hubble constant, `km Mpc^-1 s^-1` for the built-in set.
    pub fn h0(&self) -> &Quantity {
        &self.h0
    }

    /// Scalar spectral index.
    pub fn n_s(&self) -> &Quantity {
        &self.n_s
    }

    /// Reionization optical depth.
    pub fn tau(&self) -> &Quantity {
        &self.tau
    }

    /// Amplitude of matter fluctuations on 8 h⁻¹ Mpc scales.
    pub fn sigma_8(&self) -> &Quantity {
        &self.sigma_8
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived parameters
    // ─────────────────────────────────────────────────────────────────────────

    /// Baryon density `Ω_b = Ω_b h² / h²`.
    pub fn ob(&self) -> Quantity {
        &self.obh2 / &self.h.pow(2)
    }

    /// Cold dark matter density `Ω_c = Ω_c h² / h²`.
    pub fn oc(&self) -> Quantity {
        &self.och2 / &self.h.pow(2)
    }

    /// Hubble time `1 / H0` in the requested time unit (`"Gyr"`, `"s"`, ...).
    ///
    /// # Errors
    ///
    /// [`QuantityError::UnknownUnit`] if `unit` is not registered.
    pub fn hubble_time(&self, unit: &str) -> QuantityResult<Quantity> {
        self.h0.pow(-1).to(&[(unit, 1)])
    }
}

impl FromStr for Cosmology {
    type Err = CosmologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cosmo: Self = toml::from_str(s).map_err(|e| {
            CosmologyError::ConfigurationError(format!("Failed to parse cosmology file: {}", e))
        })?;
        cosmo.validate()?;
        Ok(cosmo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    const PLANCK15: &str = r#"
        description = "Planck 2015 F (CHM) (Plik)"
        obh2 = { value = 0.02222, uncertainty = [0.00023] }
        och2 = { value = 0.1199, uncertainty = [0.0022] }
        om = { value = 0.316, uncertainty = [0.014] }
        h = { value = 0.6726, uncertainty = [0.0098] }
        h0 = { value = 67.26, uncertainty = [0.98], units = [["km", 1], ["Mpc", -1], ["s", -1]] }
        n_s = { value = 0.9652, uncertainty = [0.0062] }
        tau = { value = 0.078, uncertainty = [0.019] }
        sigma_8 = { value = 0.830, uncertainty = [0.015] }
    "#;

    #[test]
    fn planck15_values() {
        let c = Cosmology::planck15();
        assert_eq!(c.description(), "Planck 2015 F (CHM) (Plik)");
        assert_eq!(c.h().value(), 0.6726);
        assert_eq!(c.h().uncertainty(), (0.0098, 0.0098));
        assert_eq!(c.om().value(), 0.316);
        assert_eq!(c.h0().value(), 67.26);
        assert_eq!(c.h0().unit_string(), "km Mpc^-1 s^-1");
        assert_eq!(c.sigma_8().uncertainty(), (0.015, 0.015));
    }

    #[test]
    fn builtin_set_is_consistent() {
        assert!(Cosmology::planck15().validate().is_ok());
        assert_eq!(Cosmology::by_name("planck15"), Some(Cosmology::default()));
        assert!(Cosmology::by_name("wmap9").is_none());
    }

    #[test]
    fn baryon_and_cdm_densities() {
        let c = Cosmology::planck15();
        let h2 = 0.6726 * 0.6726;
        let ob = c.ob();
        assert_relative_eq!(ob.value(), 0.02222 / h2, max_relative = 1e-12);
        assert!(ob.is_dimensionless());
        // linear rule on the raw operands, with e_h2 = 2 e_h
        let expected = h2 * 0.00023 + 0.02222 * (2.0 * 0.0098);
        assert_relative_eq!(ob.uncertainty().0, expected, max_relative = 1e-12);
        assert_relative_eq!(c.oc().value(), 0.1199 / h2, max_relative = 1e-12);
    }

    #[test]
    fn hubble_time_in_gigayears() {
        let t = Cosmology::planck15().hubble_time("Gyr").unwrap();
        assert_relative_eq!(t.value(), 14.547, max_relative = 1e-3);
        assert_eq!(t.unit_string(), "Gyr");
    }

    #[test]
    fn hubble_time_rejects_unknown_unit() {
        assert!(matches!(
            Cosmology::planck15().hubble_time("fortnight"),
            Err(QuantityError::UnknownUnit(_))
        ));
    }

    #[test]
    fn parses_toml_matching_builtin() {
        let c: Cosmology = PLANCK15.parse().unwrap();
        assert_eq!(c, Cosmology::planck15());
    }

    #[test]
    fn rejects_wrong_hubble_dimensions() {
        let bad = PLANCK15.replace(r#"["Mpc", -1], "#, "");
        let err = bad.parse::<Cosmology>().unwrap_err();
        assert!(matches!(err, CosmologyError::InvalidParameter { name: "h0", .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = "description = ".parse::<Cosmology>().unwrap_err();
        assert!(matches!(err, CosmologyError::ConfigurationError(_)));
    }

    #[test]
    fn rejects_bad_uncertainty() {
        let bad = PLANCK15.replace("uncertainty = [0.014]", "uncertainty = [0.1, 0.2, 0.3]");
        assert!(matches!(
            bad.parse::<Cosmology>(),
            Err(CosmologyError::ConfigurationError(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PLANCK15.as_bytes()).unwrap();
        let c = Cosmology::from_file(file.path()).unwrap();
        assert_eq!(c.n_s().value(), 0.9652);
    }

    #[test]
    fn missing_file_is_configuration_error() {
        assert!(matches!(
            Cosmology::from_file("/nonexistent/cosmo.toml"),
            Err(CosmologyError::ConfigurationError(_))
        ));
    }
}
