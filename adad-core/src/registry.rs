//! Unit registry: base units, derived units and symbol resolution.
//!
//! The registry maps a textual symbol such as `"Mpc"` or `"kJ"` onto base [`UnitTerm`]s and knows the conversion
//! factor of every base unit into the *reference unit* of its dimension (the unit whose factor is `1`).
//!
//! # Conversion formula
//!
//! ```text
//! factor(term) = (prefix(term) * base(term.symbol)) ^ term.exponent
//! ```
//!
//! A quantity is reduced to reference units by multiplying its value with the factor of every attached term, and
//! re-expressed in other units by dividing by theirs.
//!
//! # Process-wide registry
//!
//! Quantities resolve symbols through [`global`], which holds the built-in tables unless a custom registry was
//! [`install`]ed first. The registry is immutable once in place and safe to share across threads.

use crate::dimension::Dimension;
use crate::error::{QuantityError, QuantityResult, RegistryError, RegistryResult};
use crate::prefix::Prefix;
use crate::unit::UnitTerm;
use log::info;
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "config")]
use std::path::Path;
#[cfg(feature = "config")]
use std::str::FromStr;

// =============================================================================
// Tables
// =============================================================================

/// Base units of one dimension.
#[derive(Debug, Clone)]
struct BaseTable {
    /// Unit used when simplification collapses the dimension.
    default: UnitTerm,
    /// Symbol → factor into the reference unit.
    factors: BTreeMap<String, f64>,
}

impl BaseTable {
    fn new(default: UnitTerm, factors: &[(&str, f64)]) -> Self {
        Self {
            default,
            factors: factors.iter().map(|(s, f)| (s.to_string(), *f)).collect(),
        }
    }
}

/// Base-term expansion of one requested `(symbol, exponent)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    /// Scale picked up from a prefix on a derived unit (`kJ`), already raised to the exponent; `1` otherwise.
    pub factor: f64,
    /// Base terms with their dimension, exponents already multiplied by the requested exponent.
    pub terms: Vec<(Dimension, UnitTerm)>,
}

/// Lookup tables for base units, derived units and their conversion factors.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    base: [BaseTable; Dimension::COUNT],
    derived: BTreeMap<String, Vec<(Dimension, UnitTerm)>>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl UnitRegistry {
    /// The built-in tables.
    ///
    /// | Dimension | Default | Units (factor) |
    /// |-----------|---------|----------------|
    /// | Length | `m` | `m` (1), `pc` (3.086e16), `au` (1.496e11), `ly` (9.461e15) |
    /// | Mass | `kg` | `g` (1), `Msun` (1.989e33) |
    /// | Time | `s` | `s` (1), `min` (60), `h` (3600), `d` (86400), `yr` (3.154e7) |
    /// | Temperature | `K` | `K` (1) |
    /// | AmountOfSubstance | `mol` | `mol` (1) |
    ///
    /// Derived units: `Hz`, `J`, `N`, `Pa`, `W` (SI, mass in `kg`) and `erg` (CGS).
    pub fn builtin() -> Self {
        let base = [
            BaseTable::new(
                UnitTerm::plain("m", 1),
                &[("m", 1.0), ("pc", 3.086e16), ("au", 1.496e11), ("ly", 9.461e15)],
            ),
            BaseTable::new(
                UnitTerm::new(Prefix::Kilo, "g", 1),
                &[("g", 1.0), ("Msun", 1.989e33)],
            ),
            BaseTable::new(
                UnitTerm::plain("s", 1),
                &[
                    ("s", 1.0),
                    ("min", 60.0),
                    ("h", 3600.0),
                    ("d", 86400.0),
                    ("yr", 3.154e7),
                ],
            ),
            BaseTable::new(UnitTerm::plain("K", 1), &[("K", 1.0)]),
            BaseTable::new(UnitTerm::plain("mol", 1), &[("mol", 1.0)]),
        ];

        let kg = |p: i32| (Dimension::Mass, UnitTerm::new(Prefix::Kilo, "g", p));
        let m = |p: i32| (Dimension::Length, UnitTerm::plain("m", p));
        let s = |p: i32| (Dimension::Time, UnitTerm::plain("s", p));

        let mut derived = BTreeMap::new();
        derived.insert("Hz".to_string(), vec![s(-1)]);
        derived.insert("J".to_string(), vec![kg(1), m(2), s(-2)]);
        derived.insert("N".to_string(), vec![kg(1), m(1), s(-2)]);
        derived.insert("Pa".to_string(), vec![kg(1), m(-1), s(-2)]);
        derived.insert("W".to_string(), vec![kg(1), m(2), s(-3)]);
        derived.insert(
            "erg".to_string(),
            vec![
                (Dimension::Mass, UnitTerm::plain("g", 1)),
                (Dimension::Length, UnitTerm::new(Prefix::Centi, "m", 2)),
                s(-2),
            ],
        );

        Self { base, derived }
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Dimension and reference factor of an unprefixed base unit symbol.
    pub fn base_unit(&self, symbol: &str) -> Option<(Dimension, f64)> {
        Dimension::ALL.into_iter().find_map(|dim| {
            self.base[dim.index()]
                .factors
                .get(symbol)
                .map(|&factor| (dim, factor))
        })
    }

    /// Dimension a base unit symbol is registered under.
    #[inline]
    pub fn dimension_of(&self, symbol: &str) -> Option<Dimension> {
        self.base_unit(symbol).map(|(dim, _)| dim)
    }

    /// Base-term decomposition of a derived unit symbol.
    pub fn derived(&self, symbol: &str) -> Option<&[(Dimension, UnitTerm)]> {
        self.derived.get(symbol).map(Vec::as_slice)
    }

    /// Unit a dimension collapses to on simplification.
    #[inline]
    pub fn default_unit(&self, dim: Dimension) -> &UnitTerm {
        &self.base[dim.index()].default
    }

    /// `true` if `symbol` is an unprefixed base or derived unit.
    pub fn is_known(&self, symbol: &str) -> bool {
        self.derived.contains_key(symbol) || self.base_unit(symbol).is_some()
    }

    /// Number of registered base and derived units.
    pub fn len(&self) -> usize {
        self.base.iter().map(|t| t.factors.len()).sum::<usize>() + self.derived.len()
    }

    /// `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// Splits a symbol into `(prefix, unit symbol)`.
    ///
    /// A symbol that is itself a registered unit is never split, so `"Pa"`, `"min"` and `"Msun"` keep their meaning
    /// even though they start with prefix letters. Otherwise the first prefix whose remainder is a registered unit
    /// wins. Single-character symbols are atomic.
    ///
    /// ```rust
    /// use adad_core::{Prefix, UnitRegistry};
    ///
    /// let reg = UnitRegistry::builtin();
    /// assert_eq!(reg.resolve_prefix("Mpc").unwrap(), (Prefix::Mega, "pc"));
    /// assert_eq!(reg.resolve_prefix("Pa").unwrap(), (Prefix::None, "Pa"));
    /// assert!(reg.resolve_prefix("q").is_err());
    /// ```
    pub fn resolve_prefix<'a>(&self, symbol: &'a str) -> QuantityResult<(Prefix, &'a str)> {
        if self.is_known(symbol) {
            return Ok((Prefix::None, symbol));
        }
        if symbol.chars().count() <= 1 {
            return Err(QuantityError::UnknownUnit(symbol.to_string()));
        }

        Prefix::STRIPPABLE
            .into_iter()
            .find_map(|p| {
                symbol
                    .strip_prefix(p.symbol())
                    .filter(|rest| self.is_known(rest))
                    .map(|rest| (p, rest))
            })
            .ok_or_else(|| QuantityError::UnknownUnit(symbol.to_string()))
    }

    /// Expands `symbol^exponent` into base terms.
    ///
    /// Base units produce a single term. Derived units produce one term per entry of their decomposition, each
    /// exponent multiplied by `exponent`; a prefix on the derived unit is returned as [`Expansion::factor`].
    pub fn expand(&self, symbol: &str, exponent: i32) -> QuantityResult<Expansion> {
        let (prefix, unit) = self.resolve_prefix(symbol)?;

        if let Some(decomposition) = self.derived(unit) {
            return Ok(Expansion {
                factor: prefix.factor().powi(exponent),
                terms: decomposition
                    .iter()
                    .map(|(dim, t)| (*dim, t.with_exponent(t.exponent * exponent)))
                    .collect(),
            });
        }

        let dim = self
            .dimension_of(unit)
            .ok_or_else(|| QuantityError::UnknownUnit(symbol.to_string()))?;
        Ok(Expansion {
            factor: 1.0,
            terms: vec![(dim, UnitTerm::new(prefix, unit, exponent))],
        })
    }

    /// `(prefix * base factor) ^ exponent` for a base term.
    ///
    /// Fails with [`QuantityError::UnknownUnit`] if the term's symbol is not a registered base unit.
    pub fn conversion_factor(&self, term: &UnitTerm) -> QuantityResult<f64> {
        let (_, base) = self
            .base_unit(&term.symbol)
            .ok_or_else(|| QuantityError::UnknownUnit(term.prefixed_symbol()))?;
        Ok((term.prefix.factor() * base).powi(term.exponent))
    }

    // -------------------------------------------------------------------------
    // Extension
    // -------------------------------------------------------------------------

    /// Registers a base unit under `dim`.
    pub fn add_base_unit(&mut self, dim: Dimension, symbol: &str, factor: f64) -> RegistryResult<()> {
        if self.is_known(symbol) {
            return Err(RegistryError::DuplicateUnit(symbol.to_string()));
        }
        if !factor.is_finite() || factor <= 0.0 {
            return Err(RegistryError::InvalidFactor {
                symbol: symbol.to_string(),
                factor,
            });
        }
        self.base[dim.index()]
            .factors
            .insert(symbol.to_string(), factor);
        Ok(())
    }

    /// Registers a derived unit from `(unit, exponent)` pairs.
    ///
    /// Each unit may carry a prefix (`"kg"`) and may itself be a derived unit without prefix (`"J"`), which is
    /// expanded in place.
    pub fn add_derived_unit(&mut self, symbol: &str, terms: &[(&str, i32)]) -> RegistryResult<()> {
        if self.is_known(symbol) {
            return Err(RegistryError::DuplicateUnit(symbol.to_string()));
        }

        let unresolved = |unit: &str| RegistryError::UnresolvedTerm {
            derived: symbol.to_string(),
            symbol: unit.to_string(),
        };

        let mut decomposition = Vec::new();
        for (unit, exponent) in terms {
            let expansion = self.expand(unit, *exponent).map_err(|_| unresolved(unit))?;
            if expansion.factor != 1.0 {
                return Err(unresolved(unit));
            }
            decomposition.extend(expansion.terms);
        }

        self.derived.insert(symbol.to_string(), decomposition);
        Ok(())
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Extra units layered on top of the built-in tables, usually read from TOML.
///
/// ```toml
/// [[base]]
/// dimension = "Length"
/// symbol = "ft"
/// factor = 0.3048
///
/// [[derived]]
/// symbol = "dyn"
/// terms = [["g", 1], ["cm", 1], ["s", -2]]
/// ```
#[cfg(feature = "config")]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Additional base units.
    #[serde(default)]
    pub base: Vec<BaseUnitConfig>,
    /// Additional derived units, registered after every base unit.
    #[serde(default)]
    pub derived: Vec<DerivedUnitConfig>,
}

/// One `[[base]]` entry.
#[cfg(feature = "config")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseUnitConfig {
    /// Dimension the unit measures.
    pub dimension: Dimension,
    /// Unprefixed symbol.
    pub symbol: String,
    /// Factor into the dimension's reference unit.
    pub factor: f64,
}

/// One `[[derived]]` entry.
#[cfg(feature = "config")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedUnitConfig {
    /// Unprefixed symbol.
    pub symbol: String,
    /// `(unit, exponent)` decomposition.
    pub terms: Vec<(String, i32)>,
}

#[cfg(feature = "config")]
impl RegistryConfig {
    /// Load a registry configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(RegistryConfig)` if successful
    /// * `Err(RegistryError::ConfigurationError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> RegistryResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RegistryError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;
        content.parse()
    }
}

#[cfg(feature = "config")]
impl FromStr for RegistryConfig {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| {
            RegistryError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })
    }
}

#[cfg(feature = "config")]
impl UnitRegistry {
    /// Applies a configuration: base units first, then derived units in file order.
    pub fn with_config(mut self, config: &RegistryConfig) -> RegistryResult<Self> {
        for unit in &config.base {
            self.add_base_unit(unit.dimension, &unit.symbol, unit.factor)?;
        }
        for unit in &config.derived {
            let terms: Vec<(&str, i32)> = unit.terms.iter().map(|(s, p)| (s.as_str(), *p)).collect();
            self.add_derived_unit(&unit.symbol, &terms)?;
        }
        Ok(self)
    }

    /// Built-in tables extended with the units listed in a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> RegistryResult<Self> {
        let config = RegistryConfig::from_file(path)?;
        Self::builtin().with_config(&config)
    }
}

// =============================================================================
// Process-wide registry
// =============================================================================

static REGISTRY: OnceCell<UnitRegistry> = OnceCell::new();

/// The process-wide registry; the built-in tables unless [`install`] ran first.
pub fn global() -> &'static UnitRegistry {
    REGISTRY.get_or_init(UnitRegistry::builtin)
}

/// Sets the process-wide registry.
///
/// Must happen before the first call to [`global`] (directly or through any [`Quantity`](crate::Quantity)
/// operation); afterwards the registry is frozen and this returns [`RegistryError::AlreadyInstalled`].
pub fn install(registry: UnitRegistry) -> RegistryResult<()> {
    let units = registry.len();
    REGISTRY
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)?;
    info!("Installed unit registry with {} units", units);
    Ok(())
}
