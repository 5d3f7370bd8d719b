//! Core algebra for physical quantities with runtime compound units.
//!
//! `adad-core` provides a small, runtime-checked units model:
//!
//! - A *unit term* is a `(prefix, symbol, exponent)` triple such as `km`, `Mpc^-1` or `s^-2` ([`UnitTerm`]).
//! - A [`Quantity`] is an `f64` value, one list of unit terms per [`Dimension`] and a two-sided [`Uncertainty`].
//! - Symbols are resolved through a [`UnitRegistry`] of base units, derived units and decimal [`Prefix`]es.
//! - Conversion is explicit ([`Quantity::to`]); so is collapsing mixed units ([`Quantity::simplify`]).
//!
//! Most users should depend on `adad` (the facade crate) unless they need direct access to these primitives.
//!
//! # What this crate solves
//!
//! - Arbitrary compound units over Length, Mass, Time, Temperature and AmountOfSubstance (`km Mpc^-1 s^-1`).
//! - Dimensional checking of sums: only quantities with equal net exponents can be added.
//! - Conversion-factor bookkeeping through prefixes, base units and derived units (`kPa`, `erg`, `Msun`).
//! - First-order propagation of a two-sided uncertainty through products, quotients and powers.
//!
//! # What this crate does not try to solve
//!
//! - Parsing free-form unit strings (`"km/h"`); units are given as `(symbol, exponent)` pairs.
//! - Offset or logarithmic units (degrees Celsius, decibels).
//! - Exact arithmetic (values are `f64`) and fractional exponents.
//!
//! # Quick start
//!
//! ```rust
//! use adad_core::{Dimension, Quantity};
//!
//! let h0 = Quantity::new(67.26, &[0.98], &[("km", 1), ("Mpc", -1), ("s", -1)]).unwrap();
//! assert_eq!(h0.unit_string(), "km Mpc^-1 s^-1");
//!
//! let mut rate = h0.clone();
//! rate.simplify().unwrap();
//! assert_eq!(rate.unit_string(), "s^-1");
//! assert_eq!(rate.net_exponent(Dimension::Length), 0);
//! ```
//!
//! Derived units expand into base terms:
//!
//! ```rust
//! use adad_core::Quantity;
//!
//! let p = Quantity::new(1.0, &[], &[("Pa", 1)]).unwrap();
//! assert_eq!(p.unit_string(), "m^-1 kg s^-2");
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Quantity`] through [`QuantitySpec`].
//! - `config` (default, implies `serde`): TOML [`RegistryConfig`] to extend the built-in unit tables.
//!
//! # Panics and errors
//!
//! Nothing here panics on its own. Operations that need a registry lookup or a dimensional check return
//! [`QuantityResult`]; products, quotients and powers are infallible and follow IEEE-754 behaviour.
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade: dropped unit symbols and rejected operands at `warn`, registry
//! installation at `info`, simplification and mismatch details at `debug`.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

#[macro_use]
mod macros;

mod dimension;
mod error;
mod prefix;
mod quantity;
pub mod registry;
mod unit;

// ─────────────────────────────────────────────────────────────────────────────
// Public re-exports of core types
// ─────────────────────────────────────────────────────────────────────────────

pub use dimension::{Dimension, Exponents};
pub use error::{QuantityError, QuantityResult, RegistryError, RegistryResult};
pub use prefix::Prefix;
pub use quantity::{Operand, Product, Quantity, Uncertainty};
pub use registry::{Expansion, UnitRegistry};
pub use unit::{UnitTerm, Units};

#[cfg(feature = "serde")]
pub use quantity::QuantitySpec;

#[cfg(feature = "config")]
pub use registry::{BaseUnitConfig, DerivedUnitConfig, RegistryConfig};
