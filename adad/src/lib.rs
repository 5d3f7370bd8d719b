//! Physical quantities with compound units, conversions and uncertainty propagation.
//!
//! `adad` is the user-facing crate in this workspace. It re-exports the full API from `adad-core` and adds the
//! quantity consumers built on top of it: cosmological parameter sets, an ideal gas and length-carrying vectors.
//!
//! A value is always a [`Quantity`]: an `f64`, a list of unit terms per [`Dimension`] and a two-sided uncertainty.
//! Units are tracked at runtime, so any product of powers of the registered units is expressible.
//!
//! # Quick start
//!
//! The Hubble time from the Planck 2015 Hubble constant:
//!
//! ```rust
//! use adad::cosmology::Cosmology;
//!
//! let cosmo = Cosmology::planck15();
//! let t = cosmo.hubble_time("Gyr").unwrap();
//! assert!((t.value() - 14.55).abs() < 0.01);
//! ```
//!
//! Build, multiply and convert:
//!
//! ```rust
//! use adad::{quantity, Dimension};
//!
//! let d = quantity!(42.0, [0.5]; km => 1).unwrap();
//! let t = quantity!(2.0; h => 1).unwrap();
//! let v = (&d / &t).to(&[("m", 1), ("s", -1)]).unwrap();
//! assert!((v.value() - 42_000.0 / 7_200.0).abs() < 1e-12);
//! assert_eq!(v.net_exponent(Dimension::Time), -1);
//! ```
//!
//! Adding quantities of different dimensions is an error, not a panic:
//!
//! ```rust
//! use adad::{Quantity, QuantityError};
//!
//! let m = Quantity::new(1.0, &[], &[("m", 1)]).unwrap();
//! let s = Quantity::new(1.0, &[], &[("s", 1)]).unwrap();
//! assert!(matches!(m + s, Err(QuantityError::DimensionMismatch { .. })));
//! ```
//!
//! # Modules
//!
//! - [`cosmology`]: named cosmological parameter sets (Planck 2015 by default), loadable from TOML.
//! - [`ideal_gas`]: an ideal gas state with internal energy, particle count, adiabatic index and density.
//! - [`vector`]: a quantity-valued length with a direction.
//! - [`registry`]: the unit tables and the process-wide registry.
//!
//! # Feature flags
//!
//! Serde and TOML support from `adad-core` are always enabled here.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub use adad_core::*;

pub mod cosmology;
pub mod ideal_gas;
pub mod vector;

pub use cosmology::{Cosmology, CosmologyError};
pub use ideal_gas::IdealGas;
pub use vector::Vector;
