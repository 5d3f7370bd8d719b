//! Integration-level scenarios for the `adad` facade crate.

use adad::*;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use proptest::prelude::*;

#[test]
fn smoke_test_hubble_constant() -> anyhow::Result<()> {
    let h0 = Quantity::new(67.26, &[0.98], &[("km", 1), ("Mpc", -1), ("s", -1)])?;
    assert_eq!(h0.value(), 67.26);
    assert_eq!(h0.unit_string(), "km Mpc^-1 s^-1");
    assert_eq!(h0.uncertainty(), (0.98, 0.98));

    let per_second = h0.simplified()?;
    assert_relative_eq!(per_second.value(), 2.1795e-18, max_relative = 1e-4);
    assert_relative_eq!(per_second.uncertainty().1, 0.98e3 / 3.086e22, max_relative = 1e-12);
    Ok(())
}

#[test]
fn smoke_test_pascal() -> anyhow::Result<()> {
    let p = Quantity::new(1.0, &[], &[("Pa", 1)])?;
    assert_eq!(p.exponents(), Exponents([-1, 1, -2, 0, 0]));

    let mut pp = &p * &p;
    pp.simplify()?;
    assert_eq!(pp.units()[Dimension::Mass], vec![UnitTerm::new(Prefix::Kilo, "g", 2)]);
    Ok(())
}

#[test]
fn smoke_test_mass_roundtrip() -> anyhow::Result<()> {
    let kg = Quantity::new(5.0, &[], &[("kg", 1)])?;
    let g = kg.to(&[("g", 1)])?;
    assert_abs_diff_eq!(g.value(), 5000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(g.to(&[("kg", 1)])?.value(), 5.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn smoke_test_solar_mass() -> anyhow::Result<()> {
    let sun = Quantity::new(1.0, &[], &[("Msun", 1)])?;
    assert_relative_eq!(sun.to(&[("kg", 1)])?.value(), 1.989e30, max_relative = 1e-12);
    Ok(())
}

#[test]
fn smoke_test_energy_units() -> anyhow::Result<()> {
    let e = Quantity::new(1.0, &[], &[("erg", 1)])?;
    assert_relative_eq!(e.to(&[("J", 1)])?.value(), 1e-7, max_relative = 1e-12);
    let power = Quantity::new(3.0, &[], &[("kW", 1)])?;
    let per_hour = (&power * &Quantity::new(1.0, &[], &[("h", 1)])?).to(&[("MJ", 1)])?;
    assert_relative_eq!(per_hour.value(), 10.8, max_relative = 1e-12);
    Ok(())
}

#[test]
fn smoke_test_dimension_mismatch() {
    let length = Quantity::new(1.0, &[], &[("m", 1)]).unwrap();
    let number = Quantity::dimensionless(1.0);
    let err = (&length + &number).unwrap_err();
    assert_eq!(
        err,
        QuantityError::DimensionMismatch {
            left: "L^1".into(),
            right: "1".into(),
        }
    );
    assert_eq!(err.to_string(), "Dimension mismatch: [L^1] vs [1]");
}

#[test]
fn smoke_test_multiplicative_identity() {
    let q = quantity!(6.674, [0.001, 0.002]; m => 3, kg => -1, s => -2).unwrap();
    assert_eq!(&q * 1.0, q);
    assert_eq!(&q * &Quantity::dimensionless(1.0), q);
}

#[test]
fn smoke_test_length_product() {
    let a = quantity!(2.0; m => 1).unwrap();
    let b = quantity!(4.5; m => 1).unwrap();
    let area = a * b;
    assert_eq!(area.net_exponent(Dimension::Length), 2);
    assert_eq!(area.value(), 9.0);
}

#[test]
fn smoke_test_cosmology() {
    let cosmo = Cosmology::planck15();
    assert_relative_eq!(cosmo.ob().value(), 0.04912, max_relative = 1e-3);
    assert_relative_eq!(cosmo.hubble_time("Gyr").unwrap().value(), 14.547, max_relative = 1e-3);
}

#[test]
fn smoke_test_ideal_gas() {
    let gas = IdealGas::new(Quantity::new(1.0, &[], &[("kPa", 1)]).unwrap(), 1.0, 273.15).unwrap();
    let n = gas.particle_count().unwrap();
    assert_relative_eq!(n.value(), 8.314 / 1.381e-23, max_relative = 1e-12);
}

#[test]
fn smoke_test_serde_json() {
    let h0 = quantity!(67.26, [0.98]; km => 1, Mpc => -1, s => -1).unwrap();
    let json = serde_json::to_string(&h0).unwrap();
    let back: Quantity = serde_json::from_str(&json).unwrap();
    assert_eq!(back, h0);
}

#[test]
fn smoke_test_custom_registry() {
    let config: RegistryConfig = r#"
        [[base]]
        dimension = "Length"
        symbol = "ft"
        factor = 0.3048
    "#
    .parse()
    .unwrap();
    let registry = UnitRegistry::builtin().with_config(&config).unwrap();
    let mile = Quantity::new_in(&registry, 5280.0, &[], &[("ft", 1)]).unwrap();
    let km = mile.to_in(&registry, &[("km", 1)]).unwrap();
    assert_relative_eq!(km.value(), 1.609344, max_relative = 1e-12);
}

proptest! {
    #[test]
    fn prop_roundtrip_through_derived_units(v in -1e6..1e6f64) {
        let p = Quantity::new(v, &[], &[("kPa", 1)]).unwrap();
        let back = p.to(&[("erg", 1), ("cm", -3)]).unwrap().to(&[("Pa", 1)]).unwrap();
        prop_assert!((back.value() - v * 1e3).abs() <= 1e-9 * (v * 1e3).abs().max(1.0));
    }

    #[test]
    fn prop_add_then_sub_restores_value(a in -1e3..1e3f64, b in -1e3..1e3f64) {
        let x = Quantity::new(a, &[], &[("km", 1), ("h", -1)]).unwrap();
        let y = Quantity::new(b, &[], &[("m", 1), ("s", -1)]).unwrap();
        let back = ((&x + &y).unwrap() - y).unwrap();
        prop_assert!((back.value() - a).abs() < 1e-9);
    }
}
