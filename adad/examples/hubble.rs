//! Prints the Planck 2015 parameters and a few quantities derived from them.
//!
//! Run with `cargo run -p adad --example hubble [cosmology.toml]`.

use adad::{Cosmology, IdealGas, Quantity};

fn main() -> anyhow::Result<()> {
    let cosmo = match std::env::args().nth(1) {
        Some(path) => Cosmology::from_file(path)?,
        None => Cosmology::planck15(),
    };

    println!("{}", cosmo.description());
    println!("  H0      = {}", cosmo.h0());
    println!("  h       = {}", cosmo.h());
    println!("  Omega_m = {}", cosmo.om());
    println!("  Omega_b = {}", cosmo.ob());
    println!("  Omega_c = {}", cosmo.oc());
    println!("  t_H     = {}", cosmo.hubble_time("Gyr")?);
    println!("  H0      = {}", cosmo.h0().simplified()?);

    let distance = Quantity::new(100.0, &[], &[("Mpc", 1)])?;
    let recession = (cosmo.h0() * &distance).simplified()?;
    println!("Recession velocity at {}: {}", distance, recession);

    let gas = IdealGas::new(101_325.0, 1.0, 273.15)?;
    println!("Internal energy of 1 mol at STP: {}", gas.internal_energy()?);

    Ok(())
}
