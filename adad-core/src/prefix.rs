//! Decimal magnitude prefixes.

use core::fmt;

/// Multiplicative scale applied in front of a unit symbol (`k` in `km`).
///
/// [`Prefix::None`] is the implicit prefix of an unprefixed symbol and has factor `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// `E`, 1e18.
    Exa,
    /// `P`, 1e15.
    Peta,
    /// `T`, 1e12.
    Tera,
    /// `G`, 1e9.
    Giga,
    /// `M`, 1e6.
    Mega,
    /// `k`, 1e3.
    Kilo,
    /// `h`, 1e2.
    Hecto,
    /// No prefix.
    None,
    /// `d`, 1e-1.
    Deci,
    /// `c`, 1e-2.
    Centi,
    /// `m`, 1e-3.
    Milli,
    /// `u`, 1e-6.
    Micro,
    /// `n`, 1e-9.
    Nano,
    /// `p`, 1e-12.
    Pico,
    /// `f`, 1e-15.
    Femto,
    /// `a`, 1e-18.
    Atto,
}

impl Prefix {
    /// Every real prefix, in the order they are tried when stripping a symbol.
    pub const STRIPPABLE: [Prefix; 15] = [
        Prefix::Exa,
        Prefix::Peta,
        Prefix::Tera,
        Prefix::Giga,
        Prefix::Mega,
        Prefix::Kilo,
        Prefix::Hecto,
        Prefix::Deci,
        Prefix::Centi,
        Prefix::Milli,
        Prefix::Micro,
        Prefix::Nano,
        Prefix::Pico,
        Prefix::Femto,
        Prefix::Atto,
    ];

    /// Printable symbol; empty for [`Prefix::None`].
    pub const fn symbol(self) -> &'static str {
        match self {
            Prefix::Exa => "E",
            Prefix::Peta => "P",
            Prefix::Tera => "T",
            Prefix::Giga => "G",
            Prefix::Mega => "M",
            Prefix::Kilo => "k",
            Prefix::Hecto => "h",
            Prefix::None => "",
            Prefix::Deci => "d",
            Prefix::Centi => "c",
            Prefix::Milli => "m",
            Prefix::Micro => "u",
            Prefix::Nano => "n",
            Prefix::Pico => "p",
            Prefix::Femto => "f",
            Prefix::Atto => "a",
        }
    }

    /// Multiplier represented by this prefix.
    pub const fn factor(self) -> f64 {
        match self {
            Prefix::Exa => 1e18,
            Prefix::Peta => 1e15,
            Prefix::Tera => 1e12,
            Prefix::Giga => 1e9,
            Prefix::Mega => 1e6,
            Prefix::Kilo => 1e3,
            Prefix::Hecto => 1e2,
            Prefix::None => 1.0,
            Prefix::Deci => 1e-1,
            Prefix::Centi => 1e-2,
            Prefix::Milli => 1e-3,
            Prefix::Micro => 1e-6,
            Prefix::Nano => 1e-9,
            Prefix::Pico => 1e-12,
            Prefix::Femto => 1e-15,
            Prefix::Atto => 1e-18,
        }
    }

    /// Looks a prefix up by its symbol.
    pub fn from_symbol(symbol: &str) -> Option<Prefix> {
        if symbol.is_empty() {
            return Some(Prefix::None);
        }
        Self::STRIPPABLE.into_iter().find(|p| p.symbol() == symbol)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
