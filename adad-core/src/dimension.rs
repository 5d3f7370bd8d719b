//! Dimension types.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the fixed physical axes a unit can measure.
///
/// The set is closed: every [`Quantity`](crate::Quantity) tracks exactly these five dimensions, in this order.
///
/// ```rust
/// use adad_core::Dimension;
///
/// assert_eq!(Dimension::ALL.len(), Dimension::COUNT);
/// assert_eq!(Dimension::Time.index(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dimension {
    /// Length (`L`).
    Length,
    /// Mass (`M`).
    Mass,
    /// Time (`T`).
    Time,
    /// Thermodynamic temperature (`Θ`).
    Temperature,
    /// Amount of substance (`N`).
    AmountOfSubstance,
}

impl Dimension {
    /// Number of dimensions.
    pub const COUNT: usize = 5;

    /// Every dimension, in rendering order.
    pub const ALL: [Dimension; Dimension::COUNT] = [
        Dimension::Length,
        Dimension::Mass,
        Dimension::Time,
        Dimension::Temperature,
        Dimension::AmountOfSubstance,
    ];

    /// Position of this dimension inside [`Dimension::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Dimension::Length => 0,
            Dimension::Mass => 1,
            Dimension::Time => 2,
            Dimension::Temperature => 3,
            Dimension::AmountOfSubstance => 4,
        }
    }

    /// Short dimensional symbol (`L`, `M`, `T`, `Θ`, `N`).
    pub const fn symbol(self) -> &'static str {
        match self {
            Dimension::Length => "L",
            Dimension::Mass => "M",
            Dimension::Time => "T",
            Dimension::Temperature => "Θ",
            Dimension::AmountOfSubstance => "N",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Net exponents of a quantity over every [`Dimension`], e.g. `L^1 T^-1` for a velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Exponents(pub [i32; Dimension::COUNT]);

impl Exponents {
    /// Net exponent for one dimension.
    #[inline]
    pub const fn get(&self, dim: Dimension) -> i32 {
        self.0[dim.index()]
    }

    /// `true` when every exponent is zero.
    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|&p| p == 0)
    }
}

impl fmt::Display for Exponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("1");
        }
        let mut first = true;
        for dim in Dimension::ALL {
            let p = self.get(dim);
            if p == 0 {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}^{}", dim, p)?;
            first = false;
        }
        Ok(())
    }
}
