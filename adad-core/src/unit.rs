//! Unit terms and per-dimension unit lists.

use crate::dimension::{Dimension, Exponents};
use crate::error::QuantityResult;
use crate::prefix::Prefix;
use crate::registry;
use core::fmt::{Display, Formatter, Result};
use core::ops::{Index, IndexMut};

/// One `(prefix, symbol, exponent)` contribution to a dimension's unit expression.
///
/// `km^-1` is `UnitTerm { prefix: Kilo, symbol: "m", exponent: -1 }`. The symbol is always a *base* unit symbol;
/// derived units are expanded into base terms before they are stored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnitTerm {
    /// Magnitude prefix.
    pub prefix: Prefix,
    /// Base unit symbol, without prefix.
    pub symbol: String,
    /// Signed integer power.
    pub exponent: i32,
}

impl UnitTerm {
    /// Creates a term.
    pub fn new(prefix: Prefix, symbol: impl Into<String>, exponent: i32) -> Self {
        Self {
            prefix,
            symbol: symbol.into(),
            exponent,
        }
    }

    /// Creates an unprefixed term.
    pub fn plain(symbol: impl Into<String>, exponent: i32) -> Self {
        Self::new(Prefix::None, symbol, exponent)
    }

    /// Same prefix and symbol with a different exponent.
    pub fn with_exponent(&self, exponent: i32) -> Self {
        Self {
            exponent,
            ..self.clone()
        }
    }

    /// `true` when both terms name the same prefixed unit, whatever their exponents.
    #[inline]
    pub fn same_unit(&self, other: &UnitTerm) -> bool {
        self.prefix == other.prefix && self.symbol == other.symbol
    }

    /// Prefixed symbol, e.g. `"km"`.
    pub fn prefixed_symbol(&self) -> String {
        format!("{}{}", self.prefix, self.symbol)
    }

    /// Factor converting this term into the reference unit of its dimension, raised to the exponent.
    ///
    /// Looks the symbol up in the process-wide registry; see
    /// [`UnitRegistry::conversion_factor`](crate::UnitRegistry::conversion_factor).
    ///
    /// ```rust
    /// use adad_core::{Prefix, UnitTerm};
    ///
    /// let per_km = UnitTerm::new(Prefix::Kilo, "m", -1);
    /// assert_eq!(per_km.conversion_factor().unwrap(), 1e-3);
    /// ```
    pub fn conversion_factor(&self) -> QuantityResult<f64> {
        registry::global().conversion_factor(self)
    }
}

/// Renders `km`, `Mpc^-1`, `s^-2`: the prefix is omitted when absent and the exponent when it equals 1.
impl Display for UnitTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}{}", self.prefix, self.symbol)?;
        if self.exponent != 1 {
            write!(f, "^{}", self.exponent)?;
        }
        Ok(())
    }
}

/// Unit terms of a quantity, one ordered list per [`Dimension`].
///
/// A list may hold several terms for the same dimension (e.g. `km m^-1` before simplification); an empty list means
/// the quantity does not involve that dimension.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Units([Vec<UnitTerm>; Dimension::COUNT]);

impl Units {
    /// Creates an empty (dimensionless) unit set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a term to a dimension's list.
    pub fn push(&mut self, dim: Dimension, term: UnitTerm) {
        self.0[dim.index()].push(term);
    }

    /// Iterates `(dimension, terms)` in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &[UnitTerm])> + '_ {
        Dimension::ALL
            .into_iter()
            .map(move |dim| (dim, self.0[dim.index()].as_slice()))
    }

    /// Iterates every term together with its dimension.
    pub fn terms(&self) -> impl Iterator<Item = (Dimension, &UnitTerm)> + '_ {
        self.iter()
            .flat_map(|(dim, terms)| terms.iter().map(move |t| (dim, t)))
    }

    /// Sum of the exponents attached to one dimension.
    pub fn net_exponent(&self, dim: Dimension) -> i32 {
        self.0[dim.index()].iter().map(|t| t.exponent).sum()
    }

    /// Net exponents over every dimension.
    pub fn exponents(&self) -> Exponents {
        Exponents(Dimension::ALL.map(|dim| self.net_exponent(dim)))
    }

    /// `true` when no dimension has any term attached.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Vec::is_empty)
    }

    /// Multiplies every exponent by `n`.
    pub(crate) fn scale_exponents(&mut self, n: i32) {
        for terms in self.0.iter_mut() {
            for term in terms.iter_mut() {
                term.exponent *= n;
            }
        }
    }
}

impl Index<Dimension> for Units {
    type Output = Vec<UnitTerm>;

    #[inline]
    fn index(&self, dim: Dimension) -> &Vec<UnitTerm> {
        &self.0[dim.index()]
    }
}

impl IndexMut<Dimension> for Units {
    #[inline]
    fn index_mut(&mut self, dim: Dimension) -> &mut Vec<UnitTerm> {
        &mut self.0[dim.index()]
    }
}

/// Space-separated terms in dimension order; empty for a dimensionless unit set.
impl Display for Units {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut first = true;
        for (_, term) in self.terms() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", term)?;
            first = false;
        }
        Ok(())
    }
}
