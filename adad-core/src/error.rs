//! Error types for quantity arithmetic and registry configuration.

/// Result type for quantity operations
pub type QuantityResult<T> = Result<T, QuantityError>;

/// Result type for registry construction and installation
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Error type for quantity operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuantityError {
    /// A symbol is not registered as a base or derived unit.
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Uncertainty was given with a value count other than 0, 1 or 2.
    #[error("Invalid uncertainty: expected 0, 1 or 2 values, got {0}")]
    InvalidUncertainty(usize),

    /// Operands of an addition differ in at least one net exponent.
    #[error("Dimension mismatch: [{left}] vs [{right}]")]
    DimensionMismatch {
        /// Net exponents of the left operand.
        left: String,
        /// Net exponents of the right operand.
        right: String,
    },

    /// An [`Operand`](crate::Operand) that is neither a scalar nor a quantity.
    #[error("Unsupported operand: {0}")]
    UnsupportedOperand(String),
}

/// Error type for unit registry configuration
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A symbol is registered twice.
    #[error("Duplicate unit symbol: {0}")]
    DuplicateUnit(String),

    /// A base unit factor is zero, negative or not finite.
    #[error("Invalid conversion factor {factor} for unit {symbol}")]
    InvalidFactor {
        /// Offending unit symbol.
        symbol: String,
        /// Rejected factor.
        factor: f64,
    },

    /// A derived unit decomposes into a symbol the registry cannot resolve.
    #[error("Derived unit {derived} refers to unknown unit {symbol}")]
    UnresolvedTerm {
        /// Derived unit being registered.
        derived: String,
        /// Term symbol that failed to resolve.
        symbol: String,
    },

    /// [`install`](crate::registry::install) was called after the process-wide registry was set.
    #[error("A unit registry has already been installed")]
    AlreadyInstalled,
}

impl From<String> for RegistryError {
    fn from(s: String) -> Self {
        RegistryError::ConfigurationError(s)
    }
}
