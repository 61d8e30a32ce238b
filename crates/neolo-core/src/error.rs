//! Error types for neolo-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by the numeric core (sieve, factorials, estimators).
///
/// Every degenerate input is reported through one of these variants rather
/// than being coerced to zero, NaN, or infinity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// An argument fell outside the operation's domain.
    #[error("invalid argument to {operation}: {reason}")]
    InvalidArgument {
        /// The operation that rejected its input.
        operation: &'static str,
        /// What was wrong with the input.
        reason: String,
    },

    /// A ratio had nothing to divide by.
    #[error("division by zero in {operation}: {reason}")]
    DivisionByZero {
        /// The operation whose denominator was zero.
        operation: &'static str,
        /// Which quantity was zero.
        reason: String,
    },
}

impl StatsError {
    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    pub(crate) fn div_zero(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::DivisionByZero {
            operation,
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`StatsError::InvalidArgument`].
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` for [`StatsError::DivisionByZero`].
    pub const fn is_division_by_zero(&self) -> bool {
        matches!(self, Self::DivisionByZero { .. })
    }
}

/// Result type alias using [`StatsError`].
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that can occur during text analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input text is empty or has no tokens.
    #[error("no tokens in input")]
    EmptyInput,

    /// A statistic could not be computed.
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// An unknown check name was provided.
    #[error("unknown check: {name}. Use: {available}")]
    UnknownCheck {
        /// The check name that was requested.
        name: String,
        /// Comma-separated list of available check names.
        available: String,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
