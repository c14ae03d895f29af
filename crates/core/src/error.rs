//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (parsing,
/// validation, arithmetic invariants). Filesystem failures belong to the
/// crates that do the writing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A calculation method outside `{gross, sequential}` was requested.
    #[error("unsupported calculation method: {0:?} (expected \"gross\" or \"sequential\")")]
    UnsupportedMethod(String),

    /// A CSV output mode outside `{single, split, net-only}` was requested.
    #[error("unsupported csv lines mode: {0:?} (expected \"single\", \"split\" or \"net-only\")")]
    UnsupportedCsvMode(String),

    /// A decimal amount or percentage string could not be parsed.
    #[error("invalid numeric input: {0}")]
    InvalidNumericInput(String),

    /// A value was well-formed but not acceptable (e.g. negative gross).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated (e.g. decimal overflow).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod(method.into())
    }

    pub fn unsupported_csv_mode(mode: impl Into<String>) -> Self {
        Self::UnsupportedCsvMode(mode.into())
    }

    pub fn invalid_numeric(msg: impl Into<String>) -> Self {
        Self::InvalidNumericInput(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_method_names_the_offending_value() {
        let err = DomainError::unsupported_method("flat");
        assert_eq!(err, DomainError::UnsupportedMethod("flat".to_string()));
        assert!(err.to_string().contains("\"flat\""));
    }

    #[test]
    fn invalid_numeric_message_is_prefixed() {
        let err = DomainError::invalid_numeric("abc is not a decimal");
        assert_eq!(err.to_string(), "invalid numeric input: abc is not a decimal");
    }
}
