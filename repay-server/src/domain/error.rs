//! Domain error types.
//!
//! These errors represent validation failures when building domain values
//! from untrusted input. They are distinct from catalog/IO errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A percentage outside the `[0, 1]` range
    #[error("invalid percentage {0}: must be between 0 and 1")]
    InvalidPercentage(String),

    /// A monetary amount below zero
    #[error("invalid amount {0}: must not be negative")]
    NegativeAmount(String),

    /// A monetary amount above the accepted maximum
    #[error("invalid amount {0}: must not exceed 1000000000")]
    AmountTooLarge(String),

    /// A bracket lower bound below zero
    #[error("invalid bracket: lower bound {0} is negative")]
    NegativeBracketMin(f64),

    /// A bracket whose lower bound exceeds its upper bound
    #[error("invalid bracket: lower bound {min} exceeds upper bound {max}")]
    InvertedBracket { min: f64, max: f64 },

    /// A bracket bound that is NaN or infinite
    #[error("invalid bracket: bounds must be finite")]
    NonFiniteBracketBound,

    /// An operator with an empty or whitespace-only name
    #[error("operator name must not be empty")]
    EmptyOperatorName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidPercentage("1.5".into());
        assert_eq!(
            err.to_string(),
            "invalid percentage 1.5: must be between 0 and 1"
        );

        let err = DomainError::NegativeAmount("-3.00".into());
        assert_eq!(err.to_string(), "invalid amount -3.00: must not be negative");

        let err = DomainError::AmountTooLarge("2000000000".into());
        assert_eq!(
            err.to_string(),
            "invalid amount 2000000000: must not exceed 1000000000"
        );

        let err = DomainError::NegativeBracketMin(-1.0);
        assert_eq!(err.to_string(), "invalid bracket: lower bound -1 is negative");

        let err = DomainError::InvertedBracket {
            min: 30.0,
            max: 15.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid bracket: lower bound 30 exceeds upper bound 15"
        );

        let err = DomainError::EmptyOperatorName;
        assert_eq!(err.to_string(), "operator name must not be empty");
    }
}
