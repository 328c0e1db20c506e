//! Delay brackets and bracket resolution.

use super::{DomainError, RepayRate};

/// A range of delays, with inclusive and optionally open-ended bounds,
/// and the compensation rates that apply within it.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayBracket {
    min: Option<f64>,
    max: Option<f64>,
    rates: Vec<RepayRate>,
}

impl DelayBracket {
    /// Creates a bracket.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a bound is not finite, `min` is negative, or
    /// `min > max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use repay_server::domain::DelayBracket;
    ///
    /// let bracket = DelayBracket::new(Some(15.0), Some(29.0), vec![]).unwrap();
    /// assert!(bracket.contains(15.0));
    /// assert!(bracket.contains(29.0));
    /// assert!(!bracket.contains(30.0));
    ///
    /// assert!(DelayBracket::new(Some(30.0), Some(15.0), vec![]).is_err());
    /// ```
    pub fn new(
        min: Option<f64>,
        max: Option<f64>,
        rates: Vec<RepayRate>,
    ) -> Result<Self, DomainError> {
        if min.is_some_and(|m| !m.is_finite()) || max.is_some_and(|m| !m.is_finite()) {
            return Err(DomainError::NonFiniteBracketBound);
        }
        if let Some(min) = min {
            if min < 0.0 {
                return Err(DomainError::NegativeBracketMin(min));
            }
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(DomainError::InvertedBracket { min, max });
            }
        }

        Ok(Self { min, max, rates })
    }

    /// Inclusive lower bound, if any.
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Inclusive upper bound, if any.
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// The alternative rates offered in this bracket.
    pub fn rates(&self) -> &[RepayRate] {
        &self.rates
    }

    /// Whether a delay falls inside this bracket.
    pub fn contains(&self, delay: f64) -> bool {
        self.min.is_none_or(|min| delay >= min) && self.max.is_none_or(|max| delay <= max)
    }
}

/// Find the bracket that applies to a delay.
///
/// Brackets are scanned in list order and the first one containing the delay
/// wins. This is deliberately not a binary search: when a schedule's ranges
/// overlap, the earliest-listed bracket takes precedence. Negative delays
/// are not filtered out here.
///
/// Returns the bracket's position in the list along with the bracket.
pub fn resolve_bracket(brackets: &[DelayBracket], delay: f64) -> Option<(usize, &DelayBracket)> {
    brackets
        .iter()
        .enumerate()
        .find(|(_, bracket)| bracket.contains(delay))
}
