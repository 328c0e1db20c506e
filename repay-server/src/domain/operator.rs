//! Train operators and their compensation schedules.

use std::fmt;

use super::{DelayBracket, DomainError, resolve_bracket};

/// A train operating company and its delay repay schedule.
///
/// Operators are loaded once from the catalog and never change afterwards.
///
/// # Examples
///
/// ```
/// use repay_server::domain::{DelayBracket, Operator};
///
/// let brackets = vec![
///     DelayBracket::new(Some(15.0), Some(29.0), vec![]).unwrap(),
///     DelayBracket::new(Some(30.0), None, vec![]).unwrap(),
/// ];
/// let op = Operator::new("Great Western Railway", true, brackets).unwrap();
///
/// assert_eq!(op.resolve(20.0).map(|(i, _)| i), Some(0));
/// assert_eq!(op.resolve(45.0).map(|(i, _)| i), Some(1));
/// assert!(op.resolve(5.0).is_none());
///
/// // Names must not be blank
/// assert!(Operator::new("  ", true, vec![]).is_err());
/// ```
#[derive(Clone, PartialEq)]
pub struct Operator {
    /// Display name; unique within a catalog
    pub name: String,
    /// Whether the operator compensates return fares at all
    pub supports_return_fare: bool,
    brackets: Vec<DelayBracket>,
}

impl Operator {
    /// Creates an operator, rejecting blank names.
    pub fn new(
        name: impl Into<String>,
        supports_return_fare: bool,
        brackets: Vec<DelayBracket>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyOperatorName);
        }

        Ok(Self {
            name,
            supports_return_fare,
            brackets,
        })
    }

    /// The brackets in the order they were authored.
    pub fn brackets(&self) -> &[DelayBracket] {
        &self.brackets
    }

    /// Find the bracket for a delay, first listed match wins.
    pub fn resolve(&self, delay: f64) -> Option<(usize, &DelayBracket)> {
        resolve_bracket(&self.brackets, delay)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Operator({}, {} bracket(s))",
            self.name,
            self.brackets.len()
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
