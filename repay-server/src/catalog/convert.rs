//! Conversion from catalog DTOs to domain types.

use crate::domain::{DelayBracket, DomainError, Operator, Percentage, RepayRate};

use super::error::CatalogError;
use super::types::{BracketEntry, OperatorEntry, RateEntry};

/// Convert one catalog entry into a validated operator.
pub fn convert_operator(entry: &OperatorEntry) -> Result<Operator, CatalogError> {
    build_operator(entry).map_err(|source| CatalogError::InvalidOperator {
        operator: entry.name.clone(),
        source,
    })
}

fn build_operator(entry: &OperatorEntry) -> Result<Operator, DomainError> {
    let brackets = entry
        .brackets
        .iter()
        .map(convert_bracket)
        .collect::<Result<Vec<_>, _>>()?;

    Operator::new(entry.name.clone(), entry.supports_return_fare, brackets)
}

fn convert_bracket(entry: &BracketEntry) -> Result<DelayBracket, DomainError> {
    let rates = entry
        .rates
        .iter()
        .map(convert_rate)
        .collect::<Result<Vec<_>, _>>()?;

    DelayBracket::new(entry.min, entry.max, rates)
}

fn convert_rate(entry: &RateEntry) -> Result<RepayRate, DomainError> {
    Ok(RepayRate::new(
        entry.single.map(Percentage::new).transpose()?,
        entry.return_fare.map(Percentage::new).transpose()?,
        entry.note.clone(),
    ))
}
