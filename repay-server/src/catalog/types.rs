//! Catalog file DTOs.
//!
//! These types map directly onto the catalog JSON. Optional fields are
//! meaningful: an absent percentage means the fare type is not covered, and
//! an absent bound means the bracket is open-ended on that side.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Top-level catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub operators: Vec<OperatorEntry>,
}

/// One operator's schedule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorEntry {
    /// Display name, unique within the catalog
    pub name: String,

    /// Whether return fares are compensated
    #[serde(default)]
    pub supports_return_fare: bool,

    /// Brackets in precedence order
    #[serde(default)]
    pub brackets: Vec<BracketEntry>,
}

/// A delay bracket.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketEntry {
    /// Inclusive lower bound in minutes
    pub min: Option<f64>,

    /// Inclusive upper bound in minutes
    pub max: Option<f64>,

    /// Alternative rates, in display order
    #[serde(default)]
    pub rates: Vec<RateEntry>,
}

/// A compensation rate.
#[derive(Debug, Clone, Deserialize)]
pub struct RateEntry {
    /// Fraction repaid on single fares
    pub single: Option<Decimal>,

    /// Fraction repaid on return fares
    #[serde(rename = "return")]
    pub return_fare: Option<Decimal>,

    /// Scheme description
    pub note: Option<String>,
}
