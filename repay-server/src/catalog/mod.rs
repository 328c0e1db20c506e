//! Operator compensation catalog.
//!
//! Loads operator schedules from a JSON document, validates them into domain
//! types, and keeps them sorted by name for display. The catalog is read once
//! at startup and shared read-only afterwards.

mod convert;
mod error;
mod types;

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::domain::Operator;

pub use convert::convert_operator;
pub use error::CatalogError;
pub use types::{BracketEntry, CatalogFile, OperatorEntry, RateEntry};

/// Validated operators, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct OperatorCatalog {
    operators: Vec<Arc<Operator>>,
}

impl OperatorCatalog {
    /// Build a catalog from operators, sorting them by name.
    ///
    /// # Errors
    ///
    /// Returns `Err` if two operators share a name.
    pub fn new(operators: Vec<Operator>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for op in &operators {
            if !seen.insert(op.name.as_str()) {
                return Err(CatalogError::DuplicateOperator(op.name.clone()));
            }
        }

        let mut operators: Vec<Arc<Operator>> = operators.into_iter().map(Arc::new).collect();
        operators.sort_by(|a, b| compare_names(&a.name, &b.name));

        Ok(Self { operators })
    }

    /// Parse and validate a catalog from JSON text.
    ///
    /// # Examples
    ///
    /// ```
    /// use repay_server::catalog::OperatorCatalog;
    ///
    /// let json = r#"{"operators": [
    ///     {"name": "southern", "brackets": []},
    ///     {"name": "Avanti West Coast", "supportsReturnFare": true, "brackets": []}
    /// ]}"#;
    ///
    /// let catalog = OperatorCatalog::from_json(json).unwrap();
    /// let names: Vec<_> = catalog.operators().iter().map(|o| o.name.as_str()).collect();
    /// assert_eq!(names, vec!["Avanti West Coast", "southern"]);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let operators = file
            .operators
            .iter()
            .map(convert_operator)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(operators)
    }

    /// Read, parse and validate a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            operators = catalog.len(),
            "Loaded operator catalog"
        );
        Ok(catalog)
    }

    /// All operators, sorted by name.
    pub fn operators(&self) -> &[Arc<Operator>] {
        &self.operators
    }

    /// Look up an operator by its exact name.
    pub fn get(&self, name: &str) -> Option<Arc<Operator>> {
        self.operators.iter().find(|op| op.name == name).cloned()
    }

    /// Number of operators.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Returns true if the catalog has no operators.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

/// Case-insensitive name order, falling back to the raw names so the order
/// is total.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
