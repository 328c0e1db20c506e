//! Compensation rates and fare availability.
//!
//! A bracket may offer several alternative rates (for example a statutory
//! scheme and an enhanced one). Which one applies is the passenger's choice,
//! made by index. A rate that omits a percentage for a fare type does not
//! offer compensation for that fare type at all.

use std::fmt;

use super::{Operator, Percentage};

/// How a ticket was bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FareType {
    /// One-way ticket
    Single,
    /// Round-trip ticket
    Return,
}

impl FareType {
    /// Returns the lowercase name used in catalogs and requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            FareType::Single => "single",
            FareType::Return => "return",
        }
    }
}

impl fmt::Display for FareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compensation scheme within a delay bracket.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepayRate {
    /// Fraction repaid on single fares; `None` if singles are not covered
    pub single_percentage: Option<Percentage>,
    /// Fraction repaid on return fares; `None` if returns are not covered
    pub return_percentage: Option<Percentage>,
    /// Free-text description, e.g. the scheme name
    pub note: Option<String>,
}

impl RepayRate {
    /// Creates a rate.
    pub fn new(
        single_percentage: Option<Percentage>,
        return_percentage: Option<Percentage>,
        note: Option<String>,
    ) -> Self {
        Self {
            single_percentage,
            return_percentage,
            note,
        }
    }

    /// The percentage this rate offers for a fare type, if offered.
    pub fn offered(&self, fare_type: FareType) -> Option<Percentage> {
        match fare_type {
            FareType::Single => self.single_percentage,
            FareType::Return => self.return_percentage,
        }
    }

    /// The percentage applied when totalling.
    ///
    /// A fare type the rate does not offer contributes nothing; there is no
    /// fallback to a full refund.
    pub fn effective(&self, fare_type: FareType) -> Percentage {
        self.offered(fare_type).unwrap_or(Percentage::ZERO)
    }
}

/// Error returned when selecting a rate that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The index is past the end of the bracket's rate list
    #[error("rate index {index} out of range: bracket offers {len} rate(s)")]
    RateIndexOutOfRange { index: usize, len: usize },

    /// No bracket applies, so there are no rates to choose between
    #[error("no delay bracket applies, so no rate can be selected")]
    NoActiveBracket,
}

/// Pick the rate at `index`.
///
/// An out-of-range index is rejected rather than clamped, so a stale index
/// can never silently pick some other rate.
pub fn select_rate(rates: &[RepayRate], index: usize) -> Result<&RepayRate, SelectionError> {
    rates.get(index).ok_or(SelectionError::RateIndexOutOfRange {
        index,
        len: rates.len(),
    })
}

/// Which fare types can currently be chosen for tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareAvailability {
    pub single: bool,
    pub return_fare: bool,
}

impl FareAvailability {
    /// Everything allowed; used before an operator is chosen.
    pub const UNRESTRICTED: Self = Self {
        single: true,
        return_fare: true,
    };

    /// Availability for an operator and the currently active rate.
    ///
    /// Returns need operator support, and the active rate (when there is
    /// one) must offer a return percentage. Singles need the active rate to
    /// offer a single percentage.
    pub fn for_selection(operator: Option<&Operator>, rate: Option<&RepayRate>) -> Self {
        let Some(operator) = operator else {
            return Self::UNRESTRICTED;
        };

        Self {
            single: rate.is_none_or(|r| r.single_percentage.is_some()),
            return_fare: operator.supports_return_fare
                && rate.is_none_or(|r| r.return_percentage.is_some()),
        }
    }

    /// Whether tickets may hold the given fare type.
    pub fn allows(&self, fare_type: FareType) -> bool {
        match fare_type {
            FareType::Single => self.single,
            FareType::Return => self.return_fare,
        }
    }
}
