//! Data transfer objects for web requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{DelayBracket, FareAvailability, FareType, Money, Operator, RepayRate, Timestamp};
use crate::ledger::Ticket;

/// Fare type as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FareTypeDto {
    Single,
    Return,
}

impl From<FareTypeDto> for FareType {
    fn from(dto: FareTypeDto) -> Self {
        match dto {
            FareTypeDto::Single => FareType::Single,
            FareTypeDto::Return => FareType::Return,
        }
    }
}

impl From<FareType> for FareTypeDto {
    fn from(fare_type: FareType) -> Self {
        match fare_type {
            FareType::Single => FareTypeDto::Single,
            FareType::Return => FareTypeDto::Return,
        }
    }
}

/// A date and time as typed by the passenger.
#[derive(Debug, Clone, Deserialize)]
pub struct TimestampInput {
    /// Date in YYYY-MM-DD format
    pub date: String,

    /// Time in HH:MM or HHMM format
    pub time: String,
}

impl TimestampInput {
    /// Parse into a timestamp. Invalid input counts as no timestamp.
    pub fn parse(&self) -> Option<Timestamp> {
        Timestamp::parse(&self.date, &self.time).ok()
    }
}

/// A ticket in a calculation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketInput {
    /// How the ticket was bought
    pub fare_type: Option<FareTypeDto>,

    /// Price paid
    pub price: Option<Decimal>,
}

/// Request to calculate compensation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// Operator name, exactly as listed by `/operators`
    pub operator: Option<String>,

    /// Timetabled arrival
    pub expected_arrival: Option<TimestampInput>,

    /// Actual arrival
    pub actual_arrival: Option<TimestampInput>,

    /// Which of the bracket's rates to use (defaults to the first)
    pub rate_index: Option<usize>,

    /// Tickets bought for the journey
    #[serde(default)]
    pub tickets: Vec<TicketInput>,
}

/// A compensation rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateResult {
    /// Fraction repaid on single fares
    pub single: Option<Decimal>,

    /// Fraction repaid on return fares
    #[serde(rename = "return")]
    pub return_fare: Option<Decimal>,

    /// Scheme description
    pub note: Option<String>,
}

/// A delay bracket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketResult {
    /// Inclusive lower bound in minutes
    pub min: Option<f64>,

    /// Inclusive upper bound in minutes
    pub max: Option<f64>,

    /// Rates on offer
    pub rates: Vec<RateResult>,
}

/// An operator and its schedule.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorResult {
    pub name: String,
    pub supports_return_fare: bool,
    pub brackets: Vec<BracketResult>,
}

/// Response listing operators.
#[derive(Debug, Serialize)]
pub struct OperatorsResponse {
    /// Operators sorted by name
    pub operators: Vec<OperatorResult>,
}

/// Fare types tickets may currently use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilityResult {
    pub single: bool,
    #[serde(rename = "return")]
    pub return_fare: bool,
}

/// A ticket after normalisation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResult {
    /// Ticket id within this calculation
    pub id: u64,

    /// Fare type, possibly switched to single
    pub fare_type: Option<FareTypeDto>,

    /// Price paid, formatted to two places
    pub price: Option<String>,

    /// Compensation for this ticket, formatted to two places
    pub repay: String,
}

/// Response for a calculation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    /// Selected operator
    pub operator: Option<String>,

    /// Signed delay in minutes
    pub delay_minutes: Option<f64>,

    /// Human-readable delay band
    pub delay_band: Option<String>,

    /// Matched bracket
    pub bracket: Option<BracketResult>,

    /// Selected rate index
    pub rate_index: usize,

    /// Rate in force
    pub active_rate: Option<RateResult>,

    /// Fare types currently allowed
    pub availability: AvailabilityResult,

    /// Tickets in the order given
    pub tickets: Vec<TicketResult>,

    /// Sum of prices, formatted to two places
    pub total_cost: String,

    /// Sum of compensation, formatted to two places
    pub total_repay: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl RateResult {
    /// Create from a domain RepayRate.
    pub fn from_rate(rate: &RepayRate) -> Self {
        Self {
            single: rate.single_percentage.map(|p| p.value()),
            return_fare: rate.return_percentage.map(|p| p.value()),
            note: rate.note.clone(),
        }
    }
}

impl BracketResult {
    /// Create from a domain DelayBracket.
    pub fn from_bracket(bracket: &DelayBracket) -> Self {
        Self {
            min: bracket.min(),
            max: bracket.max(),
            rates: bracket.rates().iter().map(RateResult::from_rate).collect(),
        }
    }
}

impl OperatorResult {
    /// Create from a domain Operator.
    pub fn from_operator(operator: &Operator) -> Self {
        Self {
            name: operator.name.clone(),
            supports_return_fare: operator.supports_return_fare,
            brackets: operator
                .brackets()
                .iter()
                .map(BracketResult::from_bracket)
                .collect(),
        }
    }
}

impl From<FareAvailability> for AvailabilityResult {
    fn from(availability: FareAvailability) -> Self {
        Self {
            single: availability.single,
            return_fare: availability.return_fare,
        }
    }
}

impl TicketResult {
    /// Create from a domain Ticket and the repay it earns.
    pub fn from_ticket(ticket: &Ticket, repay: Money) -> Self {
        Self {
            id: ticket.id.0,
            fare_type: ticket.fare_type.map(FareTypeDto::from),
            price: ticket.price.map(|p| p.to_string()),
            repay: repay.to_string(),
        }
    }
}
