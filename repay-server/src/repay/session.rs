//! A single passenger's claim in progress.
//!
//! The session owns every input to the calculation. Each mutating method
//! finishes by calling `recompute`, which rebuilds the derived state from
//! scratch, so readers never see a mix of old and new values.
//!
//! Return tickets are switched to single only when the selection moves:
//! a new operator, a new rate choice, or a delay edit that lands in a
//! different bracket. Editing a ticket never rewrites its fare type.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    DelayBand, DelayBracket, FareAvailability, FareType, Journey, Money, Operator, RepayRate,
    SelectionError, Timestamp, select_rate,
};
use crate::ledger::{LedgerError, Ticket, TicketId, TicketLedger};

use super::calculator::{Totals, calculate_totals};

/// Derived state, rebuilt after every change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Signed delay in minutes, if both arrivals are known
    pub delay_minutes: Option<f64>,
    /// Position of the matching bracket in the operator's schedule
    pub bracket_index: Option<usize>,
    /// Which fare types tickets may use
    pub availability: FareAvailability,
    /// Cost and compensation across all tickets
    pub totals: Totals,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            delay_minutes: None,
            bracket_index: None,
            availability: FareAvailability::UNRESTRICTED,
            totals: Totals::default(),
        }
    }
}

/// Inputs and results of one delay repay calculation.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use repay_server::domain::{DelayBracket, FareType, Money, Operator, Percentage, RepayRate, Timestamp};
/// use repay_server::repay::RepaySession;
/// use rust_decimal::Decimal;
///
/// let rate = RepayRate::new(
///     Some(Percentage::new(Decimal::new(25, 2)).unwrap()),
///     Some(Percentage::new(Decimal::new(125, 3)).unwrap()),
///     Some("Standard".into()),
/// );
/// let bracket = DelayBracket::new(Some(15.0), Some(29.0), vec![rate]).unwrap();
/// let operator = Arc::new(Operator::new("Example Rail", true, vec![bracket]).unwrap());
///
/// let mut session = RepaySession::new();
/// session.select_operator(Some(operator));
/// session.set_expected(Timestamp::parse("2024-03-15", "10:00").ok());
/// session.set_actual(Timestamp::parse("2024-03-15", "10:20").ok());
///
/// let id = session.add_ticket();
/// session
///     .update_ticket(id, Some(FareType::Single), Some(Money::new(Decimal::from(100)).unwrap()))
///     .unwrap();
///
/// assert_eq!(session.totals().total_repay.to_string(), "25.00");
/// assert_eq!(session.totals().total_cost.to_string(), "100.00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RepaySession {
    operator: Option<Arc<Operator>>,
    journey: Journey,
    rate_index: usize,
    /// Bracket the rate index was last resolved against
    rate_bracket: Option<usize>,
    ledger: TicketLedger,
    resolution: Resolution,
}

impl RepaySession {
    /// Create an empty session: no operator, no arrivals, no tickets.
    pub fn new() -> Self {
        Self::default()
    }

    // Mutations

    /// Choose the operator whose schedule applies, or clear it.
    ///
    /// The rate choice goes back to the first rate, since indices from one
    /// operator's schedule mean nothing in another's.
    pub fn select_operator(&mut self, operator: Option<Arc<Operator>>) {
        self.operator = operator;
        self.rate_index = 0;
        self.rate_bracket = None;
        self.recompute(true);
    }

    /// Choose among the active bracket's rates.
    ///
    /// Index 0 is the default choice and is always accepted, even when no
    /// bracket applies or the bracket offers no rates.
    ///
    /// # Errors
    ///
    /// Rejects any other index, leaving the session unchanged, if no
    /// bracket applies or the index is past the end of the bracket's rates.
    pub fn select_rate_index(&mut self, index: usize) -> Result<(), SelectionError> {
        if index != 0 {
            let bracket = self
                .active_bracket()
                .ok_or(SelectionError::NoActiveBracket)?;
            select_rate(bracket.rates(), index)?;
        }

        self.rate_index = index;
        self.recompute(true);
        Ok(())
    }

    /// Replace the expected arrival.
    pub fn set_expected(&mut self, expected: Option<Timestamp>) {
        self.journey = self.journey.with_expected(expected);
        self.recompute(false);
    }

    /// Replace the actual arrival.
    pub fn set_actual(&mut self, actual: Option<Timestamp>) {
        self.journey = self.journey.with_actual(actual);
        self.recompute(false);
    }

    /// Replace both arrivals at once.
    pub fn set_journey(&mut self, journey: Journey) {
        self.journey = journey;
        self.recompute(false);
    }

    /// Add a new single-fare ticket with no price.
    pub fn add_ticket(&mut self) -> TicketId {
        let id = self.ledger.add();
        self.recompute(false);
        id
    }

    /// Replace a ticket's fare type and price.
    ///
    /// The fare type is stored as given. A return ticket under a rate with
    /// no return percentage earns nothing until the selection changes.
    pub fn update_ticket(
        &mut self,
        id: TicketId,
        fare_type: Option<FareType>,
        price: Option<Money>,
    ) -> Result<(), LedgerError> {
        self.ledger.update(id, fare_type, price)?;
        self.recompute(false);
        Ok(())
    }

    /// Remove a ticket.
    pub fn remove_ticket(&mut self, id: TicketId) -> Result<Ticket, LedgerError> {
        let ticket = self.ledger.remove(id)?;
        self.recompute(false);
        Ok(ticket)
    }

    // Reads

    /// The selected operator.
    pub fn operator(&self) -> Option<&Arc<Operator>> {
        self.operator.as_ref()
    }

    /// The current arrivals.
    pub fn journey(&self) -> Journey {
        self.journey
    }

    /// Signed delay in minutes, if both arrivals are known.
    pub fn delay_minutes(&self) -> Option<f64> {
        self.resolution.delay_minutes
    }

    /// Display band for the delay.
    pub fn delay_band(&self) -> Option<DelayBand> {
        self.resolution.delay_minutes.map(DelayBand::from_minutes)
    }

    /// The bracket the delay falls into.
    pub fn active_bracket(&self) -> Option<&DelayBracket> {
        let operator = self.operator.as_deref()?;
        operator.brackets().get(self.resolution.bracket_index?)
    }

    /// The selected rate within the active bracket.
    pub fn active_rate(&self) -> Option<&RepayRate> {
        self.active_bracket()?.rates().get(self.rate_index)
    }

    /// The selected rate index.
    pub fn rate_index(&self) -> usize {
        self.rate_index
    }

    /// Which fare types tickets may use right now.
    pub fn availability(&self) -> FareAvailability {
        self.resolution.availability
    }

    /// Tickets in the order they were added.
    pub fn tickets(&self) -> &[Ticket] {
        self.ledger.list()
    }

    /// Total cost and total compensation.
    pub fn totals(&self) -> Totals {
        self.resolution.totals
    }

    /// All derived state at once.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Rebuild all derived state from the current inputs.
    ///
    /// `selection_changed` marks an operator or rate choice. Together with a
    /// change of bracket it triggers normalisation: while returns are
    /// unavailable no ticket may stay marked as a return.
    fn recompute(&mut self, selection_changed: bool) {
        let operator = self.operator.as_deref();
        let delay = self.journey.delay_minutes();

        let bracket = operator
            .zip(delay)
            .and_then(|(op, delay)| op.resolve(delay));
        let bracket_index = bracket.map(|(i, _)| i);
        let mut normalise =
            selection_changed || bracket_index != self.resolution.bracket_index;

        if let Some((index, bracket)) = bracket {
            let moved = self.rate_bracket.is_some_and(|prev| prev != index);
            if self.rate_index != 0 && (moved || self.rate_index >= bracket.rates().len()) {
                debug!(
                    stale_index = self.rate_index,
                    bracket = index,
                    rates = bracket.rates().len(),
                    "Rate index chosen for another bracket, resetting"
                );
                self.rate_index = 0;
                normalise = true;
            }
            self.rate_bracket = Some(index);
        }
        let rate = bracket.and_then(|(_, b)| b.rates().get(self.rate_index));

        let availability = FareAvailability::for_selection(operator, rate);
        if normalise && !availability.return_fare {
            let coerced = self
                .ledger
                .coerce_fare_type(FareType::Return, FareType::Single);
            if coerced > 0 {
                debug!(coerced, "Return fares unavailable, switched tickets to single");
            }
        }

        let totals = calculate_totals(self.ledger.list(), delay, rate);

        debug!(
            operator = operator.map(|op| op.name.as_str()),
            delay,
            bracket = bracket_index,
            rate_index = self.rate_index,
            total_cost = %totals.total_cost,
            total_repay = %totals.total_repay,
            "Recomputed repay"
        );

        self.resolution = Resolution {
            delay_minutes: delay,
            bracket_index,
            availability,
            totals,
        };
    }
}
