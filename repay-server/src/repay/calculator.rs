//! Totals across a set of tickets.
//!
//! Totals are always computed from scratch; nothing here keeps state
//! between calls.

use crate::domain::{Money, RepayRate};
use crate::ledger::Ticket;

/// Aggregate cost and compensation for a set of tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    /// Sum of ticket prices
    pub total_cost: Money,
    /// Sum of compensation owed
    pub total_repay: Money,
}

/// Compensation owed for one ticket.
///
/// Zero when the price or fare type is unset, the delay is unknown, or no
/// rate applies. Otherwise the ticket price times the rate's percentage for
/// the ticket's fare type, where a percentage the rate does not offer counts
/// as zero.
pub fn ticket_repay(ticket: &Ticket, delay: Option<f64>, rate: Option<&RepayRate>) -> Money {
    let (Some(price), Some(fare_type), Some(_), Some(rate)) =
        (ticket.price, ticket.fare_type, delay, rate)
    else {
        return Money::ZERO;
    };

    price.share(rate.effective(fare_type))
}

/// Total cost and total compensation for the given tickets.
///
/// # Examples
///
/// ```
/// use repay_server::domain::{FareType, Money, Percentage, RepayRate};
/// use repay_server::ledger::TicketLedger;
/// use repay_server::repay::calculate_totals;
/// use rust_decimal::Decimal;
///
/// let mut ledger = TicketLedger::new();
/// let id = ledger.add();
/// ledger
///     .update(id, Some(FareType::Single), Some(Money::new(Decimal::from(100)).unwrap()))
///     .unwrap();
///
/// let rate = RepayRate::new(Some(Percentage::new(Decimal::new(25, 2)).unwrap()), None, None);
/// let totals = calculate_totals(ledger.list(), Some(20.0), Some(&rate));
///
/// assert_eq!(totals.total_cost.to_string(), "100.00");
/// assert_eq!(totals.total_repay.to_string(), "25.00");
/// ```
pub fn calculate_totals(tickets: &[Ticket], delay: Option<f64>, rate: Option<&RepayRate>) -> Totals {
    tickets.iter().fold(Totals::default(), |mut totals, ticket| {
        totals.total_cost += ticket.cost();
        totals.total_repay += ticket_repay(ticket, delay, rate);
        totals
    })
}
