//! The passenger's tickets.
//!
//! Tickets are kept in the order they were added. Ids are handed out from a
//! counter that only ever moves forward, so a removed ticket's id is never
//! seen again for the lifetime of the ledger.

use std::fmt;

use crate::domain::{FareType, Money};

/// Identifier of a ticket within one ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TicketId(pub u64);

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A purchased ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: TicketId,
    /// `None` until the passenger says how the ticket was bought
    pub fare_type: Option<FareType>,
    /// `None` until the passenger enters a price
    pub price: Option<Money>,
}

impl Ticket {
    /// Price counted towards totals; an unset price counts as zero.
    pub fn cost(&self) -> Money {
        self.price.unwrap_or(Money::ZERO)
    }
}

/// Error returned when a ticket id does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("ticket {0} not found")]
    TicketNotFound(TicketId),
}

/// Ordered collection of tickets.
///
/// # Examples
///
/// ```
/// use repay_server::ledger::TicketLedger;
///
/// let mut ledger = TicketLedger::new();
/// let first = ledger.add();
/// let second = ledger.add();
///
/// ledger.remove(first).unwrap();
/// let third = ledger.add();
///
/// // Ids are never reused
/// assert_ne!(third, first);
/// assert_eq!(ledger.len(), 2);
/// assert_eq!(ledger.list()[0].id, second);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TicketLedger {
    tickets: Vec<Ticket>,
    next_id: u64,
}

impl TicketLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single-fare ticket with no price and return its id.
    pub fn add(&mut self) -> TicketId {
        let id = TicketId(self.next_id);
        self.next_id += 1;
        self.tickets.push(Ticket {
            id,
            fare_type: Some(FareType::Single),
            price: None,
        });
        id
    }

    /// Replace the fare type and price of a ticket.
    pub fn update(
        &mut self,
        id: TicketId,
        fare_type: Option<FareType>,
        price: Option<Money>,
    ) -> Result<(), LedgerError> {
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(LedgerError::TicketNotFound(id))?;
        ticket.fare_type = fare_type;
        ticket.price = price;
        Ok(())
    }

    /// Remove a ticket, returning it.
    pub fn remove(&mut self, id: TicketId) -> Result<Ticket, LedgerError> {
        let pos = self
            .tickets
            .iter()
            .position(|t| t.id == id)
            .ok_or(LedgerError::TicketNotFound(id))?;
        Ok(self.tickets.remove(pos))
    }

    /// Look up a ticket by id.
    pub fn get(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Current tickets in insertion order.
    pub fn list(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Rewrite every ticket of fare type `from` to `to`.
    ///
    /// Returns how many tickets changed.
    pub fn coerce_fare_type(&mut self, from: FareType, to: FareType) -> usize {
        let mut changed = 0;
        for ticket in self.tickets.iter_mut() {
            if ticket.fare_type == Some(from) {
                ticket.fare_type = Some(to);
                changed += 1;
            }
        }
        changed
    }

    /// Sum of ticket prices, unset prices counting as zero.
    pub fn total_cost(&self) -> Money {
        self.tickets.iter().map(Ticket::cost).sum()
    }

    /// Number of tickets.
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Returns true if there are no tickets.
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
