//! Delay repay resolution.
//!
//! Turns a journey, an operator, a rate choice and a set of tickets into the
//! compensation owed. The pipeline is:
//!
//! timestamps → delay → bracket → active rate → totals
//!
//! `RepaySession` runs the whole pipeline again after every change.

mod calculator;
mod session;

pub use calculator::{Totals, calculate_totals, ticket_repay};
pub use session::{RepaySession, Resolution};

#[cfg(test)]
mod session_tests;
