//! Domain types for the delay repay calculator.
//!
//! This module contains the validated building blocks of a compensation
//! claim: timestamps, operators with their bracket schedules, rates, and
//! money. Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod bracket;
mod error;
mod journey;
mod money;
mod operator;
mod rate;
mod time;

pub use bracket::{DelayBracket, resolve_bracket};
pub use error::DomainError;
pub use journey::Journey;
pub use money::{Money, Percentage};
pub use operator::Operator;
pub use rate::{FareAvailability, FareType, RepayRate, SelectionError, select_rate};
pub use time::{DelayBand, TimeError, Timestamp, delay_minutes};
