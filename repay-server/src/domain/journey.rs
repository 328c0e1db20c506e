//! Journey timing.
//!
//! A `Journey` holds the expected and actual arrival of one trip. Either may
//! be missing while the passenger is still filling them in.

use super::{DelayBand, Timestamp, delay_minutes};

/// Expected and actual arrival of a single trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Journey {
    /// When the train was timetabled to arrive
    pub expected_arrival: Option<Timestamp>,
    /// When the train actually arrived
    pub actual_arrival: Option<Timestamp>,
}

impl Journey {
    /// Creates a journey from optional arrival timestamps.
    pub fn new(expected_arrival: Option<Timestamp>, actual_arrival: Option<Timestamp>) -> Self {
        Self {
            expected_arrival,
            actual_arrival,
        }
    }

    /// Returns a copy with the expected arrival replaced.
    pub fn with_expected(self, expected_arrival: Option<Timestamp>) -> Self {
        Self {
            expected_arrival,
            ..self
        }
    }

    /// Returns a copy with the actual arrival replaced.
    pub fn with_actual(self, actual_arrival: Option<Timestamp>) -> Self {
        Self {
            actual_arrival,
            ..self
        }
    }

    /// Signed delay in minutes, or `None` if either arrival is unknown.
    pub fn delay_minutes(&self) -> Option<f64> {
        delay_minutes(self.expected_arrival, self.actual_arrival)
    }

    /// Display band for the delay, if the delay is known.
    pub fn delay_band(&self) -> Option<DelayBand> {
        self.delay_minutes().map(DelayBand::from_minutes)
    }
}
