//! Web layer for the delay repay calculator.
//!
//! Provides HTTP endpoints for listing operators and calculating
//! compensation. Requests are stateless: each one is replayed through a
//! fresh `RepaySession`.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router, run_calculation};
pub use state::AppState;
