//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{debug, warn};

use crate::catalog::OperatorCatalog;
use crate::domain::{DomainError, Journey, Money, SelectionError};
use crate::ledger::LedgerError;
use crate::repay::{RepaySession, ticket_repay};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/operators", get(list_operators))
        .route("/repay/calculate", post(calculate))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List operators and their schedules.
async fn list_operators(State(state): State<AppState>) -> Json<OperatorsResponse> {
    let operators = state
        .catalog
        .operators()
        .iter()
        .map(|op| OperatorResult::from_operator(op))
        .collect();

    Json(OperatorsResponse { operators })
}

/// Calculate compensation for a journey.
async fn calculate(
    State(state): State<AppState>,
    Json(req): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, AppError> {
    run_calculation(&state.catalog, &req).map(Json)
}

/// Replay a request through a fresh session and report the outcome.
///
/// Tickets go in first, then the operator, the arrivals and finally the
/// rate choice. Return tickets are normalised against the selection as it
/// settles, so the response shows the fare types a passenger could actually
/// have chosen. A rate choice is ignored when no bracket applies.
pub fn run_calculation(
    catalog: &OperatorCatalog,
    req: &CalculateRequest,
) -> Result<CalculateResponse, AppError> {
    let mut session = RepaySession::new();

    for input in &req.tickets {
        let price = input.price.map(Money::new).transpose()?;
        let id = session.add_ticket();
        session.update_ticket(id, input.fare_type.map(Into::into), price)?;
    }

    if let Some(name) = &req.operator {
        let operator = catalog.get(name).ok_or_else(|| AppError::BadRequest {
            message: format!("Unknown operator: {}", name),
        })?;
        session.select_operator(Some(operator));
    }

    let expected = req.expected_arrival.as_ref().and_then(TimestampInput::parse);
    let actual = req.actual_arrival.as_ref().and_then(TimestampInput::parse);
    if req.expected_arrival.is_some() && expected.is_none() {
        debug!("Ignoring invalid expected arrival");
    }
    if req.actual_arrival.is_some() && actual.is_none() {
        debug!("Ignoring invalid actual arrival");
    }
    session.set_journey(Journey::new(expected, actual));

    match req.rate_index {
        Some(index) if session.active_bracket().is_some() => {
            session.select_rate_index(index)?;
        }
        Some(index) => debug!(index, "No bracket applies, ignoring rate choice"),
        None => {}
    }

    Ok(build_response(&session))
}

fn build_response(session: &RepaySession) -> CalculateResponse {
    let delay = session.delay_minutes();
    let rate = session.active_rate();
    let totals = session.totals();

    let tickets = session
        .tickets()
        .iter()
        .map(|t| TicketResult::from_ticket(t, ticket_repay(t, delay, rate)))
        .collect();

    CalculateResponse {
        operator: session.operator().map(|op| op.name.clone()),
        delay_minutes: delay,
        delay_band: session.delay_band().map(|b| b.label().to_string()),
        bracket: session.active_bracket().map(BracketResult::from_bracket),
        rate_index: session.rate_index(),
        active_rate: rate.map(RateResult::from_rate),
        availability: session.availability().into(),
        tickets,
        total_cost: totals.total_cost.round_to_pence().to_string(),
        total_repay: totals.total_repay.round_to_pence().to_string(),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<SelectionError> for AppError {
    fn from(e: SelectionError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(status = %status, error = %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
