//! Scenario tests for `RepaySession`.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::domain::{
    DelayBracket, FareType, Money, Operator, Percentage, RepayRate, SelectionError, Timestamp,
};
use crate::ledger::{LedgerError, TicketId};

fn ts(time: &str) -> Option<Timestamp> {
    Some(Timestamp::parse("2024-03-15", time).unwrap())
}

fn pct(d: Decimal) -> Option<Percentage> {
    Some(Percentage::new(d).unwrap())
}

fn money(d: Decimal) -> Option<Money> {
    Some(Money::new(d).unwrap())
}

fn rate(single: Option<Decimal>, ret: Option<Decimal>, note: &str) -> RepayRate {
    RepayRate::new(
        single.and_then(pct),
        ret.and_then(pct),
        Some(note.to_string()),
    )
}

fn bracket(min: Option<f64>, max: Option<f64>, rates: Vec<RepayRate>) -> DelayBracket {
    DelayBracket::new(min, max, rates).unwrap()
}

/// A typical schedule: nothing under 15 minutes, then widening brackets.
fn standard_operator(supports_return_fare: bool) -> Arc<Operator> {
    Arc::new(
        Operator::new(
            "Example Rail",
            supports_return_fare,
            vec![
                bracket(Some(0.0), Some(14.0), vec![]),
                bracket(
                    Some(15.0),
                    Some(29.0),
                    vec![rate(Some(dec!(0.25)), Some(dec!(0.125)), "Standard")],
                ),
                bracket(
                    Some(30.0),
                    Some(59.0),
                    vec![
                        rate(Some(dec!(0.5)), Some(dec!(0.25)), "Statutory"),
                        rate(Some(dec!(0.75)), None, "Enhanced"),
                    ],
                ),
                bracket(
                    Some(60.0),
                    None,
                    vec![rate(Some(dec!(1)), Some(dec!(0.5)), "Full")],
                ),
            ],
        )
        .unwrap(),
    )
}

fn session_with_delay(operator: Arc<Operator>, actual: &str) -> RepaySession {
    let mut session = RepaySession::new();
    session.select_operator(Some(operator));
    session.set_expected(ts("10:00"));
    session.set_actual(ts(actual));
    session
}

#[test]
fn new_session_is_empty() {
    let session = RepaySession::new();
    assert_eq!(session.delay_minutes(), None);
    assert!(session.active_bracket().is_none());
    assert!(session.active_rate().is_none());
    assert!(session.tickets().is_empty());
    assert_eq!(session.totals(), Totals::default());
    assert_eq!(session.rate_index(), 0);
}

#[test]
fn worked_example_single_ticket() {
    let mut session = session_with_delay(standard_operator(true), "10:20");
    let id = session.add_ticket();
    session
        .update_ticket(id, Some(FareType::Single), money(dec!(100)))
        .unwrap();

    assert_eq!(session.delay_minutes(), Some(20.0));
    assert_eq!(
        session.active_rate().and_then(|r| r.note.as_deref()),
        Some("Standard")
    );
    assert_eq!(session.totals().total_repay.value(), dec!(25));
    assert_eq!(session.totals().total_cost.value(), dec!(100));
}

#[test]
fn early_arrival_repays_nothing() {
    let mut session = session_with_delay(standard_operator(true), "09:55");
    let id = session.add_ticket();
    session
        .update_ticket(id, Some(FareType::Single), money(dec!(250)))
        .unwrap();

    assert_eq!(session.delay_minutes(), Some(-5.0));
    assert!(session.active_bracket().is_none());
    assert_eq!(session.totals().total_repay, Money::ZERO);
    assert_eq!(session.totals().total_cost.value(), dec!(250));
}

#[test]
fn no_operator_means_no_bracket() {
    let mut session = RepaySession::new();
    session.set_expected(ts("10:00"));
    session.set_actual(ts("11:30"));
    let id = session.add_ticket();
    session
        .update_ticket(id, Some(FareType::Return), money(dec!(40)))
        .unwrap();

    assert_eq!(session.delay_minutes(), Some(90.0));
    assert!(session.active_bracket().is_none());
    assert_eq!(session.totals().total_repay, Money::ZERO);
    // Nothing to restrict against yet
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Return));
}

#[test]
fn missing_timestamp_means_no_bracket() {
    let mut session = session_with_delay(standard_operator(true), "10:45");
    assert!(session.active_bracket().is_some());

    session.set_actual(None);
    assert_eq!(session.delay_minutes(), None);
    assert_eq!(session.delay_band(), None);
    assert!(session.active_bracket().is_none());
}

#[test]
fn return_without_rate_percentage_contributes_zero() {
    let operator = Arc::new(
        Operator::new(
            "Half Rail",
            true,
            vec![bracket(
                Some(0.0),
                None,
                vec![rate(Some(dec!(0.5)), None, "Singles only")],
            )],
        )
        .unwrap(),
    );
    let mut session = session_with_delay(operator, "10:30");
    let a = session.add_ticket();
    let b = session.add_ticket();
    session
        .update_ticket(a, Some(FareType::Single), money(dec!(50)))
        .unwrap();
    session
        .update_ticket(b, Some(FareType::Return), money(dec!(80)))
        .unwrap();

    assert!(!session.availability().return_fare);
    assert_eq!(session.tickets()[1].fare_type, Some(FareType::Return));
    assert_eq!(session.totals().total_cost.value(), dec!(130));
    assert_eq!(session.totals().total_repay.value(), dec!(25));
}

/// 15-29 and 30-59 as in the standard schedule, plus a 60+ bracket whose
/// first rate covers singles only.
fn two_choice_operator() -> Arc<Operator> {
    Arc::new(
        Operator::new(
            "Choice Rail",
            true,
            vec![
                bracket(
                    Some(15.0),
                    Some(29.0),
                    vec![rate(Some(dec!(0.25)), Some(dec!(0.125)), "Standard")],
                ),
                bracket(
                    Some(30.0),
                    Some(59.0),
                    vec![
                        rate(Some(dec!(0.5)), Some(dec!(0.25)), "Statutory"),
                        rate(Some(dec!(0.75)), None, "Enhanced"),
                    ],
                ),
                bracket(
                    Some(60.0),
                    None,
                    vec![
                        rate(Some(dec!(1)), None, "Singles only"),
                        rate(Some(dec!(1)), Some(dec!(0.5)), "Full"),
                    ],
                ),
            ],
        )
        .unwrap(),
    )
}

#[test]
fn operator_without_returns_coerces_tickets() {
    let mut session = session_with_delay(standard_operator(true), "10:20");
    let a = session.add_ticket();
    let b = session.add_ticket();
    session
        .update_ticket(a, Some(FareType::Return), money(dec!(80)))
        .unwrap();
    session
        .update_ticket(b, Some(FareType::Single), money(dec!(40)))
        .unwrap();

    // 80 * 0.125 + 40 * 0.25
    assert_eq!(session.totals().total_repay.value(), dec!(20));

    session.select_operator(Some(standard_operator(false)));

    assert!(!session.availability().return_fare);
    assert!(
        session
            .tickets()
            .iter()
            .all(|t| t.fare_type == Some(FareType::Single))
    );
    // 80 * 0.25 + 40 * 0.25
    assert_eq!(session.totals().total_repay.value(), dec!(30));
}

#[test]
fn rate_without_return_coerces_tickets() {
    let mut session = session_with_delay(standard_operator(true), "10:40");
    let id = session.add_ticket();
    session
        .update_ticket(id, Some(FareType::Return), money(dec!(100)))
        .unwrap();
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Return));
    assert_eq!(session.totals().total_repay.value(), dec!(25));

    // The enhanced rate offers nothing for returns
    session.select_rate_index(1).unwrap();

    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Single));
    assert_eq!(session.totals().total_repay.value(), dec!(75));
}

#[test]
fn updating_a_ticket_keeps_its_fare_type() {
    let mut session = session_with_delay(standard_operator(false), "10:20");
    let id = session.add_ticket();
    session
        .update_ticket(id, Some(FareType::Return), money(dec!(10)))
        .unwrap();

    assert!(!session.availability().return_fare);
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Return));
    assert_eq!(session.tickets()[0].price, money(dec!(10)));
    // Adding or removing other tickets does not touch it either
    let other = session.add_ticket();
    session.remove_ticket(other).unwrap();
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Return));
}

#[test]
fn rate_change_coerces_after_update() {
    let mut session = session_with_delay(two_choice_operator(), "10:40");
    session.select_rate_index(1).unwrap();
    let id = session.add_ticket();
    session
        .update_ticket(id, Some(FareType::Return), money(dec!(100)))
        .unwrap();
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Return));
    assert_eq!(session.totals().total_repay, Money::ZERO);

    // Statutory covers returns, so the ticket is left alone
    session.select_rate_index(0).unwrap();
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Return));
    assert_eq!(session.totals().total_repay.value(), dec!(25));

    session.select_rate_index(1).unwrap();
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Single));
    assert_eq!(session.totals().total_repay.value(), dec!(75));
}

#[test]
fn operator_change_coerces_after_update() {
    let mut session = session_with_delay(standard_operator(true), "10:20");
    let id = session.add_ticket();
    session
        .update_ticket(id, Some(FareType::Return), money(dec!(80)))
        .unwrap();

    session.select_operator(None);
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Return));

    session.select_operator(Some(standard_operator(false)));
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Single));
}

#[test]
fn bracket_change_coerces_after_update() {
    let mut session = session_with_delay(two_choice_operator(), "10:20");
    let id = session.add_ticket();
    session
        .update_ticket(id, Some(FareType::Return), money(dec!(80)))
        .unwrap();

    // Out of every bracket: returns are still allowed by the operator
    session.set_actual(None);
    assert!(session.active_bracket().is_none());
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Return));

    // Same bracket as before: nothing to normalise
    session.set_actual(ts("10:25"));
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Return));
    assert_eq!(session.totals().total_repay.value(), dec!(10));

    // Into 60+, whose first rate has no return cover
    session.set_actual(ts("11:15"));
    assert_eq!(session.tickets()[0].fare_type, Some(FareType::Single));
    assert_eq!(session.totals().total_repay.value(), dec!(80));
}

#[test]
fn rate_index_resets_when_bracket_changes() {
    let mut session = session_with_delay(two_choice_operator(), "10:40");
    session.select_rate_index(1).unwrap();
    assert_eq!(
        session.active_rate().and_then(|r| r.note.as_deref()),
        Some("Enhanced")
    );

    // 60+ also has two rates, but index 1 there is a different scheme
    session.set_actual(ts("11:15"));
    assert_eq!(session.rate_index(), 0);
    assert_eq!(
        session.active_rate().and_then(|r| r.note.as_deref()),
        Some("Singles only")
    );
}

#[test]
fn select_rate_index_rejects_out_of_range() {
    let mut session = session_with_delay(standard_operator(true), "10:40");

    assert_eq!(
        session.select_rate_index(2),
        Err(SelectionError::RateIndexOutOfRange { index: 2, len: 2 })
    );
    assert_eq!(session.rate_index(), 0);
    assert_eq!(
        session.active_rate().and_then(|r| r.note.as_deref()),
        Some("Statutory")
    );
}

#[test]
fn select_rate_index_needs_bracket() {
    let mut session = RepaySession::new();
    assert_eq!(
        session.select_rate_index(1),
        Err(SelectionError::NoActiveBracket)
    );
    assert_eq!(session.rate_index(), 0);
}

#[test]
fn default_rate_index_is_always_accepted() {
    let mut session = RepaySession::new();
    assert_eq!(session.select_rate_index(0), Ok(()));

    // A bracket with no rates at all
    let mut session = session_with_delay(standard_operator(true), "10:05");
    assert_eq!(session.select_rate_index(0), Ok(()));
    assert!(session.active_rate().is_none());
    assert_eq!(
        session.select_rate_index(1),
        Err(SelectionError::RateIndexOutOfRange { index: 1, len: 0 })
    );
}

#[test]
fn rate_index_resets_when_bracket_has_fewer_rates() {
    let mut session = session_with_delay(standard_operator(true), "10:40");
    session.select_rate_index(1).unwrap();

    // Into the one-rate 15-29 bracket
    session.set_actual(ts("10:20"));
    assert_eq!(session.rate_index(), 0);
    assert_eq!(
        session.active_rate().and_then(|r| r.note.as_deref()),
        Some("Standard")
    );
}

#[test]
fn rate_index_survives_missing_timestamp() {
    let mut session = session_with_delay(standard_operator(true), "10:40");
    session.select_rate_index(1).unwrap();

    session.set_actual(None);
    session.set_actual(ts("10:45"));

    assert_eq!(session.rate_index(), 1);
    assert_eq!(
        session.active_rate().and_then(|r| r.note.as_deref()),
        Some("Enhanced")
    );
}

#[test]
fn changing_operator_resets_rate_index() {
    let mut session = session_with_delay(standard_operator(true), "10:40");
    session.select_rate_index(1).unwrap();

    session.select_operator(Some(standard_operator(true)));
    assert_eq!(session.rate_index(), 0);
}

#[test]
fn bracket_with_no_rates_has_no_active_rate() {
    let session = session_with_delay(standard_operator(true), "10:05");
    assert!(session.active_bracket().is_some());
    assert!(session.active_rate().is_none());
    assert_eq!(session.totals().total_repay, Money::ZERO);
}

#[test]
fn removing_and_readding_never_reuses_ids() {
    let mut session = RepaySession::new();
    let a = session.add_ticket();
    let b = session.add_ticket();
    session.remove_ticket(a).unwrap();
    let c = session.add_ticket();

    assert_ne!(c, a);
    assert_ne!(c, b);
    assert_eq!(
        session.remove_ticket(a),
        Err(LedgerError::TicketNotFound(a))
    );
}

#[test]
fn removing_ticket_updates_totals() {
    let mut session = session_with_delay(standard_operator(true), "11:30");
    let a = session.add_ticket();
    let b = session.add_ticket();
    session
        .update_ticket(a, Some(FareType::Single), money(dec!(30)))
        .unwrap();
    session
        .update_ticket(b, Some(FareType::Return), money(dec!(60)))
        .unwrap();
    assert_eq!(session.totals().total_repay.value(), dec!(60));

    session.remove_ticket(a).unwrap();
    assert_eq!(session.totals().total_cost.value(), dec!(60));
    assert_eq!(session.totals().total_repay.value(), dec!(30));
}

#[test]
fn unknown_ticket_update_leaves_totals_alone() {
    let mut session = session_with_delay(standard_operator(true), "10:20");
    let id = session.add_ticket();
    session
        .update_ticket(id, Some(FareType::Single), money(dec!(100)))
        .unwrap();
    let before = session.resolution();

    assert!(
        session
            .update_ticket(TicketId(99), Some(FareType::Single), money(dec!(1)))
            .is_err()
    );
    assert_eq!(session.resolution(), before);
}

#[test]
fn delay_band_follows_journey() {
    let session = session_with_delay(standard_operator(true), "12:30");
    assert_eq!(
        session.delay_band().map(|b| b.label()),
        Some("Over 120 minutes")
    );
}
