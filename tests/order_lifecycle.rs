use brew_bloom_api::domain::{
    self, BASE_PREP_MINUTES, OrderStatus, PER_UNIT_MINUTES,
};
use brew_bloom_api::middleware::session::session_from_cookie_header;
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

#[test]
fn estimate_is_base_plus_per_unit() {
    let created = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let eta = domain::estimated_ready_at(created, 3);
    assert_eq!(
        (eta - created).num_minutes(),
        BASE_PREP_MINUTES + 3 * PER_UNIT_MINUTES
    );
}

#[test]
fn time_remaining_counts_down_and_floors_at_zero() {
    let created = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    // 3 units: ready 11 minutes after checkout
    let eta = Some(domain::estimated_ready_at(created, 3));

    let four_minutes_in = created + Duration::minutes(4);
    assert_eq!(
        domain::time_remaining_minutes(OrderStatus::Preparing, eta, four_minutes_in),
        Some(7)
    );

    let twelve_minutes_in = created + Duration::minutes(12);
    assert_eq!(
        domain::time_remaining_minutes(OrderStatus::Preparing, eta, twelve_minutes_in),
        Some(0)
    );
}

#[test]
fn time_remaining_is_absent_for_terminal_orders() {
    let created = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let eta = Some(domain::estimated_ready_at(created, 1));

    assert_eq!(
        domain::time_remaining_minutes(OrderStatus::Completed, eta, created),
        None
    );
    assert_eq!(
        domain::time_remaining_minutes(OrderStatus::Cancelled, eta, created),
        None
    );
    // No stored estimate, no countdown.
    assert_eq!(
        domain::time_remaining_minutes(OrderStatus::Pending, None, created),
        None
    );
}

#[test]
fn advancement_waits_for_the_estimate_to_elapse() {
    let created = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let eta = Some(domain::estimated_ready_at(created, 3));

    assert!(!domain::should_advance(
        OrderStatus::Pending,
        eta,
        created + Duration::minutes(10)
    ));
    assert!(domain::should_advance(
        OrderStatus::Pending,
        eta,
        created + Duration::minutes(11)
    ));
    assert!(domain::should_advance(
        OrderStatus::Preparing,
        eta,
        created + Duration::minutes(12)
    ));
}

#[test]
fn advancement_never_touches_ready_or_terminal_orders() {
    let created = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let long_elapsed = created + Duration::hours(2);
    let eta = Some(domain::estimated_ready_at(created, 1));

    for status in [
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ] {
        assert!(!domain::should_advance(status, eta, long_elapsed));
    }
    assert!(!domain::should_advance(OrderStatus::Pending, None, long_elapsed));
}

#[test]
fn transitions_move_forward_only() {
    use OrderStatus::*;

    assert!(Pending.can_transition(Confirmed));
    assert!(Pending.can_transition(Ready));
    assert!(Confirmed.can_transition(Preparing));
    assert!(Preparing.can_transition(Completed));
    assert!(Ready.can_transition(Completed));

    // No regressions.
    assert!(!Confirmed.can_transition(Pending));
    assert!(!Ready.can_transition(Preparing));
    assert!(!Preparing.can_transition(Preparing));
}

#[test]
fn cancellation_is_reachable_from_any_open_state() {
    use OrderStatus::*;

    for status in [Pending, Confirmed, Preparing, Ready] {
        assert!(status.can_transition(Cancelled));
    }
}

#[test]
fn terminal_states_absorb() {
    use OrderStatus::*;

    for target in [Pending, Confirmed, Preparing, Ready, Completed, Cancelled] {
        assert!(!Completed.can_transition(target));
        assert!(!Cancelled.can_transition(target));
    }
}

#[test]
fn status_strings_round_trip() {
    use OrderStatus::*;

    for status in [Pending, Confirmed, Preparing, Ready, Completed, Cancelled] {
        assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(OrderStatus::parse("shipped"), None);
    assert_eq!(OrderStatus::parse(""), None);
}

#[test]
fn money_renders_with_two_decimals() {
    assert_eq!(domain::format_money(Decimal::new(1400, 2)), "14.00");
    assert_eq!(domain::format_money(Decimal::new(45, 1)), "4.50");
    assert_eq!(domain::format_money(Decimal::ZERO), "0.00");
}

#[test]
fn email_comparison_ignores_case_and_whitespace() {
    assert!(domain::emails_match("Ada@Example.com", "ada@example.com"));
    assert!(domain::emails_match("  ada@example.com  ", "ada@example.com"));
    assert!(!domain::emails_match("ada@example.com", "grace@example.com"));
}

#[test]
fn blank_fields_are_rejected() {
    assert_eq!(domain::non_blank("  latte  "), Some("latte"));
    assert_eq!(domain::non_blank("   "), None);
    assert_eq!(domain::non_blank(""), None);
}

#[test]
fn session_cookie_parsing_is_lenient() {
    let id = Uuid::new_v4();

    let header = format!("theme=dark; bb_session={id}; lang=en");
    assert_eq!(session_from_cookie_header(&header), Some(id));

    assert_eq!(session_from_cookie_header("bb_session=not-a-uuid"), None);
    assert_eq!(session_from_cookie_header("theme=dark"), None);
    assert_eq!(session_from_cookie_header(""), None);
}
