//! Order-lifecycle rules shared by the customer and staff surfaces: the
//! status machine, preparation-time estimates and the small helpers the
//! checkout path leans on.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Minutes of preparation every order starts with.
pub const BASE_PREP_MINUTES: i64 = 5;
/// Additional minutes per unit of quantity across all line items.
pub const PER_UNIT_MINUTES: i64 = 2;

/// Lifecycle of an order. Stored as its lowercase string value.
///
/// `pending → confirmed → preparing → ready → completed`, with `cancelled`
/// reachable from any non-terminal state. Transitions never regress.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "preparing")]
    Preparing,
    #[sea_orm(string_value = "ready")]
    Ready,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "preparing" => Some(OrderStatus::Preparing),
            "ready" => Some(OrderStatus::Ready),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Position in the forward progression. `Cancelled` sits outside it and
    /// is only reachable through the explicit branch in [`can_transition`].
    ///
    /// [`can_transition`]: OrderStatus::can_transition
    fn rank(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Preparing => 2,
            OrderStatus::Ready => 3,
            OrderStatus::Completed => 4,
            OrderStatus::Cancelled => 5,
        }
    }

    /// Whether a staff-initiated transition from `self` to `to` is allowed:
    /// strictly forward moves only, cancellation from any non-terminal state,
    /// nothing out of a terminal state.
    pub fn can_transition(self, to: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if to == OrderStatus::Cancelled {
            return true;
        }
        to.rank() > self.rank()
    }
}

/// When an order placed at `created_at` with `total_quantity` units across
/// its lines is expected to be ready. Computed once at checkout and never
/// recomputed afterwards.
pub fn estimated_ready_at(created_at: DateTime<Utc>, total_quantity: i64) -> DateTime<Utc> {
    created_at + Duration::minutes(BASE_PREP_MINUTES + PER_UNIT_MINUTES * total_quantity)
}

/// Whole minutes until the order is expected to be ready, floored at zero.
/// `None` for terminal orders and for orders without a stored estimate.
pub fn time_remaining_minutes(
    status: OrderStatus,
    estimated_ready_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<i64> {
    if status.is_terminal() {
        return None;
    }
    let ready_at = estimated_ready_at?;
    Some((ready_at - now).num_minutes().max(0))
}

/// Passive advancement: an order whose estimate has elapsed moves to `ready`
/// when observed. Forward-only; `ready` and the terminal states are left
/// alone.
pub fn should_advance(
    status: OrderStatus,
    estimated_ready_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    matches!(
        status,
        OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Preparing
    ) && estimated_ready_at.is_some_and(|ready_at| now >= ready_at)
}

/// Render a money amount the way the storefront displays it: two decimal
/// places, no currency symbol.
pub fn format_money(amount: Decimal) -> String {
    format!("{amount:.2}")
}

/// Case-insensitive identity check used by feedback submission, where the
/// supplied e-mail must match the one stored on the order.
pub fn emails_match(submitted: &str, stored: &str) -> bool {
    submitted.trim().eq_ignore_ascii_case(stored.trim())
}

/// `Some(trimmed)` when the field carries non-whitespace content.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
