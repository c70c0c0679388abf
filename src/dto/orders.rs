use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::OrderStatus,
    models::{Order, OrderItem},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub notes: Option<String>,
}

/// Order detail as customers see it on the confirmation and tracking
/// pages. `time_remaining_minutes` is absent for completed or cancelled
/// orders.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderView {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub time_remaining_minutes: Option<i64>,
    pub has_feedback: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    /// Stored and mailed when the new status is `completed`.
    pub completion_message: Option<String>,
}
