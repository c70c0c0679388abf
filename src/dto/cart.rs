use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One cart row joined against the live menu. `price` and `subtotal` use
/// the current menu price, not the snapshot taken at add time.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartLine {
    pub menu_item_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub cart_count: i64,
    pub cart_total: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

/// Flat body every cart mutation answers with, bypassing the usual
/// response envelope so the storefront widget can read it directly.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartMutation {
    pub success: bool,
    pub cart_count: i64,
    pub cart_total: String,
    pub message: String,
}
