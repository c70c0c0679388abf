use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::MenuItem;

/// Catalog payload: the filtered items plus the distinct values the
/// filter bar offers.
#[derive(Debug, Serialize, ToSchema)]
pub struct MenuPage {
    pub items: Vec<MenuItem>,
    pub origins: Vec<String>,
    pub strengths: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub price: Decimal,
    pub origin: String,
    pub strength: String,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub origin: Option<String>,
    pub strength: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
}
