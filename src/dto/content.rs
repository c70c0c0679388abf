use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Faq, GalleryImage, Reservation, SpecialOffer};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    pub email: String,
    pub name: Option<String>,
}

/// Flat body the subscribe widget reads directly, no envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReservationRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub event_type: Option<String>,
    /// RFC 3339 timestamp, must lie in the future.
    pub reservation_at: String,
    pub number_of_guests: Option<i32>,
    pub special_requests: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOfferRequest {
    pub title: String,
    pub description: String,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFaqRequest {
    pub question: String,
    pub answer: String,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGalleryImageRequest {
    pub image_url: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct OfferList {
    #[schema(value_type = Vec<SpecialOffer>)]
    pub items: Vec<SpecialOffer>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct FaqList {
    #[schema(value_type = Vec<Faq>)]
    pub items: Vec<Faq>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ReservationList {
    #[schema(value_type = Vec<Reservation>)]
    pub items: Vec<Reservation>,
}

/// Gallery payload with the distinct category list for the filter chips.
#[derive(Debug, Serialize, ToSchema)]
pub struct GalleryPage {
    pub images: Vec<GalleryImage>,
    pub categories: Vec<String>,
}
