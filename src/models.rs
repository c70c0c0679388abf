//! API-facing models. Entity rows are converted here once instead of ad hoc
//! in every service, and anything sensitive (password hashes, feedback
//! author e-mails) stays behind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{domain::OrderStatus, entity};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub origin: String,
    pub strength: String,
    pub notes: String,
    pub image_url: Option<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::menu_items::Model> for MenuItem {
    fn from(model: entity::menu_items::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            origin: model.origin,
            strength: model.strength,
            notes: model.notes,
            image_url: model.image_url,
            available: model.available,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub notes: String,
    pub estimated_ready_at: Option<DateTime<Utc>>,
    pub completion_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::orders::Model> for Order {
    fn from(model: entity::orders::Model) -> Self {
        Self {
            id: model.id,
            customer_name: model.customer_name,
            customer_email: model.customer_email,
            customer_phone: model.customer_phone,
            status: model.status,
            total_amount: model.total_amount,
            notes: model.notes,
            estimated_ready_at: model.estimated_ready_at.map(|dt| dt.with_timezone(&Utc)),
            completion_message: model.completion_message,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub menu_item_id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    pub price: Decimal,
    /// `quantity × price`, derived at conversion time for display.
    pub subtotal: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<entity::order_items::Model> for OrderItem {
    fn from(model: entity::order_items::Model) -> Self {
        let subtotal = model.price * Decimal::from(model.quantity);
        Self {
            id: model.id,
            order_id: model.order_id,
            menu_item_id: model.menu_item_id,
            item_name: model.item_name,
            quantity: model.quantity,
            price: model.price,
            subtotal,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// The author's e-mail is intentionally absent: feedback is shown on a
/// public board.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub id: Uuid,
    pub order_id: Uuid,
    pub customer_name: String,
    pub rating: i32,
    pub comment: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<entity::feedback::Model> for Feedback {
    fn from(model: entity::feedback::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            customer_name: model.customer_name,
            rating: model.rating,
            comment: model.comment,
            approved: model.approved,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Staff account, without the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::users::Model> for User {
    fn from(model: entity::users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpecialOffer {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<entity::special_offers::Model> for SpecialOffer {
    fn from(model: entity::special_offers::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            valid_from: model.valid_from.with_timezone(&Utc),
            valid_until: model.valid_until.with_timezone(&Utc),
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub display_order: i32,
    pub is_active: bool,
}

impl From<entity::faqs::Model> for Faq {
    fn from(model: entity::faqs::Model) -> Self {
        Self {
            id: model.id,
            question: model.question,
            answer: model.answer,
            display_order: model.display_order,
            is_active: model.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GalleryImage {
    pub id: Uuid,
    pub image_url: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<entity::gallery_images::Model> for GalleryImage {
    fn from(model: entity::gallery_images::Model) -> Self {
        Self {
            id: model.id,
            image_url: model.image_url,
            title: model.title,
            description: model.description,
            category: model.category,
            is_featured: model.is_featured,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub event_type: String,
    pub reservation_at: DateTime<Utc>,
    pub number_of_guests: i32,
    pub special_requests: String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::reservations::Model> for Reservation {
    fn from(model: entity::reservations::Model) -> Self {
        Self {
            id: model.id,
            customer_name: model.customer_name,
            customer_email: model.customer_email,
            customer_phone: model.customer_phone,
            event_type: model.event_type,
            reservation_at: model.reservation_at.with_timezone(&Utc),
            number_of_guests: model.number_of_guests,
            special_requests: model.special_requests,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::contact_messages::Model> for ContactMessage {
    fn from(model: entity::contact_messages::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            subject: model.subject,
            message: model.message,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
