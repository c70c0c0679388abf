use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    SqlErr,
};
use uuid::Uuid;

use crate::{
    audit, domain,
    dto::content::{
        ContactRequest, CreateFaqRequest, CreateGalleryImageRequest, CreateOfferRequest, FaqList,
        GalleryPage, OfferList, ReservationList, ReservationRequest, SubscribeRequest,
        SubscribeResponse,
    },
    entity::{
        contact_messages, faqs, gallery_images, newsletter_subscribers, reservations,
        special_offers,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Newsletter signup. Always answers the flat `{success, message}` body;
/// a refused signup is a `success: false` payload, not an error status.
pub async fn subscribe(
    state: &AppState,
    payload: SubscribeRequest,
) -> AppResult<SubscribeResponse> {
    let Some(email) = domain::non_blank(&payload.email) else {
        return Ok(SubscribeResponse {
            success: false,
            message: "Email is required.".into(),
        });
    };
    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();

    let existing = newsletter_subscribers::Entity::find()
        .filter(newsletter_subscribers::Column::Email.eq(email))
        .one(&state.orm)
        .await?;

    match existing {
        Some(subscriber) if subscriber.is_active => Ok(SubscribeResponse {
            success: false,
            message: "You are already subscribed!".into(),
        }),
        Some(subscriber) => {
            let mut active: newsletter_subscribers::ActiveModel = subscriber.into();
            active.is_active = Set(true);
            active.name = Set(name.to_string());
            active.update(&state.orm).await?;
            Ok(SubscribeResponse {
                success: true,
                message: "Thank you for subscribing!".into(),
            })
        }
        None => {
            let insert = newsletter_subscribers::ActiveModel {
                id: Set(Uuid::new_v4()),
                email: Set(email.to_string()),
                name: Set(name.to_string()),
                is_active: Set(true),
                created_at: NotSet,
            }
            .insert(&state.orm)
            .await;

            match insert {
                Ok(_) => Ok(SubscribeResponse {
                    success: true,
                    message: "Thank you for subscribing!".into(),
                }),
                // Lost the race against a concurrent signup for the same
                // address; answer as if the earlier one had been ours.
                Err(err) => match err.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => Ok(SubscribeResponse {
                        success: false,
                        message: "You are already subscribed!".into(),
                    }),
                    _ => Err(err.into()),
                },
            }
        }
    }
}

pub async fn submit_contact(
    state: &AppState,
    payload: ContactRequest,
) -> AppResult<ApiResponse<models::ContactMessage>> {
    let name = domain::non_blank(&payload.name);
    let email = domain::non_blank(&payload.email);
    let message = domain::non_blank(&payload.message);
    let (Some(name), Some(email), Some(message)) = (name, email, message) else {
        return Err(AppError::BadRequest(
            "Please fill in all required fields.".into(),
        ));
    };

    let saved = contact_messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        phone: Set(payload
            .phone
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()),
        subject: Set(payload
            .subject
            .as_deref()
            .and_then(domain::non_blank)
            .unwrap_or("general")
            .to_string()),
        message: Set(message.to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Thank you for contacting us! We will get back to you soon.",
        models::ContactMessage::from(saved),
        Some(Meta::empty()),
    ))
}

pub async fn make_reservation(
    state: &AppState,
    payload: ReservationRequest,
) -> AppResult<ApiResponse<models::Reservation>> {
    let name = domain::non_blank(&payload.customer_name);
    let email = domain::non_blank(&payload.customer_email);
    let phone = domain::non_blank(&payload.customer_phone);
    let when_raw = domain::non_blank(&payload.reservation_at);
    let (Some(name), Some(email), Some(phone), Some(when_raw)) = (name, email, phone, when_raw)
    else {
        return Err(AppError::BadRequest(
            "Please fill in all required fields.".into(),
        ));
    };

    let reservation_at = DateTime::parse_from_rfc3339(when_raw)
        .map_err(|_| AppError::BadRequest("Invalid date/time format. Please try again.".into()))?
        .with_timezone(&Utc);
    if reservation_at <= Utc::now() {
        return Err(AppError::BadRequest(
            "Reservation time must be in the future.".into(),
        ));
    }
    if payload.number_of_guests.is_some_and(|guests| guests < 1) {
        return Err(AppError::BadRequest(
            "Number of guests must be at least 1.".into(),
        ));
    }

    let saved = reservations::ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_name: Set(name.to_string()),
        customer_email: Set(email.to_string()),
        customer_phone: Set(phone.to_string()),
        event_type: Set(payload
            .event_type
            .as_deref()
            .and_then(domain::non_blank)
            .unwrap_or("table")
            .to_string()),
        reservation_at: Set(reservation_at.into()),
        number_of_guests: Set(payload.number_of_guests.unwrap_or(2)),
        special_requests: Set(payload
            .special_requests
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Reservation request submitted! We will confirm shortly.",
        models::Reservation::from(saved),
        Some(Meta::empty()),
    ))
}

/// Reservations booked under an e-mail address, soonest first.
pub async fn my_reservations(
    state: &AppState,
    email: Option<&str>,
) -> AppResult<ApiResponse<ReservationList>> {
    let Some(email) = email.and_then(domain::non_blank) else {
        return Err(AppError::BadRequest("Please provide an email.".into()));
    };

    let items = reservations::Entity::find()
        .filter(reservations::Column::CustomerEmail.eq(email))
        .order_by_asc(reservations::Column::ReservationAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(models::Reservation::from)
        .collect();

    Ok(ApiResponse::success(
        "Reservations",
        ReservationList { items },
        Some(Meta::empty()),
    ))
}

/// Offers that are active and inside their validity window right now,
/// newest first.
pub async fn list_offers(state: &AppState) -> AppResult<ApiResponse<OfferList>> {
    let now = Utc::now();
    let items = special_offers::Entity::find()
        .filter(
            Condition::all()
                .add(special_offers::Column::IsActive.eq(true))
                .add(special_offers::Column::ValidFrom.lte(now))
                .add(special_offers::Column::ValidUntil.gte(now)),
        )
        .order_by_desc(special_offers::Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(models::SpecialOffer::from)
        .collect();

    Ok(ApiResponse::success(
        "Special offers",
        OfferList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_offer(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOfferRequest,
) -> AppResult<ApiResponse<models::SpecialOffer>> {
    ensure_admin(user)?;

    let title = domain::non_blank(&payload.title)
        .ok_or_else(|| AppError::BadRequest("Title is required.".into()))?;
    if payload.valid_from >= payload.valid_until {
        return Err(AppError::BadRequest(
            "Offer validity window is invalid.".into(),
        ));
    }

    let saved = special_offers::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(payload.description.trim().to_string()),
        valid_from: Set(payload.valid_from.into()),
        valid_until: Set(payload.valid_until.into()),
        is_active: Set(payload.is_active.unwrap_or(true)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "offer_create",
        Some("special_offers"),
        Some(serde_json::json!({ "offer_id": saved.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Offer created",
        models::SpecialOffer::from(saved),
        Some(Meta::empty()),
    ))
}

pub async fn list_faqs(state: &AppState) -> AppResult<ApiResponse<FaqList>> {
    let items = faqs::Entity::find()
        .filter(faqs::Column::IsActive.eq(true))
        .order_by_asc(faqs::Column::DisplayOrder)
        .order_by_asc(faqs::Column::Question)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(models::Faq::from)
        .collect();

    Ok(ApiResponse::success(
        "FAQ",
        FaqList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_faq(
    state: &AppState,
    user: &AuthUser,
    payload: CreateFaqRequest,
) -> AppResult<ApiResponse<models::Faq>> {
    ensure_admin(user)?;

    let question = domain::non_blank(&payload.question);
    let answer = domain::non_blank(&payload.answer);
    let (Some(question), Some(answer)) = (question, answer) else {
        return Err(AppError::BadRequest(
            "Question and answer are required.".into(),
        ));
    };

    let saved = faqs::ActiveModel {
        id: Set(Uuid::new_v4()),
        question: Set(question.to_string()),
        answer: Set(answer.to_string()),
        display_order: Set(payload.display_order.unwrap_or(0)),
        is_active: Set(payload.is_active.unwrap_or(true)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "faq_create",
        Some("faqs"),
        Some(serde_json::json!({ "faq_id": saved.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "FAQ created",
        models::Faq::from(saved),
        Some(Meta::empty()),
    ))
}

/// Gallery, featured images first, then newest, plus the distinct category
/// list for the filter chips.
pub async fn gallery(state: &AppState) -> AppResult<ApiResponse<GalleryPage>> {
    let images = gallery_images::Entity::find()
        .order_by_desc(gallery_images::Column::IsFeatured)
        .order_by_desc(gallery_images::Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(models::GalleryImage::from)
        .collect();

    let categories = gallery_images::Entity::find()
        .select_only()
        .column(gallery_images::Column::Category)
        .distinct()
        .order_by_asc(gallery_images::Column::Category)
        .into_tuple::<String>()
        .all(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Gallery",
        GalleryPage { images, categories },
        Some(Meta::empty()),
    ))
}

pub async fn create_gallery_image(
    state: &AppState,
    user: &AuthUser,
    payload: CreateGalleryImageRequest,
) -> AppResult<ApiResponse<models::GalleryImage>> {
    ensure_admin(user)?;

    let image_url = domain::non_blank(&payload.image_url);
    let title = domain::non_blank(&payload.title);
    let (Some(image_url), Some(title)) = (image_url, title) else {
        return Err(AppError::BadRequest(
            "Image URL and title are required.".into(),
        ));
    };

    let saved = gallery_images::ActiveModel {
        id: Set(Uuid::new_v4()),
        image_url: Set(image_url.to_string()),
        title: Set(title.to_string()),
        description: Set(payload.description.unwrap_or_default()),
        category: Set(payload
            .category
            .as_deref()
            .and_then(domain::non_blank)
            .unwrap_or("general")
            .to_string()),
        is_featured: Set(payload.is_featured.unwrap_or(false)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "gallery_image_create",
        Some("gallery_images"),
        Some(serde_json::json!({ "image_id": saved.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Gallery image created",
        models::GalleryImage::from(saved),
        Some(Meta::empty()),
    ))
}
