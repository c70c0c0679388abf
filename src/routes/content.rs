use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};

use crate::{
    dto::content::{
        ContactRequest, FaqList, GalleryPage, OfferList, ReservationList, ReservationRequest,
        SubscribeRequest, SubscribeResponse,
    },
    error::AppResult,
    models,
    response::ApiResponse,
    routes::params::ReservationLookupQuery,
    services::content_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/newsletter/subscribe", post(subscribe))
        .route("/contact", post(contact))
        .route("/reservation", post(reservation))
        .route("/my-reservations", get(my_reservations))
        .route("/offers", get(offers))
        .route("/faq", get(faq))
        .route("/gallery", get(gallery))
}

#[utoipa::path(
    post,
    path = "/newsletter/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscription outcome; duplicates are refused in the body", body = SubscribeResponse)
    ),
    tag = "Content"
)]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> AppResult<Json<SubscribeResponse>> {
    let body = content_service::subscribe(&state, payload).await?;
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message stored", body = ApiResponse<models::ContactMessage>),
        (status = 400, description = "Missing name, email, or message"),
    ),
    tag = "Content"
)]
pub async fn contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> AppResult<Json<ApiResponse<models::ContactMessage>>> {
    let resp = content_service::submit_contact(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/reservation",
    request_body = ReservationRequest,
    responses(
        (status = 200, description = "Reservation request stored", body = ApiResponse<models::Reservation>),
        (status = 400, description = "Missing fields, unparseable time, or time not in the future"),
    ),
    tag = "Content"
)]
pub async fn reservation(
    State(state): State<AppState>,
    Json(payload): Json<ReservationRequest>,
) -> AppResult<Json<ApiResponse<models::Reservation>>> {
    let resp = content_service::make_reservation(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/my-reservations",
    params(
        ("email" = Option<String>, Query, description = "E-mail the reservations were made under")
    ),
    responses(
        (status = 200, description = "Reservations for the given email, soonest first", body = ApiResponse<ReservationList>),
        (status = 400, description = "No email provided"),
    ),
    tag = "Content"
)]
pub async fn my_reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationLookupQuery>,
) -> AppResult<Json<ApiResponse<ReservationList>>> {
    let resp = content_service::my_reservations(&state, query.email.as_deref()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/offers",
    responses(
        (status = 200, description = "Offers currently inside their validity window", body = ApiResponse<OfferList>)
    ),
    tag = "Content"
)]
pub async fn offers(State(state): State<AppState>) -> AppResult<Json<ApiResponse<OfferList>>> {
    let resp = content_service::list_offers(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/faq",
    responses(
        (status = 200, description = "Active FAQ entries in display order", body = ApiResponse<FaqList>)
    ),
    tag = "Content"
)]
pub async fn faq(State(state): State<AppState>) -> AppResult<Json<ApiResponse<FaqList>>> {
    let resp = content_service::list_faqs(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/gallery",
    responses(
        (status = 200, description = "Gallery images, featured first, with category list", body = ApiResponse<GalleryPage>)
    ),
    tag = "Content"
)]
pub async fn gallery(State(state): State<AppState>) -> AppResult<Json<ApiResponse<GalleryPage>>> {
    let resp = content_service::gallery(&state).await?;
    Ok(Json(resp))
}
