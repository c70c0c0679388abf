use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::cart::{CartMutation, CartView, UpdateQuantityRequest},
    error::AppResult,
    middleware::session::{CartSession, SessionReply},
    response::{ApiResponse, Meta},
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(view_cart))
        .route("/cart/add/{item_id}", post(add_to_cart))
        .route("/cart/update/{item_id}", post(update_quantity))
        .route("/cart/remove/{item_id}", post(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Current cart contents", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<SessionReply<ApiResponse<CartView>>> {
    let view = cart_service::view_cart(&state, &session).await?;
    let resp = ApiResponse::success("Cart", view, Some(Meta::empty()));
    Ok(session.reply(state.cart_ttl, resp))
}

#[utoipa::path(
    post,
    path = "/cart/add/{item_id}",
    params(
        ("item_id" = Uuid, Path, description = "Menu item ID")
    ),
    responses(
        (status = 200, description = "Item added or quantity bumped", body = CartMutation),
        (status = 404, description = "Menu item not found or unavailable"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: CartSession,
    Path(item_id): Path<Uuid>,
) -> AppResult<SessionReply<CartMutation>> {
    let body = cart_service::add_item(&state, &session, item_id).await?;
    Ok(session.reply(state.cart_ttl, body))
}

#[utoipa::path(
    post,
    path = "/cart/update/{item_id}",
    params(
        ("item_id" = Uuid, Path, description = "Menu item ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity overwritten; zero or less removes the line", body = CartMutation),
        (status = 404, description = "Menu item not found, unavailable, or not in the cart"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    session: CartSession,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<SessionReply<CartMutation>> {
    let body = cart_service::set_quantity(&state, &session, item_id, payload.quantity).await?;
    Ok(session.reply(state.cart_ttl, body))
}

#[utoipa::path(
    post,
    path = "/cart/remove/{item_id}",
    params(
        ("item_id" = Uuid, Path, description = "Menu item ID")
    ),
    responses(
        (status = 200, description = "Line removed; succeeds even when absent", body = CartMutation),
        (status = 404, description = "Menu item not found"),
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    session: CartSession,
    Path(item_id): Path<Uuid>,
) -> AppResult<SessionReply<CartMutation>> {
    let body = cart_service::remove_item(&state, &session, item_id).await?;
    Ok(session.reply(state.cart_ttl, body))
}
