use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::cart::CartView,
    dto::orders::{OrderList, OrderView, PlaceOrderRequest},
    error::AppResult,
    middleware::session::{CartSession, SessionReply},
    response::{ApiResponse, Meta},
    routes::params::OrderLookupQuery,
    services::{cart_service, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", get(checkout))
        .route("/order/place", post(place_order))
        .route("/order/confirmation/{order_id}", get(confirmation))
        .route("/order/track/{order_id}", get(track))
        .route("/my-orders", get(my_orders))
}

#[utoipa::path(
    get,
    path = "/checkout",
    responses(
        (status = 200, description = "Cart snapshot for the checkout form", body = ApiResponse<CartView>),
        (status = 400, description = "Cart is empty"),
    ),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<SessionReply<ApiResponse<CartView>>> {
    let view = cart_service::checkout_view(&state, &session).await?;
    let resp = ApiResponse::success("Checkout", view, Some(Meta::empty()));
    Ok(session.reply(state.cart_ttl, resp))
}

#[utoipa::path(
    post,
    path = "/order/place",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Order placed from the session cart", body = ApiResponse<OrderView>),
        (status = 400, description = "Empty cart or missing contact details"),
    ),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    session: CartSession,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<SessionReply<ApiResponse<OrderView>>> {
    let resp = order_service::place_order(&state, &session, payload).await?;
    Ok(session.reply(state.cart_ttl, resp))
}

#[utoipa::path(
    get,
    path = "/order/confirmation/{order_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with its lines and pickup estimate", body = ApiResponse<OrderView>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn confirmation(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderView>>> {
    let resp = order_service::get_order_view(&state, order_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/order/track/{order_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Live order status; an elapsed estimate shows as ready", body = ApiResponse<OrderView>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn track(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderView>>> {
    let resp = order_service::get_order_view(&state, order_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/my-orders",
    params(
        ("email" = Option<String>, Query, description = "E-mail given at checkout"),
        ("phone" = Option<String>, Query, description = "Phone given at checkout; used when no email is provided")
    ),
    responses(
        (status = 200, description = "Orders for the given contact, newest first", body = ApiResponse<OrderList>),
        (status = 400, description = "Neither email nor phone provided"),
    ),
    tag = "Orders"
)]
pub async fn my_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderLookupQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::my_orders(&state, query).await?;
    Ok(Json(resp))
}
