use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::feedback::{FeedbackBoard, SubmitFeedbackRequest},
    error::AppResult,
    models::Feedback,
    response::ApiResponse,
    services::feedback_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/order/{order_id}/feedback", post(submit))
        .route("/feedbacks", get(board))
}

#[utoipa::path(
    post,
    path = "/order/{order_id}/feedback",
    params(
        ("order_id" = Uuid, Path, description = "Order ID")
    ),
    request_body = SubmitFeedbackRequest,
    responses(
        (status = 200, description = "Feedback recorded", body = ApiResponse<Feedback>),
        (status = 400, description = "Invalid rating, mismatched email, or feedback already submitted"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Feedback"
)]
pub async fn submit(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<SubmitFeedbackRequest>,
) -> AppResult<Json<ApiResponse<Feedback>>> {
    let resp = feedback_service::submit_feedback(&state, order_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/feedbacks",
    responses(
        (status = 200, description = "Recent approved reviews with rating summary", body = ApiResponse<FeedbackBoard>)
    ),
    tag = "Feedback"
)]
pub async fn board(State(state): State<AppState>) -> AppResult<Json<ApiResponse<FeedbackBoard>>> {
    let resp = feedback_service::feedback_board(&state).await?;
    Ok(Json(resp))
}
