use std::collections::BTreeMap;

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use crate::{
    domain,
    dto::feedback::{FeedbackBoard, SubmitFeedbackRequest},
    entity::{
        feedback::{ActiveModel as FeedbackActive, Column as FeedbackCol, Entity as Feedback},
        orders::Entity as Orders,
    },
    error::{AppError, AppResult},
    models,
    response::{ApiResponse, Meta},
    state::AppState,
};

const ALREADY_SUBMITTED: &str = "You have already submitted feedback for this order.";

/// Record a customer's rating for an order. One feedback per order; the
/// submitted e-mail must match the one on the order, ignoring case.
pub async fn submit_feedback(
    state: &AppState,
    order_id: Uuid,
    payload: SubmitFeedbackRequest,
) -> AppResult<ApiResponse<models::Feedback>> {
    let order = Orders::find_by_id(order_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let existing = Feedback::find()
        .filter(FeedbackCol::OrderId.eq(order_id))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::BadRequest(ALREADY_SUBMITTED.into()));
    }

    let customer_name = domain::non_blank(&payload.customer_name);
    let customer_email = domain::non_blank(&payload.customer_email);
    let (Some(customer_name), Some(customer_email)) = (customer_name, customer_email) else {
        return Err(AppError::BadRequest(
            "Please fill in all required fields!".into(),
        ));
    };
    if payload.rating == 0 {
        return Err(AppError::BadRequest(
            "Please fill in all required fields!".into(),
        ));
    }
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest("Please select a valid rating!".into()));
    }

    if !domain::emails_match(customer_email, &order.customer_email) {
        return Err(AppError::BadRequest(
            "Email does not match the order. Please use the email used for this order.".into(),
        ));
    }

    let active = FeedbackActive {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        customer_name: Set(customer_name.to_string()),
        customer_email: Set(customer_email.to_string()),
        rating: Set(payload.rating),
        comment: Set(payload.comment.trim().to_string()),
        approved: Set(true),
        created_at: NotSet,
    };

    // Two submissions racing past the pre-check both reach the insert; the
    // UNIQUE constraint on order_id decides, and the loser gets the same
    // rejection as the pre-check.
    let feedback = match active.insert(&state.orm).await {
        Ok(feedback) => feedback,
        Err(err) => {
            return Err(match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::BadRequest(ALREADY_SUBMITTED.into())
                }
                _ => err.into(),
            });
        }
    };

    Ok(ApiResponse::success(
        "Thank you for your feedback! We appreciate your input.",
        models::Feedback::from(feedback),
        Some(Meta::empty()),
    ))
}

/// Public board: the 20 most recent approved feedbacks plus aggregate
/// numbers over all of them.
pub async fn feedback_board(state: &AppState) -> AppResult<ApiResponse<FeedbackBoard>> {
    let feedbacks: Vec<models::Feedback> = Feedback::find()
        .filter(FeedbackCol::Approved.eq(true))
        .order_by_desc(FeedbackCol::CreatedAt)
        .limit(20)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(models::Feedback::from)
        .collect();

    let (total_reviews, average): (i64, f64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(AVG(rating)::float8, 0) FROM feedback WHERE approved = TRUE",
    )
    .fetch_one(&state.pool)
    .await?;

    let counts: Vec<(i32, i64)> =
        sqlx::query_as("SELECT rating, COUNT(*) FROM feedback WHERE approved = TRUE GROUP BY rating")
            .fetch_all(&state.pool)
            .await?;

    let mut rating_counts: BTreeMap<i32, i64> = (1..=5).map(|rating| (rating, 0)).collect();
    for (rating, count) in counts {
        rating_counts.insert(rating, count);
    }

    Ok(ApiResponse::success(
        "Feedbacks",
        FeedbackBoard {
            feedbacks,
            average_rating: (average * 10.0).round() / 10.0,
            total_reviews,
            rating_counts,
        },
        Some(Meta::empty()),
    ))
}
