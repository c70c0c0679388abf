use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Feedback;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitFeedbackRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub rating: i32,
    pub comment: String,
}

/// Public feedback board: recent entries plus aggregate numbers.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackBoard {
    pub feedbacks: Vec<Feedback>,
    /// Mean rating rounded to one decimal, 0.0 when there are no reviews.
    pub average_rating: f64,
    pub total_reviews: i64,
    /// Review count per rating value, keys "1" through "5".
    pub rating_counts: BTreeMap<i32, i64>,
}
