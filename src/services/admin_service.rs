use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::{self, OrderStatus},
    dto::orders::{OrderList, OrderView, UpdateOrderStatusRequest},
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult},
    mailer::DEFAULT_COMPLETION_MESSAGE,
    middleware::auth::{AuthUser, ensure_admin},
    models,
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

/// Staff order queue. Unlike customer reads, listing never advances an
/// order; the kitchen sees the status exactly as stored.
pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination.normalize();

    let mut condition = Condition::all();
    if let Some(raw) = query.status.as_deref().and_then(domain::non_blank) {
        let status = OrderStatus::parse(raw)
            .ok_or_else(|| AppError::BadRequest("Invalid order status".into()))?;
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let mut finder = Orders::find().filter(condition);

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(models::Order::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(meta),
    ))
}

pub async fn get_order_admin(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderView>> {
    ensure_admin(user)?;
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let items: Vec<models::OrderItem> = order
        .find_related(OrderItems)
        .order_by_asc(OrderItemCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(models::OrderItem::from)
        .collect();

    let has_feedback = order
        .find_related(crate::entity::Feedback)
        .one(&state.orm)
        .await?
        .is_some();

    let time_remaining = domain::time_remaining_minutes(
        order.status,
        order.estimated_ready_at.map(|dt| dt.with_timezone(&Utc)),
        Utc::now(),
    );

    Ok(ApiResponse::success(
        "Order found",
        OrderView {
            order: models::Order::from(order),
            items,
            time_remaining_minutes: time_remaining,
            has_feedback,
        },
        Some(Meta::empty()),
    ))
}

/// Explicit staff transition. Forward moves and cancellation only.
/// Completing an order also records the pickup message and mails the
/// customer in the background.
pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<models::Order>> {
    ensure_admin(user)?;

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let from = existing.status;
    let to = payload.status;
    if !from.can_transition(to) {
        return Err(AppError::BadRequest(format!(
            "Cannot change order status from {} to {}",
            from.as_str(),
            to.as_str()
        )));
    }

    let completion = (to == OrderStatus::Completed).then(|| {
        payload
            .completion_message
            .as_deref()
            .and_then(domain::non_blank)
            .unwrap_or(DEFAULT_COMPLETION_MESSAGE)
            .to_string()
    });

    let mut active: OrderActive = existing.into();
    active.status = Set(to);
    active.updated_at = Set(Utc::now().into());
    if let Some(message) = completion.clone() {
        active.completion_message = Set(Some(message));
    }
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({
            "order_id": order.id,
            "from": from.as_str(),
            "to": to.as_str(),
        })),
    )
    .await;

    if let Some(message) = completion {
        let mailer = state.mailer.clone();
        let recipient = order.customer_email.clone();
        let order_id = order.id;
        tokio::spawn(async move {
            mailer
                .send_order_completed(&recipient, order_id, &message)
                .await;
        });
    }

    Ok(ApiResponse::success(
        "Order updated",
        models::Order::from(order),
        Some(Meta::empty()),
    ))
}
