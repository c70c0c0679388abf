use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::LockType;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use sea_orm::{ActiveModelTrait, ModelTrait};
use uuid::Uuid;

use crate::{
    audit,
    domain::{self, OrderStatus},
    dto::orders::{OrderList, OrderView, PlaceOrderRequest},
    entity::{
        cart_items::{Column as CartCol, Entity as CartItems},
        menu_items::{Column as MenuCol, Entity as MenuItems, Model as MenuModel},
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::session::CartSession,
    models,
    response::{ApiResponse, Meta},
    routes::params::OrderLookupQuery,
    state::AppState,
};

/// Turn the session's cart into an order. Runs as a single transaction:
/// either the order exists with all its lines and an emptied cart, or
/// nothing happened.
pub async fn place_order(
    state: &AppState,
    session: &CartSession,
    payload: PlaceOrderRequest,
) -> AppResult<ApiResponse<OrderView>> {
    let txn = state.orm.begin().await?;

    let rows = CartItems::find()
        .filter(CartCol::SessionId.eq(session.session_id))
        .filter(CartCol::ExpiresAt.gt(Utc::now()))
        .order_by_asc(CartCol::CreatedAt)
        .lock(LockType::Update)
        .all(&txn)
        .await?;

    let item_ids: Vec<Uuid> = rows.iter().map(|row| row.menu_item_id).collect();
    let menu: HashMap<Uuid, MenuModel> = if item_ids.is_empty() {
        HashMap::new()
    } else {
        MenuItems::find()
            .filter(MenuCol::Id.is_in(item_ids))
            .all(&txn)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect()
    };

    // (item id, name, quantity, current price) for every line that is
    // still purchasable. Entries that are not get dropped, not ordered.
    let mut lines: Vec<(Uuid, String, i32, Decimal)> = Vec::new();
    for row in &rows {
        match menu.get(&row.menu_item_id).filter(|item| item.available) {
            Some(item) => lines.push((item.id, item.name.clone(), row.quantity, item.price)),
            None => {
                tracing::warn!(
                    session_id = %session.session_id,
                    menu_item_id = %row.menu_item_id,
                    cached_name = %row.cached_name,
                    "dropping stale cart entry at checkout"
                );
            }
        }
    }

    if lines.is_empty() {
        return Err(AppError::BadRequest("Your cart is empty!".into()));
    }

    let customer_name = domain::non_blank(&payload.customer_name);
    let customer_email = domain::non_blank(&payload.customer_email);
    let customer_phone = domain::non_blank(&payload.customer_phone);
    let (Some(customer_name), Some(customer_email), Some(customer_phone)) =
        (customer_name, customer_email, customer_phone)
    else {
        return Err(AppError::BadRequest(
            "Please fill in all required fields!".into(),
        ));
    };

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_name: Set(customer_name.to_string()),
        customer_email: Set(customer_email.to_string()),
        customer_phone: Set(customer_phone.to_string()),
        status: Set(OrderStatus::Pending),
        total_amount: Set(Decimal::ZERO),
        notes: Set(payload
            .notes
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()),
        estimated_ready_at: Set(None),
        completion_message: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut total = Decimal::ZERO;
    let mut total_quantity: i64 = 0;
    let mut items = Vec::with_capacity(lines.len());
    for (item_id, name, quantity, price) in lines {
        let line = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            menu_item_id: Set(item_id),
            item_name: Set(name),
            quantity: Set(quantity),
            price: Set(price),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;

        total += price * Decimal::from(quantity);
        total_quantity += i64::from(quantity);
        items.push(models::OrderItem::from(line));
    }

    let estimate = domain::estimated_ready_at(order.created_at.with_timezone(&Utc), total_quantity);

    let mut active: OrderActive = order.into();
    active.total_amount = Set(total);
    // The estimate is fixed at creation; it is never recomputed later.
    active.estimated_ready_at = Set(Some(estimate.into()));
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    CartItems::delete_many()
        .filter(CartCol::SessionId.eq(session.session_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        None,
        "checkout",
        Some("orders"),
        Some(serde_json::json!({
            "order_id": order.id,
            "total_amount": domain::format_money(total),
            "line_count": items.len(),
        })),
    )
    .await;

    let time_remaining = domain::time_remaining_minutes(
        order.status,
        order.estimated_ready_at.map(|dt| dt.with_timezone(&Utc)),
        Utc::now(),
    );
    let message = format!("Order #{} placed successfully! We'll contact you soon.", order.id);

    Ok(ApiResponse::success(
        message,
        OrderView {
            order: models::Order::from(order),
            items,
            time_remaining_minutes: time_remaining,
            has_feedback: false,
        },
        Some(Meta::empty()),
    ))
}

/// Passive advancement: an order whose estimate has elapsed moves to
/// `ready` the moment a customer observes it. Terminal and already-ready
/// orders pass through untouched.
async fn refresh_status<C: ConnectionTrait>(conn: &C, order: OrderModel) -> AppResult<OrderModel> {
    let estimate = order.estimated_ready_at.map(|dt| dt.with_timezone(&Utc));
    if !domain::should_advance(order.status, estimate, Utc::now()) {
        return Ok(order);
    }

    let mut active: OrderActive = order.into();
    active.status = Set(OrderStatus::Ready);
    active.updated_at = Set(Utc::now().into());
    Ok(active.update(conn).await?)
}

/// Customer-facing order detail, shared by the confirmation and tracking
/// pages. Observing the order may advance it to `ready`.
pub async fn get_order_view(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderView>> {
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let order = refresh_status(&state.orm, order).await?;

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

/// Orders looked up by the e-mail or phone given at checkout, newest
/// first. Each returned order gets the same passive advancement as the
/// tracking page.
pub async fn my_orders(
    state: &AppState,
    query: OrderLookupQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let email = query.email.as_deref().and_then(domain::non_blank);
    let phone = query.phone.as_deref().and_then(domain::non_blank);

    let finder = match (email, phone) {
        (Some(email), _) => Orders::find().filter(OrderCol::CustomerEmail.eq(email)),
        (None, Some(phone)) => Orders::find().filter(OrderCol::CustomerPhone.eq(phone)),
        (None, None) => {
            return Err(AppError::BadRequest(
                "Please provide an email or phone number.".into(),
            ));
        }
    };

    let orders = finder
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(orders.len());
    for order in orders {
        let order = refresh_status(&state.orm, order).await?;
        items.push(models::Order::from(order));
    }

    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(Meta::empty()),
    ))
}
