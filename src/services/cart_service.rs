use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    domain,
    dto::cart::{CartLine, CartMutation, CartView},
    entity::{
        cart_items::{
            ActiveModel as CartActive, Column as CartCol, Entity as CartItems, Model as CartModel,
        },
        menu_items::{Column as MenuCol, Entity as MenuItems, Model as MenuModel},
    },
    error::{AppError, AppResult},
    middleware::session::CartSession,
    state::AppState,
};

/// Live (unexpired) cart rows for a session, oldest first.
async fn live_rows<C: ConnectionTrait>(conn: &C, session_id: Uuid) -> AppResult<Vec<CartModel>> {
    let rows = CartItems::find()
        .filter(CartCol::SessionId.eq(session_id))
        .filter(CartCol::ExpiresAt.gt(Utc::now()))
        .order_by_asc(CartCol::CreatedAt)
        .all(conn)
        .await?;
    Ok(rows)
}

/// Resolve live rows against the current menu. Every row still counts
/// toward `cart_count`, but entries whose item vanished or went
/// unavailable are dropped from the lines and the total, with a warning.
async fn resolve<C: ConnectionTrait>(
    conn: &C,
    session_id: Uuid,
) -> AppResult<(Vec<CartLine>, i64, Decimal)> {
    let rows = live_rows(conn, session_id).await?;
    let count: i64 = rows.iter().map(|row| row.quantity as i64).sum();

    let item_ids: Vec<Uuid> = rows.iter().map(|row| row.menu_item_id).collect();
    let menu: HashMap<Uuid, MenuModel> = if item_ids.is_empty() {
        HashMap::new()
    } else {
        MenuItems::find()
            .filter(MenuCol::Id.is_in(item_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect()
    };

    let mut lines = Vec::new();
    let mut total = Decimal::ZERO;
    for row in rows {
        match menu.get(&row.menu_item_id).filter(|item| item.available) {
            Some(item) => {
                let subtotal = item.price * Decimal::from(row.quantity);
                total += subtotal;
                lines.push(CartLine {
                    menu_item_id: item.id,
                    name: item.name.clone(),
                    price: item.price,
                    quantity: row.quantity,
                    subtotal,
                });
            }
            None => {
                tracing::warn!(
                    session_id = %session_id,
                    menu_item_id = %row.menu_item_id,
                    cached_name = %row.cached_name,
                    "cart entry no longer purchasable, excluded from total"
                );
            }
        }
    }

    Ok((lines, count, total))
}

/// Delete this session's expired rows. Eviction is lazy: it runs on cart
/// writes, never from a background task.
async fn purge_expired(state: &AppState, session_id: Uuid) -> AppResult<()> {
    let result = CartItems::delete_many()
        .filter(CartCol::SessionId.eq(session_id))
        .filter(CartCol::ExpiresAt.lte(Utc::now()))
        .exec(&state.orm)
        .await?;
    if result.rows_affected > 0 {
        tracing::debug!(
            session_id = %session_id,
            dropped = result.rows_affected,
            "purged expired cart rows"
        );
    }
    Ok(())
}

/// Slide the TTL forward for every row the session owns, so a cart expires
/// as a unit rather than entry by entry.
async fn touch_session(
    state: &AppState,
    session_id: Uuid,
    expires_at: DateTime<Utc>,
) -> AppResult<()> {
    CartItems::update_many()
        .col_expr(CartCol::ExpiresAt, Expr::value(expires_at))
        .filter(CartCol::SessionId.eq(session_id))
        .exec(&state.orm)
        .await?;
    Ok(())
}

async fn mutation_result(
    state: &AppState,
    session: &CartSession,
    message: String,
) -> AppResult<CartMutation> {
    let (_, cart_count, cart_total) = resolve(&state.orm, session.session_id).await?;
    Ok(CartMutation {
        success: true,
        cart_count,
        cart_total: domain::format_money(cart_total),
        message,
    })
}

pub async fn view_cart(state: &AppState, session: &CartSession) -> AppResult<CartView> {
    let (items, cart_count, cart_total) = resolve(&state.orm, session.session_id).await?;
    Ok(CartView {
        items,
        cart_count,
        cart_total,
    })
}

/// Cart snapshot for the checkout page. A cart with no purchasable lines
/// cannot proceed to checkout.
pub async fn checkout_view(state: &AppState, session: &CartSession) -> AppResult<CartView> {
    let view = view_cart(state, session).await?;
    if view.items.is_empty() {
        return Err(AppError::BadRequest("Your cart is empty!".into()));
    }
    Ok(view)
}

/// Add one unit of an item, or bump the quantity when it is already in the
/// cart. The item must exist and be available.
pub async fn add_item(
    state: &AppState,
    session: &CartSession,
    item_id: Uuid,
) -> AppResult<CartMutation> {
    purge_expired(state, session.session_id).await?;

    let item = MenuItems::find_by_id(item_id)
        .filter(MenuCol::Available.eq(true))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let existing = CartItems::find()
        .filter(CartCol::SessionId.eq(session.session_id))
        .filter(CartCol::MenuItemId.eq(item_id))
        .one(&state.orm)
        .await?;

    let expires_at = Utc::now() + state.cart_ttl;
    let action = match existing {
        Some(row) => {
            let quantity = row.quantity + 1;
            let mut active: CartActive = row.into();
            active.quantity = Set(quantity);
            active.updated_at = Set(Utc::now().into());
            active.update(&state.orm).await?;
            "updated"
        }
        None => {
            CartActive {
                id: Set(Uuid::new_v4()),
                session_id: Set(session.session_id),
                menu_item_id: Set(item.id),
                quantity: Set(1),
                cached_name: Set(item.name.clone()),
                cached_price: Set(item.price),
                expires_at: Set(expires_at.into()),
                created_at: NotSet,
                updated_at: NotSet,
            }
            .insert(&state.orm)
            .await?;
            "added"
        }
    };

    touch_session(state, session.session_id, expires_at).await?;
    mutation_result(state, session, format!("{} {} to cart!", item.name, action)).await
}

/// Overwrite the quantity of an entry. Zero or less removes the entry when
/// present and is a no-op otherwise; a positive quantity for an item that
/// is not in the cart is rejected.
pub async fn set_quantity(
    state: &AppState,
    session: &CartSession,
    item_id: Uuid,
    quantity: i32,
) -> AppResult<CartMutation> {
    purge_expired(state, session.session_id).await?;

    let item = MenuItems::find_by_id(item_id)
        .filter(MenuCol::Available.eq(true))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let existing = CartItems::find()
        .filter(CartCol::SessionId.eq(session.session_id))
        .filter(CartCol::MenuItemId.eq(item_id))
        .one(&state.orm)
        .await?;

    let message = if quantity <= 0 {
        match existing {
            Some(row) => {
                CartItems::delete_by_id(row.id).exec(&state.orm).await?;
                format!("{} removed from cart", item.name)
            }
            None => "Cart updated".to_string(),
        }
    } else {
        let row = existing.ok_or(AppError::NotFound)?;
        let mut active: CartActive = row.into();
        active.quantity = Set(quantity);
        active.updated_at = Set(Utc::now().into());
        active.update(&state.orm).await?;
        format!("{} quantity updated", item.name)
    };

    touch_session(state, session.session_id, Utc::now() + state.cart_ttl).await?;
    mutation_result(state, session, message).await
}

/// Drop an item from the cart. The item must exist on the menu (available
/// or not); removing something that is not in the cart still succeeds.
pub async fn remove_item(
    state: &AppState,
    session: &CartSession,
    item_id: Uuid,
) -> AppResult<CartMutation> {
    purge_expired(state, session.session_id).await?;

    let item = MenuItems::find_by_id(item_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    CartItems::delete_many()
        .filter(CartCol::SessionId.eq(session.session_id))
        .filter(CartCol::MenuItemId.eq(item_id))
        .exec(&state.orm)
        .await?;

    touch_session(state, session.session_id, Utc::now() + state.cart_ttl).await?;
    mutation_result(state, session, format!("{} removed from cart", item.name)).await
}
