use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, SqlErr,
};
use uuid::Uuid;

use crate::{
    audit, domain,
    dto::menu::{CreateMenuItemRequest, MenuPage, UpdateMenuItemRequest},
    entity::menu_items::{ActiveModel, Column, Entity as MenuItems},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::MenuItem,
    response::{ApiResponse, Meta},
    routes::params::{MenuQuery, MenuSort},
    state::AppState,
};

/// Public catalog: available items, filtered and sorted, together with the
/// distinct origin and strength values the storefront filter bar offers.
pub async fn browse_menu(state: &AppState, query: MenuQuery) -> AppResult<ApiResponse<MenuPage>> {
    let mut condition = Condition::all().add(Column::Available.eq(true));

    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search.trim());
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Notes).ilike(pattern.clone()))
                .add(Expr::col(Column::Origin).ilike(pattern)),
        );
    }
    if let Some(origin) = query.origin.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Expr::col(Column::Origin).ilike(format!("%{}%", origin.trim())));
    }
    if let Some(strength) = query.strength.as_ref().filter(|s| !s.is_empty()) {
        condition =
            condition.add(Expr::col(Column::Strength).ilike(format!("%{}%", strength.trim())));
    }

    let finder = MenuItems::find().filter(condition);
    let finder = match query.sort.unwrap_or(MenuSort::Name) {
        MenuSort::Name => finder.order_by_asc(Column::Name),
        MenuSort::PriceLow => finder.order_by_asc(Column::Price),
        MenuSort::PriceHigh => finder.order_by_desc(Column::Price),
    };

    let items: Vec<MenuItem> = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(MenuItem::from)
        .collect();

    let origins = distinct_values(state, Column::Origin).await?;
    let strengths = distinct_values(state, Column::Strength).await?;

    Ok(ApiResponse::success(
        "Menu",
        MenuPage {
            items,
            origins,
            strengths,
        },
        None,
    ))
}

async fn distinct_values(state: &AppState, column: Column) -> AppResult<Vec<String>> {
    let values = MenuItems::find()
        .select_only()
        .column(column)
        .filter(Column::Available.eq(true))
        .distinct()
        .order_by_asc(column)
        .into_tuple::<String>()
        .all(&state.orm)
        .await?;
    Ok(values)
}

pub async fn create_menu_item(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMenuItemRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    ensure_admin(user)?;

    let name = domain::non_blank(&payload.name)
        .ok_or_else(|| AppError::BadRequest("Menu item name is required".into()))?;
    if payload.price < Decimal::ZERO {
        return Err(AppError::BadRequest("Price cannot be negative".into()));
    }

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        price: Set(payload.price),
        origin: Set(payload.origin.trim().to_string()),
        strength: Set(payload.strength.trim().to_string()),
        notes: Set(payload.notes.unwrap_or_default()),
        image_url: Set(payload.image_url),
        available: Set(payload.available.unwrap_or(true)),
        created_at: NotSet,
        updated_at: NotSet,
    };

    let item = match active.insert(&state.orm).await {
        Ok(item) => item,
        Err(err) => {
            return Err(match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::BadRequest("A menu item with this name already exists".into())
                }
                _ => err.into(),
            });
        }
    };

    audit::record(
        &state.pool,
        Some(user.user_id),
        "menu_item_create",
        Some("menu_items"),
        Some(serde_json::json!({ "menu_item_id": item.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Menu item created",
        MenuItem::from(item),
        Some(Meta::empty()),
    ))
}

pub async fn update_menu_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateMenuItemRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    ensure_admin(user)?;

    let existing = MenuItems::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(item) => item,
        None => return Err(AppError::NotFound),
    };

    if payload.price.is_some_and(|price| price < Decimal::ZERO) {
        return Err(AppError::BadRequest("Price cannot be negative".into()));
    }

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(origin) = payload.origin {
        active.origin = Set(origin);
    }
    if let Some(strength) = payload.strength {
        active.strength = Set(strength);
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(notes);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(available) = payload.available {
        active.available = Set(available);
    }
    active.updated_at = Set(chrono::Utc::now().into());

    let item = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "menu_item_update",
        Some("menu_items"),
        Some(serde_json::json!({ "menu_item_id": item.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Menu item updated",
        MenuItem::from(item),
        Some(Meta::empty()),
    ))
}

pub async fn delete_menu_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let result = MenuItems::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "menu_item_delete",
        Some("menu_items"),
        Some(serde_json::json!({ "menu_item_id": id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Menu item deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
