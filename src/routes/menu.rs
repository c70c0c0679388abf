use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::menu::MenuPage,
    error::AppResult,
    response::ApiResponse,
    routes::params::{MenuQuery, MenuSort},
    services::menu_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(browse))
}

#[utoipa::path(
    get,
    path = "/",
    params(
        ("search" = Option<String>, Query, description = "Match against name, tasting notes, or origin"),
        ("origin" = Option<String>, Query, description = "Filter by bean origin"),
        ("strength" = Option<String>, Query, description = "Filter by strength label"),
        ("sort" = Option<MenuSort>, Query, description = "name, price_low, or price_high")
    ),
    responses(
        (status = 200, description = "Available menu items with filter options", body = ApiResponse<MenuPage>)
    ),
    tag = "Menu"
)]
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<ApiResponse<MenuPage>>> {
    let resp = menu_service::browse_menu(&state, query).await?;
    Ok(Json(resp))
}
