use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod content;
pub mod doc;
pub mod feedback;
pub mod health;
pub mod menu;
pub mod orders;
pub mod params;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(menu::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(feedback::router())
        .merge(content::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
