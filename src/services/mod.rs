pub mod admin_service;
pub mod auth_service;
pub mod cart_service;
pub mod content_service;
pub mod feedback_service;
pub mod menu_service;
pub mod order_service;
