pub mod auth;
pub mod cart;
pub mod content;
pub mod feedback;
pub mod menu;
pub mod orders;
