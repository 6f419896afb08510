// Presentation layer - HTTP host view
pub mod app_state;
pub mod handlers;
pub mod router;
