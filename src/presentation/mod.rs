// Presentation layer - Thin HTTP surface over the data-access core
pub mod app_state;
pub mod handlers;
