// Presentation layer - HTTP surface over the dashboard view state
pub mod app_state;
pub mod handlers;
pub mod view;
