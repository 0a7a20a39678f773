pub mod app_state;
pub mod config;
pub mod content_store;
pub mod render;
