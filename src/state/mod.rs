pub mod app_state;
pub mod forms;
pub mod messages;
pub mod network;
pub mod query_cache;
pub mod theme;
