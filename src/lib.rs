pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod repo;
pub mod routes;

// Re-export commonly used items for tests / external users
pub use config::AppConfig;
pub use routes::AppState;
