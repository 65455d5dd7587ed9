pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod menu;
pub mod routes;
pub mod store;
pub mod uploads;

pub use config::Config;
pub use db::DbPool;
pub use error::AppError;
pub use routes::{create_router, AppState};
