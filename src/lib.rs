//! Restaurant listing web application library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod restaurants;
pub mod routing;
pub mod store;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use restaurants::{Restaurant, RestaurantsController};
pub use store::{MemoryStore, RestaurantStore, SqliteStore};
