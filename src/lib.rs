//! CornerClub Backend
//!
//! Backend service for the CornerClub event discovery and ticket booking
//! application. This library provides the event catalog, the booking
//! workflow with payment-gateway integration and capacity enforcement,
//! favorites, per-event chat channels, and the admin moderation surface.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CornerClubError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::{build_router, AppState};
pub use middleware::auth::AuthContext;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
