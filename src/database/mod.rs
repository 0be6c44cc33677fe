//! Database layer
//!
//! Connection pooling, migrations, and repository implementations.

pub mod connection;
pub mod repositories;
pub mod service;

pub use connection::{create_pool, health_check, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::{
    BookingRepository, ChatRepository, EventRepository, FavoriteRepository, UserRepository,
};
pub use service::DatabaseService;
