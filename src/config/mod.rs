//! Configuration management
//!
//! Settings loading from TOML files and environment variables, plus
//! startup-time validation.

pub mod settings;
pub mod validation;

pub use settings::{
    AuthConfig, CatalogConfig, ChatConfig, DatabaseConfig, FeaturesConfig, LoggingConfig,
    PaymentConfig, RedisConfig, ServerConfig, Settings,
};
