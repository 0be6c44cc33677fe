//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub payment: PaymentConfig,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Payment gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentConfig {
    pub api_url: String,
    pub key_id: String,
    pub key_secret: String,
    pub currency: String,
    pub timeout_seconds: u64,
}

/// Auth provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub admin_ids: Vec<String>,
}

/// Catalog listing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub page_size: i64,
    pub cache_ttl_seconds: u64,
}

/// Chat configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    pub feed_limit: i64,
    pub global_channel: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_file_size: String,
    pub max_files: u32,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub payments: bool,
    pub chat: bool,
    pub admin_panel: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("CORNERCLUB"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::CornerClubError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/cornerclub".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "cornerclub:".to_string(),
                ttl_seconds: 3600,
            },
            payment: PaymentConfig {
                api_url: "https://api.razorpay.com".to_string(),
                key_id: String::new(),
                key_secret: String::new(),
                currency: "INR".to_string(),
                timeout_seconds: 10,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                admin_ids: vec![],
            },
            catalog: CatalogConfig {
                page_size: 50,
                cache_ttl_seconds: 60,
            },
            chat: ChatConfig {
                feed_limit: 50,
                global_channel: "general_community".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/cornerclub".to_string(),
                max_file_size: "10MB".to_string(),
                max_files: 5,
            },
            features: FeaturesConfig {
                payments: true,
                chat: true,
                admin_panel: true,
            },
        }
    }
}
