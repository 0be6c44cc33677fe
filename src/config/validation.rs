//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{CornerClubError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_auth_config(&settings.auth)?;
    validate_catalog_config(&settings.catalog)?;
    validate_chat_config(&settings.chat)?;
    validate_logging_config(&settings.logging)?;

    if settings.features.payments {
        validate_payment_config(&settings.payment)?;
    }

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(CornerClubError::Config(
            "Server host is required".to_string(),
        ));
    }

    if config.port == 0 {
        return Err(CornerClubError::Config(
            "Server port must be non-zero".to_string(),
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(CornerClubError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if !config.url.starts_with("postgresql://") && !config.url.starts_with("postgres://") {
        return Err(CornerClubError::Config(
            "Database URL must be a PostgreSQL connection string".to_string(),
        ));
    }

    if config.max_connections == 0 || config.max_connections < config.min_connections {
        return Err(CornerClubError::Config(
            "Database connection pool bounds are invalid".to_string(),
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(CornerClubError::Config("Redis URL is required".to_string()));
    }

    Ok(())
}

/// Validate payment gateway configuration
fn validate_payment_config(config: &super::PaymentConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(CornerClubError::Config(
            "Payment gateway API URL is required when payments are enabled".to_string(),
        ));
    }

    if config.key_id.is_empty() || config.key_secret.is_empty() {
        return Err(CornerClubError::Config(
            "Payment gateway credentials are required when payments are enabled".to_string(),
        ));
    }

    if config.currency.len() != 3 {
        return Err(CornerClubError::Config(
            "Payment currency must be a three-letter code".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(CornerClubError::Config(
            "Payment gateway timeout must be non-zero".to_string(),
        ));
    }

    Ok(())
}

/// Validate auth configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.jwt_secret.is_empty() {
        return Err(CornerClubError::Config(
            "Auth JWT secret is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate catalog configuration
fn validate_catalog_config(config: &super::CatalogConfig) -> Result<()> {
    if config.page_size <= 0 {
        return Err(CornerClubError::Config(
            "Catalog page size must be positive".to_string(),
        ));
    }

    Ok(())
}

/// Validate chat configuration
fn validate_chat_config(config: &super::ChatConfig) -> Result<()> {
    if config.feed_limit <= 0 {
        return Err(CornerClubError::Config(
            "Chat feed limit must be positive".to_string(),
        ));
    }

    if config.global_channel.is_empty() {
        return Err(CornerClubError::Config(
            "Global chat channel token is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    let level = config.level.to_lowercase();

    // EnvFilter directives like "info,sqlx=warn" are accepted as-is
    if !level.contains('=') && !level.contains(',') && !valid_levels.contains(&level.as_str()) {
        return Err(CornerClubError::Config(format!(
            "Invalid logging level: {}",
            config.level
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = "secret".to_string();
        settings.payment.key_id = "rzp_test_key".to_string();
        settings.payment.key_secret = "rzp_test_secret".to_string();
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_payment_credentials_rejected_when_payments_enabled() {
        let mut settings = valid_settings();
        settings.payment.key_secret = String::new();
        assert!(validate_settings(&settings).is_err());

        // With payments disabled the same settings are acceptable
        settings.features.payments = false;
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_invalid_database_url_rejected() {
        let mut settings = valid_settings();
        settings.database.url = "mysql://localhost/cornerclub".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut settings = valid_settings();
        settings.catalog.page_size = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_env_filter_directives_accepted() {
        let mut settings = valid_settings();
        settings.logging.level = "info,sqlx=warn".to_string();
        assert!(validate_settings(&settings).is_ok());
    }
}
