//! Services module
//!
//! This module contains business logic services

pub mod booking;
pub mod catalog;
pub mod chat;
pub mod favorites;
pub mod payment;
pub mod profile;
pub mod redis;

// Re-export commonly used services
pub use booking::{BookingIntent, BookingService};
pub use catalog::CatalogService;
pub use chat::{ChatService, ChatSubscription};
pub use favorites::FavoritesService;
pub use payment::{PaymentGateway, PaymentOrder};
pub use profile::ProfileService;
pub use redis::RedisService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub catalog_service: CatalogService,
    pub booking_service: BookingService,
    pub profile_service: ProfileService,
    pub favorites_service: FavoritesService,
    pub chat_service: ChatService,
    pub payment_service: PaymentGateway,
    pub redis_service: RedisService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: DatabaseService, settings: Settings) -> Result<Self> {
        let redis_service = RedisService::new(settings.clone())?;
        let payment_service = PaymentGateway::new(settings.clone())?;
        let profile_service = ProfileService::new(database.users.clone());
        let catalog_service = CatalogService::new(
            database.events.clone(),
            database.users.clone(),
            redis_service.clone(),
            settings.clone(),
        );
        let booking_service = BookingService::new(
            database.clone(),
            profile_service.clone(),
            payment_service.clone(),
            settings.clone(),
        );
        let favorites_service =
            FavoritesService::new(database.favorites.clone(), database.events.clone());
        let chat_service = ChatService::new(database, redis_service.clone(), settings);

        Ok(Self {
            catalog_service,
            booking_service,
            profile_service,
            favorites_service,
            chat_service,
            payment_service,
            redis_service,
        })
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let redis_healthy = self.redis_service.health_check().await.unwrap_or(false);
        let payments_enabled = self.payment_service.is_enabled();

        ServiceHealthStatus {
            redis_healthy,
            payments_enabled,
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub redis_healthy: bool,
    pub payments_enabled: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.redis_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.redis_healthy {
            issues.push("Redis connection failed".to_string());
        }

        issues
    }
}
