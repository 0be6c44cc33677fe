//! Redis integration service implementation
//!
//! This service handles Redis connection setup, JSON caching with TTLs,
//! counter-based rate limiting, and pub/sub publishing for chat fan-out.

use redis::{AsyncCommands, Client, RedisResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Redis service for caching, counters, and pub/sub
#[derive(Clone)]
#[derive(Debug)]
pub struct RedisService {
    client: Client,
    settings: Settings,
}

impl RedisService {
    /// Create a new RedisService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::open(settings.redis.url.as_str())?;

        Ok(Self { client, settings })
    }

    /// Underlying client, for consumers that manage their own connections
    /// (the chat subscription stream opens a dedicated pub/sub connection)
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get Redis connection
    async fn get_connection(&self) -> Result<redis::aio::Connection> {
        Ok(self.client.get_async_connection().await?)
    }

    /// Prefixed key for this deployment
    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.settings.redis.prefix, key)
    }

    /// Set a value in Redis with TTL
    pub async fn set<T>(&self, key: &str, value: &T, ttl_seconds: Option<u64>) -> Result<()>
    where
        T: Serialize,
    {
        let mut conn = self.get_connection().await?;
        let serialized = serde_json::to_string(value)?;

        let full_key = self.full_key(key);
        let ttl = ttl_seconds.unwrap_or(self.settings.redis.ttl_seconds);

        let _: () = conn.set_ex(&full_key, serialized, ttl).await?;

        debug!(key = %full_key, ttl = ttl, "Value set in Redis");
        Ok(())
    }

    /// Get a value from Redis
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut conn = self.get_connection().await?;
        let full_key = self.full_key(key);

        let result: Option<String> = conn.get(&full_key).await?;

        match result {
            Some(data) => {
                let deserialized = serde_json::from_str::<T>(&data)?;
                debug!(key = %full_key, "Value retrieved from Redis");
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// Delete a key from Redis
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let full_key = self.full_key(key);

        let deleted: i32 = conn.del(&full_key).await?;

        debug!(key = %full_key, deleted = deleted > 0, "Key deletion attempted");
        Ok(deleted > 0)
    }

    /// Delete all keys matching a pattern
    pub async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        let mut conn = self.get_connection().await?;
        let full_pattern = self.full_key(pattern);

        let keys: Vec<String> = conn.keys(&full_pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }

        let deleted: u64 = conn.del(&keys).await?;

        info!(pattern = %pattern, deleted = deleted, "Keys deleted by pattern");
        Ok(deleted)
    }

    /// Publish a JSON payload to a pub/sub channel
    pub async fn publish<T>(&self, channel: &str, payload: &T) -> Result<()>
    where
        T: Serialize,
    {
        let mut conn = self.get_connection().await?;
        let serialized = serde_json::to_string(payload)?;
        let full_channel = self.full_key(channel);

        let _: () = redis::cmd("PUBLISH")
            .arg(&full_channel)
            .arg(serialized)
            .query_async(&mut conn)
            .await?;

        debug!(channel = %full_channel, "Message published");
        Ok(())
    }

    /// Fully-prefixed pub/sub channel name, for subscribers
    pub fn channel_name(&self, channel: &str) -> String {
        self.full_key(channel)
    }

    /// Increment a counter with TTL
    pub async fn increment_with_ttl(&self, key: &str, ttl_seconds: u64) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        let full_key = self.full_key(key);

        // Use a pipeline to ensure atomicity
        let (value,): (i64,) = redis::pipe()
            .incr(&full_key, 1)
            .expire(&full_key, ttl_seconds as i64)
            .query_async(&mut conn)
            .await?;

        debug!(key = %full_key, value = value, ttl = ttl_seconds, "Counter incremented with TTL");
        Ok(value)
    }

    /// Rate limiting check
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        limit: u64,
        window_seconds: u64,
    ) -> Result<bool> {
        let key = format!("rate_limit:{}", identifier);
        let current_count = self.increment_with_ttl(&key, window_seconds).await?;

        let allowed = current_count <= limit as i64;
        debug!(
            identifier = %identifier,
            current_count = current_count,
            limit = limit,
            allowed = allowed,
            "Rate limit check"
        );

        Ok(allowed)
    }

    /// Health check for Redis connection
    pub async fn health_check(&self) -> Result<bool> {
        match self.get_connection().await {
            Ok(mut conn) => {
                let result: RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
                match result {
                    Ok(response) => Ok(response == "PONG"),
                    Err(e) => {
                        warn!(error = %e, "Redis health check failed");
                        Ok(false)
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Redis connection failed");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_service_creation() {
        let settings = Settings::default();
        let result = RedisService::new(settings);
        assert!(result.is_ok());
    }

    #[test]
    fn test_key_prefixing() {
        let mut settings = Settings::default();
        settings.redis.prefix = "cc:".to_string();
        let service = RedisService::new(settings).unwrap();

        assert_eq!(service.full_key("chat:event:1"), "cc:chat:event:1");
        assert_eq!(service.channel_name("chat:event:1"), "cc:chat:event:1");
    }
}
