//! Redis client implementation
//!
//! This module provides a Redis client with a multiplexed connection, retry
//! logic and the counter operations used for failed-attempt rate limiting.
//! Keys are namespaced with the configured prefix.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use vg_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Redis client with retry logic
///
/// Cloning is cheap; clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Arguments
    /// * `config` - Connection URL, retry policy and key prefix
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            config.max_retries,
            config.retry_delay_ms,
            Duration::from_secs(config.connection_timeout),
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
        connect_timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = tokio::time::timeout(connect_timeout, client.get_multiplexed_async_connection())
                .await
                .unwrap_or_else(|_| {
                    Err(RedisError::from(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "connection timed out",
                    )))
                });

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Namespaced key for `key`
    pub fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// Atomically increment a counter, creating it at zero first
    ///
    /// Connection errors are not retried: the server may already have applied
    /// the increment, and a second attempt would count it twice.
    ///
    /// # Returns
    /// * `Result<i64, InfrastructureError>` - Value after the increment
    pub async fn increment(&self, key: &str) -> Result<i64, InfrastructureError> {
        let key = self.key(key);
        debug!("Incrementing counter '{}'", key);

        let result = self
            .execute_with_retry(false, |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.incr::<_, _, i64>(key, 1).await })
            })
            .await;

        result.map_err(|e| {
            error!("Failed to increment counter '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Set the time to live of a key
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - Whether the key existed
    pub async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool, InfrastructureError> {
        let key = self.key(key);
        debug!("Setting expiry of '{}' to {}s", key, ttl_seconds);

        let result = self
            .execute_with_retry(true, |mut conn| {
                let key = key.clone();
                Box::pin(async move {
                    redis::cmd("EXPIRE")
                        .arg(key)
                        .arg(ttl_seconds)
                        .query_async::<_, bool>(&mut conn)
                        .await
                })
            })
            .await;

        result.map_err(|e| {
            error!("Failed to set expiry of '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Delete a key
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - Whether a key was removed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = self.key(key);
        debug!("Deleting key '{}'", key);

        let result = self
            .execute_with_retry(true, |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await;

        match result {
            Ok(deleted_count) => Ok(deleted_count > 0),
            Err(e) => {
                error!("Failed to delete key '{}': {}", key, e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Remaining time to live of a key in seconds, `None` when missing or persistent
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let key = self.key(key);

        let result = self
            .execute_with_retry(true, |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await;

        match result {
            Ok(ttl) if ttl >= 0 => Ok(Some(ttl)),
            Ok(_) => Ok(None),
            Err(e) => {
                error!("Failed to get TTL for key '{}': {}", key, e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Whether a key exists without a time to live
    pub async fn is_persistent(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = self.key(key);

        let result = self
            .execute_with_retry(true, |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await;

        // TTL answers -1 for a key without expiry and -2 for a missing key
        result.map(|ttl| ttl == -1).map_err(|e| {
            error!("Failed to get TTL for key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Check that Redis answers PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let result = self
            .execute_with_retry(true, |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => Ok(true),
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Run an operation, retrying transient failures with exponential backoff
    ///
    /// Non-idempotent operations are only retried when the server refused
    /// them outright.
    async fn execute_with_retry<F, T>(&self, idempotent: bool, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.config.max_retries && is_retriable_error(&e, idempotent) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.config.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether a Redis error is worth retrying
pub(crate) fn is_retriable_error(error: &RedisError, idempotent: bool) -> bool {
    match error.kind() {
        // Rejected before the command ran
        redis::ErrorKind::BusyLoadingError | redis::ErrorKind::TryAgain => true,
        // The command may have been applied before the failure
        redis::ErrorKind::IoError | redis::ErrorKind::ClientError => idempotent,
        _ => false,
    }
}

/// Hide credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.find('@'), url.find("://")) {
        let proto = &url[..proto_end + 3];
        let host_part = &url[at_pos..];
        return format!("{}****{}", proto, host_part);
    }
    url.to_string()
}
