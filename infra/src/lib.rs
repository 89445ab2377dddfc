//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Vigil backend.
//! It provides the Redis counter store behind the login rate limiter and
//! wires configuration, logging and the token engine together at startup.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client with retry logic
//! - **Services**: Redis implementation of the core `CounterStore`
//! - **Startup**: [`initialize`] and [`InfrastructureServices`]

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use vg_core::repositories::{CounterStore, SessionRepository};
use vg_core::services::token::{
    signature_cache_from_config, Clock, MediaTokenService, SignatureCache, SignatureCacheSweeper,
    Signer, SystemClock, TokenService, TokenServiceConfig,
};
use vg_core::{DomainError, RateLimiter, SessionService, SessionServiceConfig};
use vg_shared::config::{AppConfig, Environment, FailMode};
use vg_shared::{init_logging, ConfigError};

/// Cache module - Redis client and operations
pub mod cache;

/// Services module - Infrastructure service implementations
pub mod services;

use cache::RedisClient;
use services::RedisCounterStore;

/// Token services built from one signer, cache and clock
#[derive(Clone)]
pub struct TokenEngine {
    pub tokens: Arc<TokenService>,
    pub media: Arc<MediaTokenService>,
    pub signature_cache: Arc<dyn SignatureCache>,
}

impl TokenEngine {
    /// Build the token services for `config`
    ///
    /// Fails when the signing secret is empty.
    pub fn from_config(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, InfrastructureError> {
        let signer = Arc::new(Signer::from_config(&config.auth)?);
        let signature_cache = signature_cache_from_config(&config.signature_cache);
        let token_config = TokenServiceConfig::from_auth_config(&config.auth);

        let media = Arc::new(MediaTokenService::new(
            signer.clone(),
            clock.clone(),
            token_config.media_skew_minutes,
        ));
        let tokens = Arc::new(TokenService::new(
            signer,
            signature_cache.clone(),
            clock,
            token_config,
        ));

        Ok(Self {
            tokens,
            media,
            signature_cache,
        })
    }

    /// Session service over an external session store and a counter store
    pub fn session_service<S, C>(
        &self,
        config: &AppConfig,
        sessions: Arc<S>,
        rate_limiter: Arc<RateLimiter<C>>,
    ) -> SessionService<S, C>
    where
        S: SessionRepository,
        C: CounterStore,
    {
        SessionService::new(
            sessions,
            self.tokens.clone(),
            rate_limiter,
            SessionServiceConfig::from_expiry(&config.auth.tokens),
        )
    }
}

/// Infrastructure service container
pub struct InfrastructureServices {
    pub config: AppConfig,
    pub engine: TokenEngine,
    pub redis: Arc<RedisClient>,
    pub rate_limiter: Arc<RateLimiter<RedisCounterStore>>,
    sweeper: Option<JoinHandle<()>>,
}

impl InfrastructureServices {
    /// Connect to Redis, build the token engine and start the cache sweeper
    pub async fn new(config: AppConfig) -> Result<Self, InfrastructureError> {
        let engine = TokenEngine::from_config(&config, Arc::new(SystemClock))?;

        let redis = Arc::new(RedisClient::new(config.redis.clone()).await?);
        let counter_store = Arc::new(RedisCounterStore::new(redis.clone()));
        let rate_limiter = Arc::new(RateLimiter::new(counter_store, config.rate_limit.clone()));

        let sweeper = Arc::new(SignatureCacheSweeper::new(
            engine.signature_cache.clone(),
            config.signature_cache.clone(),
        ))
        .start_background_task();

        Ok(Self {
            config,
            engine,
            redis,
            rate_limiter,
            sweeper,
        })
    }

    /// Session service backed by `sessions` and the Redis rate limiter
    pub fn session_service<S: SessionRepository>(
        &self,
        sessions: Arc<S>,
    ) -> SessionService<S, RedisCounterStore> {
        self.engine
            .session_service(&self.config, sessions, self.rate_limiter.clone())
    }

    /// Stop background tasks
    pub fn shutdown(&mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.abort();
        }
    }
}

impl Drop for InfrastructureServices {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - Environment variables from `.env.<environment>` and `.env` when present
/// - Application configuration; a missing signing secret is fatal
/// - Logging
/// - Token engine, Redis connection and rate limiter
pub async fn initialize() -> Result<InfrastructureServices, InfrastructureError> {
    // Environment-specific file takes precedence over .env
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_logging(&config.logging)?;

    info!(environment = %config.environment, "Initializing infrastructure services...");
    if config.environment.is_production() && config.rate_limit.fail_mode == FailMode::Open {
        warn!("Rate limiter fails open in production; attempts are unlimited while Redis is down");
    }
    let services = InfrastructureServices::new(config).await?;
    info!("Infrastructure services initialized successfully");

    Ok(services)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration loading error
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Domain error raised while building services
    #[error(transparent)]
    Domain(#[from] DomainError),
}
