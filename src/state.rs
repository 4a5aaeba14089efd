use std::sync::Arc;

use anyhow::Context;

use flagpole_config::{
    AuthConfig, CorsConfig, JwtConfig, RateLimitConfig, RolesConfig, ServerConfig,
};
use flagpole_core::ErrorMode;
use flagpole_db::{Store, init_db_pool, run_migrations};

use crate::middleware::rate_limit::IpRateLimiter;

/// Every environment-driven setting the server needs.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub auth: AuthConfig,
    pub roles: RolesConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            auth: AuthConfig::from_env(),
            roles: RolesConfig::from_env(),
            cors: CorsConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            server: ServerConfig::from_env(),
        }
    }

    /// Production conceals internals, development shows them.
    pub fn error_mode(&self) -> ErrorMode {
        if self.server.environment.is_production() {
            ErrorMode::Terse
        } else {
            ErrorMode::Verbose
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<AppConfig>,
    pub rate_limiter: IpRateLimiter,
}

impl AppState {
    pub fn new(store: Store, config: AppConfig) -> Self {
        let rate_limiter = IpRateLimiter::new(&config.rate_limit);
        Self {
            store,
            config: Arc::new(config),
            rate_limiter,
        }
    }
}

/// Connects to PostgreSQL, applies pending migrations and loads configuration.
pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db_pool()
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(AppState::new(Store::postgres(pool), config))
}
