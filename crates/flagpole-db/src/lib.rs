//! # Flagpole DB
//!
//! Credential store for the Flagpole API: the PostgreSQL pool, embedded migrations and
//! one repository trait per aggregate.
//!
//! Repositories return [`AppError`]. Driver failures travel inside it untouched so the
//! error normalizer can recognise constraint violations; the in-memory store reports
//! the same violations as [`flagpole_core::StoreViolation`].
//!
//! Every read and mutation only sees rows whose `status` is `'Y'`.
//!
//! # Example
//!
//! ```ignore
//! use flagpole_db::{Store, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! let store = Store::postgres(pool);
//! ```

use std::env;
use std::fmt;
use std::sync::Arc;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

use flagpole_core::AppError;

pub mod feature_flags;
#[cfg(feature = "test-utils")]
pub mod memory;
pub mod organizations;
pub mod users;

pub use feature_flags::{FeatureFlagRepository, PgFeatureFlagRepository};
#[cfg(feature = "test-utils")]
pub use memory::MemoryStore;
pub use organizations::{OrganizationRepository, PgOrganizationRepository};
pub use sqlx::PgPool;
pub use users::{PgUserRepository, UserRepository};

pub type Result<T> = std::result::Result<T, AppError>;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Connects to `DATABASE_URL` with at most `DATABASE_MAX_CONNECTIONS` connections.
///
/// # Errors
///
/// Fails when `DATABASE_URL` is unset or the database cannot be reached.
pub async fn init_db_pool() -> std::result::Result<PgPool, sqlx::Error> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    tracing::info!(max_connections, "Database pool ready");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> std::result::Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!(migrations = MIGRATOR.iter().count(), "Migrations applied");
    Ok(())
}

/// The repositories a request handler can reach.
#[derive(Clone)]
pub struct Store {
    pub organizations: Arc<dyn OrganizationRepository>,
    pub users: Arc<dyn UserRepository>,
    pub feature_flags: Arc<dyn FeatureFlagRepository>,
}

impl Store {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            organizations: Arc::new(PgOrganizationRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            feature_flags: Arc::new(PgFeatureFlagRepository::new(pool)),
        }
    }

    #[cfg(feature = "test-utils")]
    pub fn in_memory() -> Self {
        let store = MemoryStore::default();
        Self {
            organizations: Arc::new(store.clone()),
            users: Arc::new(store.clone()),
            feature_flags: Arc::new(store),
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
