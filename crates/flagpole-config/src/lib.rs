//! # Flagpole Config
//!
//! Configuration types for the Flagpole API, each loaded from environment variables
//! through a `from_env()` constructor that falls back to defaults:
//!
//! - [`auth`]: credential transport and the break-glass super admin credential
//! - [`cors`]: allowed origins
//! - [`jwt`]: token secret and lifetime
//! - [`rate_limit`]: per-IP request quota
//! - [`roles`]: role strings and the [`Role`] enumeration
//! - [`server`]: port, environment, metrics and log directory
//!
//! # Example
//!
//! ```ignore
//! use flagpole_config::{JwtConfig, RolesConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let roles = RolesConfig::from_env();
//! let server = ServerConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod roles;
pub mod server;

pub use auth::{AuthConfig, AuthTransport};
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use roles::{Role, RolesConfig};
pub use server::{Environment, ServerConfig};
