//! # Flagpole CLI
//!
//! Operator tooling: organization and account creation plus database seeding for
//! development.
//!
//! ## Usage
//!
//! ```ignore
//! use flagpole_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(10); // 10 organizations with defaults
//! seed_all(&pool, &roles, config).await?;
//! ```

pub mod accounts;
pub mod seeder;
