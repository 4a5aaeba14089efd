//! # Flagpole Auth
//!
//! Token codec for the Flagpole API.
//!
//! - [`claims`]: the claim set carried by every token
//! - [`jwt`]: signing and verification
//!
//! Tokens are HS256 JWTs. Verification reports an expired token separately from every
//! other defect, and a bad signature always wins over expiry.
//!
//! # Example
//!
//! ```ignore
//! use flagpole_auth::{sign, verify};
//! use flagpole_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = sign("42", "ORG_ADMIN", Some(7), &config)?;
//! let claims = verify(&token, &config)?;
//! assert_eq!(claims.sub, "42");
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, SUPER_ADMIN_SUBJECT};
pub use jwt::{sign, sign_claims, verify};
