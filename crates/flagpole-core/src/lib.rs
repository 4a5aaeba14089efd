//! # Flagpole Core
//!
//! Core types, errors, and utilities for the Flagpole API.
//!
//! - [`errors`]: application error type, error modes and the normalizer
//! - [`password`]: bcrypt hashing and verification
//! - [`response`]: the `{status, message, data}` success envelope
//!
//! # Example
//!
//! ```ignore
//! use flagpole_core::errors::AppError;
//! use flagpole_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! let hash = hash_password("Secret1!")?;
//! ```

pub mod errors;
pub mod password;
pub mod response;

pub use errors::{AppError, ErrorMode, ErrorReport, NormalizedError, StoreViolation, TokenError};
pub use password::{hash_password, verify_password};
pub use response::ApiResponse;
