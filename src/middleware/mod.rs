//! Middleware for request processing.
//!
//! - [`auth`]: token extraction, the authentication stage and the [`Principal`]
//! - [`errors`]: the terminal error normalizer and the unmatched-route fallback
//! - [`pipeline`]: ordered stages with first-failure-wins semantics
//! - [`rate_limit`]: per-IP request quota
//! - [`role`]: the authorization stage and the `require_*` route guards
//!
//! # Request flow
//!
//! 1. `rate_limit` rejects clients over their quota
//! 2. A `require_*` guard runs `Authenticate` then `Authorize`
//! 3. `ValidatedJson`/`ValidatedPath` extractors validate the input
//! 4. The handler runs with the [`CurrentPrincipal`]
//! 5. `normalize_errors` renders any failure

pub mod auth;
pub mod errors;
pub mod pipeline;
pub mod rate_limit;
pub mod role;

pub use auth::{CurrentPrincipal, Principal};
