//! # Flagpole Models
//!
//! Domain records, request DTOs and their validation rules.
//!
//! # Modules
//!
//! - [`auth`]: signup, login and session payloads
//! - [`feature_flags`]: feature flag records and DTOs
//! - [`ids`]: strongly typed ids
//! - [`organizations`]: organization records and DTOs
//! - [`users`]: user records
//! - [`validation`]: custom validation rules shared by the DTOs

pub mod auth;
pub mod feature_flags;
pub mod ids;
pub mod organizations;
pub mod users;
pub mod validation;

pub use auth::{AuthResponse, LoginRequest, SessionData, SessionUser, SignupRequest, UserData};
pub use feature_flags::{
    CheckFeatureFlagDto, CreateFeatureFlagDto, FeatureFlag, FeatureFlagPath, NewFeatureFlag,
    UpdateFeatureFlagDto,
};
pub use ids::{FeatureFlagId, OrganizationId, UserId};
pub use organizations::{CreateOrganizationDto, Organization, OrganizationPath};
pub use users::{NewUser, User, UserPath, UserWithPassword};
