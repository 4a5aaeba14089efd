pub mod auth;
pub mod feature_flags;
pub mod health;
pub mod organizations;
pub mod users;
