//! Seed rows and seeding configuration.

use flagpole_models::{OrganizationId, UserId};

/// Seeded organization names start with this marker so `clear-seed` can find them.
pub const SEED_ORGANIZATION_PREFIX: &str = "[seed] ";
pub const SEED_EMAIL_DOMAIN: &str = "seed.flagpole.test";
/// Password of every seeded account.
pub const SEED_PASSWORD: &str = "Seed1!pass";

pub struct OrganizationSeed {
    pub name: String,
}

pub struct UserSeed {
    pub email: String,
    pub role: String,
    pub organization_id: OrganizationId,
}

pub struct FeatureFlagSeed {
    pub feature_key: String,
    pub is_enabled: bool,
    pub organization_id: OrganizationId,
    pub created_by: UserId,
}

/// Accounts created in every seeded organization.
#[derive(Clone)]
pub struct UsersPerOrganization {
    pub admins: usize,
    pub end_users: usize,
}

impl Default for UsersPerOrganization {
    fn default() -> Self {
        Self {
            admins: 1,
            end_users: 10,
        }
    }
}

#[derive(Clone)]
pub struct SeedConfig {
    pub organizations: usize,
    pub users: UsersPerOrganization,
    pub flags_per_organization: usize,
}

impl SeedConfig {
    pub fn new(organizations: usize) -> Self {
        Self {
            organizations,
            users: UsersPerOrganization::default(),
            flags_per_organization: 5,
        }
    }

    pub fn with_users(mut self, users: UsersPerOrganization) -> Self {
        self.users = users;
        self
    }

    pub fn with_flags(mut self, flags_per_organization: usize) -> Self {
        self.flags_per_organization = flags_per_organization;
        self
    }

    pub fn total_users(&self) -> usize {
        self.organizations * (self.users.admins + self.users.end_users)
    }
}
