//! Principal roles.
//!
//! Deployments name their roles through `SUPER_ADMIN_ROLE`, `ORG_ADMIN_ROLE` and
//! `END_USER_ROLE`. The strings are resolved once at startup; everything past the
//! token and the store works with [`Role`].

use std::env;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    SuperAdmin,
    OrgAdmin,
    EndUser,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::SuperAdmin => "super admin",
            Role::OrgAdmin => "organization admin",
            Role::EndUser => "end user",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RolesConfig {
    pub super_admin: String,
    pub org_admin: String,
    pub end_user: String,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            super_admin: "SUPER_ADMIN".to_string(),
            org_admin: "ORG_ADMIN".to_string(),
            end_user: "END_USER".to_string(),
        }
    }
}

impl RolesConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            super_admin: env::var("SUPER_ADMIN_ROLE").unwrap_or(defaults.super_admin),
            org_admin: env::var("ORG_ADMIN_ROLE").unwrap_or(defaults.org_admin),
            end_user: env::var("END_USER_ROLE").unwrap_or(defaults.end_user),
        }
    }

    /// Maps a stored or claimed role string to a [`Role`]. Unknown strings yield `None`.
    pub fn resolve(&self, name: &str) -> Option<Role> {
        if name == self.super_admin {
            Some(Role::SuperAdmin)
        } else if name == self.org_admin {
            Some(Role::OrgAdmin)
        } else if name == self.end_user {
            Some(Role::EndUser)
        } else {
            None
        }
    }

    pub fn name_of(&self, role: Role) -> &str {
        match role {
            Role::SuperAdmin => &self.super_admin,
            Role::OrgAdmin => &self.org_admin,
            Role::EndUser => &self.end_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_names() {
        let roles = RolesConfig::default();
        assert_eq!(roles.resolve("SUPER_ADMIN"), Some(Role::SuperAdmin));
        assert_eq!(roles.resolve("ORG_ADMIN"), Some(Role::OrgAdmin));
        assert_eq!(roles.resolve("END_USER"), Some(Role::EndUser));
        assert_eq!(roles.resolve("end_user"), None);
        assert_eq!(roles.resolve(""), None);
    }

    #[test]
    fn test_custom_names_round_trip() {
        let roles = RolesConfig {
            super_admin: "root".into(),
            org_admin: "admin".into(),
            end_user: "member".into(),
        };
        for role in [Role::SuperAdmin, Role::OrgAdmin, Role::EndUser] {
            assert_eq!(roles.resolve(roles.name_of(role)), Some(role));
        }
        assert_eq!(roles.resolve("SUPER_ADMIN"), None);
    }
}
