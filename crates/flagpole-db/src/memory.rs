//! In-memory repositories enforcing the same constraints as the migrations: active
//! names, emails and per-organization feature keys are unique, and references must
//! point at existing rows.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use flagpole_core::{AppError, StoreViolation};
use flagpole_models::{
    FeatureFlag, FeatureFlagId, NewFeatureFlag, NewUser, Organization, OrganizationId, User,
    UserId, UserWithPassword,
};

use crate::Result;
use crate::feature_flags::FeatureFlagRepository;
use crate::organizations::OrganizationRepository;
use crate::users::UserRepository;

#[derive(Debug, Clone)]
struct OrganizationRow {
    id: OrganizationId,
    name: String,
    active: bool,
}

#[derive(Debug, Clone)]
struct UserRow {
    id: UserId,
    email: String,
    password: String,
    role: String,
    organization_id: OrganizationId,
    active: bool,
}

#[derive(Debug, Clone)]
struct FeatureFlagRow {
    id: FeatureFlagId,
    feature_key: String,
    is_enabled: bool,
    organization_id: OrganizationId,
    created_by: UserId,
    updated_by: Option<UserId>,
    deleted_by: Option<UserId>,
    active: bool,
}

#[derive(Debug, Default)]
struct Tables {
    organizations: Vec<OrganizationRow>,
    users: Vec<UserRow>,
    feature_flags: Vec<FeatureFlagRow>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn organization_exists(&self, id: OrganizationId) -> bool {
        self.organizations.iter().any(|o| o.id == id)
    }

    fn user_exists(&self, id: UserId) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn require_user(&self, id: UserId, column: &str) -> Result<()> {
        if self.user_exists(id) {
            Ok(())
        } else {
            Err(AppError::from(StoreViolation::ForeignKey(format!(
                "feature_flags.{column} references missing user {id}"
            ))))
        }
    }
}

/// Shared tables behind every repository trait. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl UserRow {
    fn to_user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            role: self.role.clone(),
            organization_id: self.organization_id,
        }
    }
}

impl FeatureFlagRow {
    fn to_flag(&self) -> FeatureFlag {
        FeatureFlag {
            id: self.id,
            feature_key: self.feature_key.clone(),
            is_enabled: self.is_enabled,
        }
    }
}

#[async_trait]
impl OrganizationRepository for MemoryStore {
    async fn create(&self, name: &str) -> Result<Organization> {
        let mut tables = self.tables.write().await;

        if tables.organizations.iter().any(|o| o.active && o.name == name) {
            return Err(AppError::from(StoreViolation::Duplicate(format!(
                "organization name '{name}' already exists"
            ))));
        }

        let id = OrganizationId(tables.next_id());
        tables.organizations.push(OrganizationRow {
            id,
            name: name.to_string(),
            active: true,
        });

        Ok(Organization {
            id,
            name: name.to_string(),
        })
    }

    async fn list_active(&self) -> Result<Vec<Organization>> {
        let tables = self.tables.read().await;
        Ok(tables
            .organizations
            .iter()
            .filter(|o| o.active)
            .map(|o| Organization {
                id: o.id,
                name: o.name.clone(),
            })
            .collect())
    }

    async fn exists_active(&self, id: OrganizationId) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.organizations.iter().any(|o| o.id == id && o.active))
    }

    async fn soft_delete(&self, id: OrganizationId) -> Result<u64> {
        let mut tables = self.tables.write().await;
        let mut affected = 0;
        for row in tables
            .organizations
            .iter_mut()
            .filter(|o| o.id == id && o.active)
        {
            row.active = false;
            affected += 1;
        }
        Ok(affected)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;

        if !tables.organization_exists(user.organization_id) {
            return Err(AppError::from(StoreViolation::ForeignKey(format!(
                "users.organization_id references missing organization {}",
                user.organization_id
            ))));
        }

        if tables.users.iter().any(|u| u.active && u.email == user.email) {
            return Err(AppError::from(StoreViolation::Duplicate(format!(
                "email '{}' already exists",
                user.email
            ))));
        }

        let row = UserRow {
            id: UserId(tables.next_id()),
            email: user.email.clone(),
            password: user.password_hash.clone(),
            role: user.role.clone(),
            organization_id: user.organization_id,
            active: true,
        };
        let created = row.to_user();
        tables.users.push(row);

        Ok(created)
    }

    async fn find_active_by_id(&self, id: UserId) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == id && u.active)
            .map(UserRow::to_user))
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<UserWithPassword>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email == email && u.active)
            .map(|u| UserWithPassword {
                id: u.id,
                email: u.email.clone(),
                password: u.password.clone(),
                role: u.role.clone(),
                organization_id: u.organization_id,
            }))
    }

    async fn soft_delete(
        &self,
        id: UserId,
        organization_id: Option<OrganizationId>,
    ) -> Result<u64> {
        let mut tables = self.tables.write().await;
        let mut affected = 0;
        for row in tables.users.iter_mut().filter(|u| {
            u.id == id && u.active && organization_id.is_none_or(|org| u.organization_id == org)
        }) {
            row.active = false;
            affected += 1;
        }
        Ok(affected)
    }
}

#[async_trait]
impl FeatureFlagRepository for MemoryStore {
    async fn create(&self, flag: &NewFeatureFlag) -> Result<FeatureFlag> {
        let mut tables = self.tables.write().await;

        if !tables.organization_exists(flag.organization_id) {
            return Err(AppError::from(StoreViolation::ForeignKey(format!(
                "feature_flags.organization_id references missing organization {}",
                flag.organization_id
            ))));
        }
        tables.require_user(flag.created_by, "created_by")?;

        if tables.feature_flags.iter().any(|f| {
            f.active && f.organization_id == flag.organization_id && f.feature_key == flag.feature_key
        }) {
            return Err(AppError::from(StoreViolation::Duplicate(format!(
                "feature key '{}' already exists",
                flag.feature_key
            ))));
        }

        let row = FeatureFlagRow {
            id: FeatureFlagId(tables.next_id()),
            feature_key: flag.feature_key.clone(),
            is_enabled: flag.is_enabled,
            organization_id: flag.organization_id,
            created_by: flag.created_by,
            updated_by: None,
            deleted_by: None,
            active: true,
        };
        let created = row.to_flag();
        tables.feature_flags.push(row);

        Ok(created)
    }

    async fn update_enabled(
        &self,
        organization_id: OrganizationId,
        id: FeatureFlagId,
        is_enabled: bool,
        updated_by: UserId,
    ) -> Result<u64> {
        let mut tables = self.tables.write().await;
        tables.require_user(updated_by, "updated_by")?;

        let mut affected = 0;
        for row in tables
            .feature_flags
            .iter_mut()
            .filter(|f| f.id == id && f.organization_id == organization_id && f.active)
        {
            row.is_enabled = is_enabled;
            row.updated_by = Some(updated_by);
            affected += 1;
        }
        Ok(affected)
    }

    async fn soft_delete(
        &self,
        organization_id: OrganizationId,
        id: FeatureFlagId,
        deleted_by: UserId,
    ) -> Result<u64> {
        let mut tables = self.tables.write().await;
        tables.require_user(deleted_by, "deleted_by")?;

        let mut affected = 0;
        for row in tables
            .feature_flags
            .iter_mut()
            .filter(|f| f.id == id && f.organization_id == organization_id && f.active)
        {
            row.active = false;
            row.deleted_by = Some(deleted_by);
            affected += 1;
        }
        Ok(affected)
    }

    async fn list_active(&self, organization_id: OrganizationId) -> Result<Vec<FeatureFlag>> {
        let tables = self.tables.read().await;
        Ok(tables
            .feature_flags
            .iter()
            .filter(|f| f.organization_id == organization_id && f.active)
            .map(FeatureFlagRow::to_flag)
            .collect())
    }

    async fn find_active_by_key(
        &self,
        organization_id: OrganizationId,
        feature_key: &str,
    ) -> Result<Option<FeatureFlag>> {
        let tables = self.tables.read().await;
        Ok(tables
            .feature_flags
            .iter()
            .find(|f| {
                f.organization_id == organization_id && f.feature_key == feature_key && f.active
            })
            .map(FeatureFlagRow::to_flag))
    }
}
