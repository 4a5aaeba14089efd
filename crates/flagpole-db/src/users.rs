use async_trait::async_trait;
use sqlx::PgPool;

use flagpole_models::{NewUser, OrganizationId, User, UserId, UserWithPassword};

use crate::Result;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User>;
    async fn find_active_by_id(&self, id: UserId) -> Result<Option<User>>;
    async fn find_active_by_email(&self, email: &str) -> Result<Option<UserWithPassword>>;
    /// Soft-deletes a user, restricted to `organization_id` when given.
    async fn soft_delete(&self, id: UserId, organization_id: Option<OrganizationId>)
    -> Result<u64>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, role, organization_id, status)
            VALUES ($1, $2, $3, $4, 'Y')
            RETURNING id, email, role, organization_id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(user.organization_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_active_by_id(&self, id: UserId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, role, organization_id
            FROM users
            WHERE id = $1 AND status = 'Y'
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<UserWithPassword>> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            r#"
            SELECT id, email, password, role, organization_id
            FROM users
            WHERE email = $1 AND status = 'Y'
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn soft_delete(
        &self,
        id: UserId,
        organization_id: Option<OrganizationId>,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET status = 'N', updated_at = NOW()
            WHERE id = $1
              AND status = 'Y'
              AND ($2::BIGINT IS NULL OR organization_id = $2)
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
