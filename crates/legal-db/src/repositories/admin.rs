//! PostgreSQL implementation of AdminRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use legal_core::entities::{Admin, AdminAccount, AdminLogin};
use legal_core::error::DomainError;
use legal_core::traits::{AdminRepository, RepoResult};
use legal_core::value_objects::Snowflake;

use crate::models::{AdminAccountModel, AdminLoginModel, AdminModel};

use super::error::{ensure_affected, map_db_error, map_unique_violation};

const ACCOUNT_SELECT: &str = r"
    SELECT ad.id, ad.user_id, ad.permissions, ad.last_login_at, ad.login_count,
           ad.created_at, ad.updated_at, u.name, u.email
    FROM admins ad
    JOIN users u ON u.id = ad.user_id
";

/// PostgreSQL implementation of AdminRepository
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn accounts(&self, order_by: &str) -> RepoResult<Vec<AdminAccount>> {
        let query = format!("{ACCOUNT_SELECT} ORDER BY {order_by}");
        let rows = sqlx::query_as::<_, AdminAccountModel>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AdminAccount::from).collect())
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Admin>> {
        let result = sqlx::query_as::<_, AdminModel>(
            r"
            SELECT id, user_id, permissions, last_login_at, login_count, created_at, updated_at
            FROM admins
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Admin::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user_id(&self, user_id: Snowflake) -> RepoResult<Option<Admin>> {
        let result = sqlx::query_as::<_, AdminModel>(
            r"
            SELECT id, user_id, permissions, last_login_at, login_count, created_at, updated_at
            FROM admins
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Admin::from))
    }

    #[instrument(skip(self, admin), fields(admin_id = %admin.id))]
    async fn create(&self, admin: &Admin) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO admins (id, user_id, permissions, last_login_at, login_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(admin.id.into_inner())
        .bind(admin.user_id.into_inner())
        .bind(admin.permissions.to_i64())
        .bind(admin.last_login_at)
        .bind(admin.login_count)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateRecord))?;

        Ok(())
    }

    #[instrument(skip(self, admin), fields(admin_id = %admin.id))]
    async fn update(&self, admin: &Admin) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE admins
            SET permissions = $2, last_login_at = $3, login_count = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(admin.id.into_inner())
        .bind(admin.permissions.to_i64())
        .bind(admin.last_login_at)
        .bind(admin.login_count)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::AdminNotFound(admin.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::AdminNotFound(id))
    }

    #[instrument(skip(self))]
    async fn list_accounts(&self) -> RepoResult<Vec<AdminAccount>> {
        self.accounts("ad.created_at DESC").await
    }

    #[instrument(skip(self))]
    async fn list_accounts_by_last_login(&self) -> RepoResult<Vec<AdminAccount>> {
        self.accounts("ad.last_login_at DESC NULLS LAST, ad.created_at DESC").await
    }

    #[instrument(skip(self, login), fields(admin_id = %login.admin_id))]
    async fn record_login(&self, login: &AdminLogin) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO admin_logins (id, admin_id, login_time, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(login.id.into_inner())
        .bind(login.admin_id.into_inner())
        .bind(login.login_time)
        .bind(&login.ip_address)
        .bind(&login.user_agent)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn recent_logins(&self, admin_id: Snowflake, limit: i64) -> RepoResult<Vec<AdminLogin>> {
        let rows = sqlx::query_as::<_, AdminLoginModel>(
            r"
            SELECT id, admin_id, login_time, ip_address, user_agent
            FROM admin_logins
            WHERE admin_id = $1
            ORDER BY login_time DESC
            LIMIT $2
            ",
        )
        .bind(admin_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AdminLogin::from).collect())
    }
}
