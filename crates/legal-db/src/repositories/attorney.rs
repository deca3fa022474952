//! PostgreSQL implementation of AttorneyRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use legal_core::entities::Attorney;
use legal_core::error::DomainError;
use legal_core::traits::{AttorneyRepository, RepoResult};
use legal_core::value_objects::Snowflake;

use crate::models::AttorneyModel;

use super::error::{ensure_affected, map_db_error, map_unique_violation};

const ATTORNEY_COLUMNS: &str = "id, user_id, name, email, phone, gender, address, date_of_birth, \
     specialization, qualification, experience, fees, profile_picture, practice, created_at, updated_at";

/// PostgreSQL implementation of AttorneyRepository
#[derive(Clone)]
pub struct PgAttorneyRepository {
    pool: PgPool,
}

impl PgAttorneyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttorneyRepository for PgAttorneyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Attorney>> {
        let query = format!("SELECT {ATTORNEY_COLUMNS} FROM attorneys WHERE id = $1");
        let result = sqlx::query_as::<_, AttorneyModel>(&query)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Attorney::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Attorney>> {
        let query = format!("SELECT {ATTORNEY_COLUMNS} FROM attorneys WHERE email = $1");
        let result = sqlx::query_as::<_, AttorneyModel>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Attorney::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM attorneys WHERE email = $1)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, attorney, password_hash), fields(attorney_id = %attorney.id))]
    async fn create(&self, attorney: &Attorney, password_hash: Option<&str>) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO attorneys (id, user_id, name, email, password_hash, phone, gender, address,
                                   date_of_birth, specialization, qualification, experience, fees,
                                   profile_picture, practice, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ",
        )
        .bind(attorney.id.into_inner())
        .bind(attorney.user_id.map(Snowflake::into_inner))
        .bind(&attorney.name)
        .bind(&attorney.email)
        .bind(password_hash)
        .bind(&attorney.phone)
        .bind(attorney.gender.map(|g| g.as_str()))
        .bind(&attorney.address)
        .bind(attorney.date_of_birth)
        .bind(&attorney.specialization)
        .bind(&attorney.qualification)
        .bind(attorney.experience)
        .bind(attorney.fees)
        .bind(&attorney.profile_picture)
        .bind(Json(&attorney.practice))
        .bind(attorney.created_at)
        .bind(attorney.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, attorney), fields(attorney_id = %attorney.id))]
    async fn update(&self, attorney: &Attorney) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE attorneys
            SET name = $2, email = $3, phone = $4, gender = $5, address = $6, date_of_birth = $7,
                specialization = $8, qualification = $9, experience = $10, fees = $11,
                profile_picture = $12, practice = $13, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(attorney.id.into_inner())
        .bind(&attorney.name)
        .bind(&attorney.email)
        .bind(&attorney.phone)
        .bind(attorney.gender.map(|g| g.as_str()))
        .bind(&attorney.address)
        .bind(attorney.date_of_birth)
        .bind(&attorney.specialization)
        .bind(&attorney.qualification)
        .bind(attorney.experience)
        .bind(attorney.fees)
        .bind(&attorney.profile_picture)
        .bind(Json(&attorney.practice))
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        ensure_affected(result.rows_affected(), || DomainError::AttorneyNotFound(attorney.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM attorneys WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::AttorneyNotFound(id))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, Option<String>>(
            "SELECT password_hash FROM attorneys WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.flatten())
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE attorneys SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::AttorneyNotFound(id))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Attorney>> {
        let query = format!("SELECT {ATTORNEY_COLUMNS} FROM attorneys ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, AttorneyModel>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Attorney::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attorneys")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
