//! PostgreSQL implementation of LegalServiceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use legal_core::entities::LegalService;
use legal_core::error::DomainError;
use legal_core::traits::{LegalServiceRepository, RepoResult};
use legal_core::value_objects::Snowflake;

use crate::models::LegalServiceModel;

use super::error::{ensure_affected, map_db_error, map_unique_violation};

const SERVICE_COLUMNS: &str = "id, service_name, description, price, category, icon, icon_file, \
     is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PgLegalServiceRepository {
    pool: PgPool,
}

impl PgLegalServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LegalServiceRepository for PgLegalServiceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LegalService>> {
        let query = format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1");
        let result = sqlx::query_as::<_, LegalServiceModel>(&query)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(LegalService::from))
    }

    #[instrument(skip(self))]
    async fn name_taken(&self, name: &str, exclude: Option<Snowflake>) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM services
                WHERE service_name = $1 AND is_active AND ($2::BIGINT IS NULL OR id <> $2)
            )
            ",
        )
        .bind(name)
        .bind(exclude.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, service), fields(service_id = %service.id))]
    async fn create(&self, service: &LegalService) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO services (id, service_name, description, price, category, icon, icon_file,
                                  is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(service.id.into_inner())
        .bind(&service.service_name)
        .bind(&service.description)
        .bind(service.price)
        .bind(service.category.as_str())
        .bind(&service.icon)
        .bind(&service.icon_file)
        .bind(service.is_active)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateRecord))?;

        Ok(())
    }

    #[instrument(skip(self, service), fields(service_id = %service.id))]
    async fn update(&self, service: &LegalService) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE services
            SET service_name = $2, description = $3, price = $4, category = $5, icon = $6,
                icon_file = $7, is_active = $8, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(service.id.into_inner())
        .bind(&service.service_name)
        .bind(&service.description)
        .bind(service.price)
        .bind(service.category.as_str())
        .bind(&service.icon)
        .bind(&service.icon_file)
        .bind(service.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateRecord))?;

        ensure_affected(result.rows_affected(), || DomainError::ServiceNotFound(service.id))
    }

    #[instrument(skip(self))]
    async fn list_active(&self) -> RepoResult<Vec<LegalService>> {
        let query = format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE is_active = TRUE ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, LegalServiceModel>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(LegalService::from).collect())
    }
}
