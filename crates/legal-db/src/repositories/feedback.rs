//! PostgreSQL implementation of FeedbackRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use legal_core::entities::{Feedback, FeedbackDetails};
use legal_core::error::DomainError;
use legal_core::traits::{FeedbackRepository, RepoResult};
use legal_core::value_objects::{FeedbackStatus, Snowflake};

use crate::models::{FeedbackDetailsModel, FeedbackModel};

use super::error::{ensure_affected, map_db_error};

#[derive(Clone)]
pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PgFeedbackRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Feedback>> {
        let result = sqlx::query_as::<_, FeedbackModel>(
            r"
            SELECT id, user_id, subject, message, rating, status, admin_response, responded_by,
                   responded_at, created_at, updated_at
            FROM feedback
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Feedback::from))
    }

    #[instrument(skip(self, feedback), fields(feedback_id = %feedback.id))]
    async fn create(&self, feedback: &Feedback) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO feedback (id, user_id, subject, message, rating, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(feedback.id.into_inner())
        .bind(feedback.user_id.into_inner())
        .bind(&feedback.subject)
        .bind(&feedback.message)
        .bind(feedback.rating)
        .bind(feedback.status.as_str())
        .bind(feedback.created_at)
        .bind(feedback.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, feedback), fields(feedback_id = %feedback.id))]
    async fn update(&self, feedback: &Feedback) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE feedback
            SET status = $2, admin_response = $3, responded_by = $4, responded_at = $5,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(feedback.id.into_inner())
        .bind(feedback.status.as_str())
        .bind(&feedback.admin_response)
        .bind(feedback.responded_by.map(Snowflake::into_inner))
        .bind(feedback.responded_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::FeedbackNotFound(feedback.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::FeedbackNotFound(id))
    }

    #[instrument(skip(self))]
    async fn list_detailed(&self, status: Option<FeedbackStatus>) -> RepoResult<Vec<FeedbackDetails>> {
        let rows = sqlx::query_as::<_, FeedbackDetailsModel>(
            r"
            SELECT f.id, f.user_id, f.subject, f.message, f.rating, f.status, f.admin_response,
                   f.responded_by, f.responded_at, f.created_at, f.updated_at,
                   u.name AS user_name, u.email AS user_email, u.phone AS user_phone,
                   r.name AS responder_name
            FROM feedback f
            LEFT JOIN users u ON u.id = f.user_id
            LEFT JOIN users r ON r.id = f.responded_by
            WHERE ($1::TEXT IS NULL OR f.status = $1)
            ORDER BY f.created_at DESC
            ",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(FeedbackDetails::from).collect())
    }
}
