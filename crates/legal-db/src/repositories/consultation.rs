//! PostgreSQL implementation of ConsultationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use legal_core::entities::{Consultation, ConsultationDetails, ConsultationMessage, MessageWithSender};
use legal_core::error::DomainError;
use legal_core::traits::{ConsultationRepository, RepoResult};
use legal_core::value_objects::Snowflake;

use crate::models::{ConsultationDetailsModel, ConsultationModel, MessageWithSenderModel};

use super::error::{ensure_affected, map_db_error};

const DETAILS_SELECT: &str = r"
    SELECT c.id, c.client_id, c.attorney_id, c.subject, c.status, c.created_at, c.updated_at,
           u.name AS client_name, u.email AS client_email, u.phone AS client_phone,
           COALESCE(NULLIF(att.practice->>'attorneyName', ''), att.name) AS attorney_name,
           att.email AS attorney_email, att.phone AS attorney_phone,
           (SELECT COUNT(*) FROM consultation_messages m WHERE m.consultation_id = c.id) AS message_count
    FROM consultations c
    LEFT JOIN users u ON u.id = c.client_id
    LEFT JOIN attorneys att ON att.id = c.attorney_id
";

#[derive(Clone)]
pub struct PgConsultationRepository {
    pool: PgPool,
}

impl PgConsultationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConsultationRepository for PgConsultationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Consultation>> {
        let result = sqlx::query_as::<_, ConsultationModel>(
            r"
            SELECT id, client_id, attorney_id, subject, status, created_at, updated_at
            FROM consultations
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Consultation::from))
    }

    #[instrument(skip(self, consultation), fields(consultation_id = %consultation.id))]
    async fn create(&self, consultation: &Consultation) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO consultations (id, client_id, attorney_id, subject, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(consultation.id.into_inner())
        .bind(consultation.client_id.into_inner())
        .bind(consultation.attorney_id.map(Snowflake::into_inner))
        .bind(&consultation.subject)
        .bind(consultation.status.as_str())
        .bind(consultation.created_at)
        .bind(consultation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("UPDATE consultations SET updated_at = NOW() WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::ConsultationNotFound(id))
    }

    #[instrument(skip(self))]
    async fn list_detailed(&self) -> RepoResult<Vec<ConsultationDetails>> {
        let query = format!("{DETAILS_SELECT} ORDER BY c.updated_at DESC");
        let rows = sqlx::query_as::<_, ConsultationDetailsModel>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ConsultationDetails::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_for_participant(&self, participant_id: Snowflake) -> RepoResult<Vec<ConsultationDetails>> {
        let query = format!(
            "{DETAILS_SELECT} WHERE c.client_id = $1 OR c.attorney_id = $1 ORDER BY c.updated_at DESC"
        );
        let rows = sqlx::query_as::<_, ConsultationDetailsModel>(&query)
            .bind(participant_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ConsultationDetails::from).collect())
    }

    #[instrument(skip(self, message), fields(consultation_id = %message.consultation_id))]
    async fn add_message(&self, message: &ConsultationMessage) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO consultation_messages (id, consultation_id, sender_id, sender_role, message,
                                               is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(message.id.into_inner())
        .bind(message.consultation_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.sender_role.as_str())
        .bind(&message.message)
        .bind(message.read)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn messages(&self, consultation_id: Snowflake) -> RepoResult<Vec<MessageWithSender>> {
        // sender_id is a user or an attorney id depending on sender_role
        let rows = sqlx::query_as::<_, MessageWithSenderModel>(
            r"
            SELECT m.id, m.consultation_id, m.sender_id, m.sender_role, m.message, m.is_read,
                   m.created_at,
                   COALESCE(u.name, att.name) AS sender_name
            FROM consultation_messages m
            LEFT JOIN users u ON u.id = m.sender_id
            LEFT JOIN attorneys att ON att.id = m.sender_id
            WHERE m.consultation_id = $1
            ORDER BY m.created_at ASC
            ",
        )
        .bind(consultation_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MessageWithSender::from).collect())
    }
}
