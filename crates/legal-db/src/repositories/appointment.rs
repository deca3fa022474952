//! PostgreSQL implementation of AppointmentRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{info, instrument};

use legal_core::entities::{Appointment, AppointmentDetails, AppointmentStats};
use legal_core::error::DomainError;
use legal_core::traits::{AppointmentRepository, RepoResult};
use legal_core::value_objects::{AppointmentStatus, Snowflake};

use crate::models::{AppointmentDetailsModel, AppointmentModel, AppointmentStatsModel};

use super::error::{ensure_affected, map_db_error};

/// Appointment columns with the client and attorney joined in
const DETAILS_SELECT: &str = r"
    SELECT ap.id, ap.user_id, ap.attorney_id, ap.date, ap.time, ap.symptoms, ap.notes, ap.status,
           ap.created_at, ap.updated_at,
           u.name AS client_name, u.email AS client_email, u.phone AS client_phone,
           COALESCE(NULLIF(att.practice->>'attorneyName', ''), att.name) AS attorney_name,
           att.email AS attorney_email, att.specialization AS attorney_specialization,
           att.fees AS attorney_fees
    FROM appointments ap
    LEFT JOIN users u ON u.id = ap.user_id
    LEFT JOIN attorneys att ON att.id = ap.attorney_id
";

#[derive(Clone)]
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Appointment>> {
        let result = sqlx::query_as::<_, AppointmentModel>(
            r"
            SELECT id, user_id, attorney_id, date, time, symptoms, notes, status, created_at, updated_at
            FROM appointments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Appointment::from))
    }

    #[instrument(skip(self, appointment), fields(appointment_id = %appointment.id))]
    async fn create(&self, appointment: &Appointment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO appointments (id, user_id, attorney_id, date, time, symptoms, notes, status,
                                      created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(appointment.id.into_inner())
        .bind(appointment.user_id.into_inner())
        .bind(appointment.attorney_id.map(Snowflake::into_inner))
        .bind(appointment.date)
        .bind(&appointment.time)
        .bind(&appointment.symptoms)
        .bind(&appointment.notes)
        .bind(appointment.status.as_str())
        .bind(appointment.created_at)
        .bind(appointment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Snowflake, status: AppointmentStatus) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE appointments SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::AppointmentNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        ensure_affected(result.rows_affected(), || DomainError::AppointmentNotFound(id))
    }

    #[instrument(skip(self))]
    async fn slot_taken(&self, attorney_id: Snowflake, date: NaiveDate, time: &str) -> RepoResult<bool> {
        let blocking: Vec<&str> = AppointmentStatus::BLOCKING.iter().map(|s| s.as_str()).collect();
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM appointments
                WHERE attorney_id = $1 AND date = $2 AND time = $3 AND status = ANY($4)
            )
            ",
        )
        .bind(attorney_id.into_inner())
        .bind(date)
        .bind(time)
        .bind(&blocking)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn mark_expired(&self, today: NaiveDate) -> RepoResult<u64> {
        let settled: Vec<&str> = AppointmentStatus::FINAL.iter().map(|s| s.as_str()).collect();
        let result = sqlx::query(
            r"
            UPDATE appointments
            SET status = $1, updated_at = NOW()
            WHERE date < $2 AND status <> ALL($3)
            ",
        )
        .bind(AppointmentStatus::Expired.as_str())
        .bind(today)
        .bind(&settled)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        let modified = result.rows_affected();
        if modified > 0 {
            info!(modified, %today, "Marked past appointments as expired");
        }
        Ok(modified)
    }

    #[instrument(skip(self))]
    async fn list_detailed(&self) -> RepoResult<Vec<AppointmentDetails>> {
        let query = format!("{DETAILS_SELECT} ORDER BY ap.date DESC, ap.time DESC");
        let rows = sqlx::query_as::<_, AppointmentDetailsModel>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AppointmentDetails::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<AppointmentDetails>> {
        let query = format!("{DETAILS_SELECT} WHERE ap.user_id = $1 ORDER BY ap.date DESC, ap.time DESC");
        let rows = sqlx::query_as::<_, AppointmentDetailsModel>(&query)
            .bind(user_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AppointmentDetails::from).collect())
    }

    #[instrument(skip(self))]
    async fn recent_detailed(&self, limit: i64) -> RepoResult<Vec<AppointmentDetails>> {
        let query = format!("{DETAILS_SELECT} ORDER BY ap.created_at DESC LIMIT $1");
        let rows = sqlx::query_as::<_, AppointmentDetailsModel>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AppointmentDetails::from).collect())
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> RepoResult<AppointmentStats> {
        let row = sqlx::query_as::<_, AppointmentStatsModel>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'Pending') AS pending,
                   COUNT(*) FILTER (WHERE status = 'Confirmed') AS confirmed,
                   COUNT(*) FILTER (WHERE status = 'Completed') AS completed,
                   COUNT(*) FILTER (WHERE status = 'Cancelled') AS cancelled,
                   COUNT(*) FILTER (WHERE status = 'Expired') AS expired
            FROM appointments
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }
}
