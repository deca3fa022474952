//! Appointment database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct AppointmentModel {
    pub id: i64,
    pub user_id: i64,
    pub attorney_id: Option<i64>,
    pub date: NaiveDate,
    pub time: String,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Appointment row with LEFT JOINed client and attorney columns
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentDetailsModel {
    #[sqlx(flatten)]
    pub appointment: AppointmentModel,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub attorney_name: Option<String>,
    pub attorney_email: Option<String>,
    pub attorney_specialization: Option<String>,
    pub attorney_fees: Option<f64>,
}

/// Aggregated counts for the dashboard
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentStatsModel {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub expired: i64,
}
