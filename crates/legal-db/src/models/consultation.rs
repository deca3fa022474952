//! Consultation and message database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ConsultationModel {
    pub id: i64,
    pub client_id: i64,
    pub attorney_id: Option<i64>,
    pub subject: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ConsultationDetailsModel {
    #[sqlx(flatten)]
    pub consultation: ConsultationModel,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub attorney_name: Option<String>,
    pub attorney_email: Option<String>,
    pub attorney_phone: Option<String>,
    pub message_count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct ConsultationMessageModel {
    pub id: i64,
    pub consultation_id: i64,
    pub sender_id: i64,
    pub sender_role: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MessageWithSenderModel {
    #[sqlx(flatten)]
    pub message: ConsultationMessageModel,
    pub sender_name: Option<String>,
}
