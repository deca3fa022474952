//! Feedback database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct FeedbackModel {
    pub id: i64,
    pub user_id: i64,
    pub subject: String,
    pub message: String,
    pub rating: i16,
    pub status: String,
    pub admin_response: Option<String>,
    pub responded_by: Option<i64>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct FeedbackDetailsModel {
    #[sqlx(flatten)]
    pub feedback: FeedbackModel,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_phone: Option<String>,
    pub responder_name: Option<String>,
}
