//! Attorney database model

use chrono::{DateTime, NaiveDate, Utc};
use legal_core::PracticeDetails;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the attorneys table
#[derive(Debug, Clone, FromRow)]
pub struct AttorneyModel {
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<i32>,
    pub fees: Option<f64>,
    pub profile_picture: Option<String>,
    pub practice: Json<PracticeDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
