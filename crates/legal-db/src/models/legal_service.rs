//! Service catalogue database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct LegalServiceModel {
    pub id: i64,
    pub service_name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: String,
    pub icon: String,
    pub icon_file: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
