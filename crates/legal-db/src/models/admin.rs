//! Admin and admin login database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct AdminModel {
    pub id: i64,
    pub user_id: i64,
    pub permissions: i64,
    pub last_login_at: Option<DateTime<Utc>>,
    pub login_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin row joined with the owning user's name and email
#[derive(Debug, Clone, FromRow)]
pub struct AdminAccountModel {
    #[sqlx(flatten)]
    pub admin: AdminModel,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct AdminLoginModel {
    pub id: i64,
    pub admin_id: i64,
    pub login_time: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
