//! Admin records and their login history

use chrono::{DateTime, Utc};

use crate::value_objects::{AdminPermissions, Snowflake};

/// Admin record attached to a user whose role is `Admin`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub permissions: AdminPermissions,
    pub last_login_at: Option<DateTime<Utc>>,
    pub login_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(id: Snowflake, user_id: Snowflake, permissions: AdminPermissions) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            permissions,
            last_login_at: None,
            login_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
        self.login_count = self.login_count.saturating_add(1);
        self.updated_at = at;
    }

    pub fn set_permissions(&mut self, permissions: AdminPermissions) {
        self.permissions = permissions;
        self.updated_at = Utc::now();
    }
}

/// One row of the admin login history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminLogin {
    pub id: Snowflake,
    pub admin_id: Snowflake,
    pub login_time: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Admin record joined with the owning user's identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub admin: Admin,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_admin_has_no_logins() {
        let admin = Admin::new(Snowflake::new(1), Snowflake::new(2), AdminPermissions::DEFAULT_GRANT);
        assert_eq!(admin.login_count, 0);
        assert!(admin.last_login_at.is_none());
    }

    #[test]
    fn record_login_counts_and_stamps() {
        let mut admin = Admin::new(Snowflake::new(1), Snowflake::new(2), AdminPermissions::empty());
        let at = Utc::now();
        admin.record_login(at);
        admin.record_login(at);
        assert_eq!(admin.login_count, 2);
        assert_eq!(admin.last_login_at, Some(at));
    }
}
