//! User entity - a client (or admin) account

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{Gender, OAuthProvider, Role, Snowflake};

/// Reason recorded when an admin deactivates an account
pub const ADMIN_SOFT_DELETE_REASON: &str = "Admin soft delete";

/// User account. The password hash lives only in the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: Role,
    pub is_social_login: bool,
    pub profile_picture: Option<String>,
    pub provider: Option<OAuthProvider>,
    pub provider_id: Option<String>,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deletion_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an active client account
    pub fn new(id: Snowflake, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            phone: None,
            address: None,
            gender: None,
            date_of_birth: None,
            role: Role::Client,
            is_social_login: false,
            profile_picture: None,
            provider: None,
            provider_id: None,
            is_active: true,
            deleted_at: None,
            deletion_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an account that signs in through an OAuth provider
    pub fn new_social(
        id: Snowflake,
        name: String,
        email: String,
        provider: OAuthProvider,
        provider_id: String,
        profile_picture: Option<String>,
    ) -> Self {
        let mut user = Self::new(id, name, email);
        user.is_social_login = true;
        user.provider = Some(provider);
        user.provider_id = Some(provider_id);
        user.profile_picture = profile_picture;
        user
    }

    /// Social account created through Google sign-in
    pub fn is_google_account(&self) -> bool {
        self.is_social_login && self.provider == Some(OAuthProvider::Google)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Attach a provider identity to an existing account.
    ///
    /// An existing picture is kept; only a missing one is filled in.
    pub fn link_provider(
        &mut self,
        provider: OAuthProvider,
        provider_id: String,
        profile_picture: Option<String>,
    ) {
        self.is_social_login = true;
        self.provider = Some(provider);
        self.provider_id = Some(provider_id);
        if self.profile_picture.is_none() {
            self.profile_picture = profile_picture;
        }
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    pub fn soft_delete(&mut self, reason: &str) {
        let now = Utc::now();
        self.is_active = false;
        self.deleted_at = Some(now);
        self.deletion_reason = Some(reason.to_string());
        self.updated_at = now;
    }

    pub fn restore(&mut self) {
        self.is_active = true;
        self.deleted_at = None;
        self.deletion_reason = None;
        self.updated_at = Utc::now();
    }

    /// `active` / `inactive`, as shown in the admin user list
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "active"
        } else {
            "inactive"
        }
    }
}
