//! Admin service
//!
//! Admin accounts, their permissions and login history, the dashboard
//! summary and the startup seeding of the first admin.

use legal_common::auth::hash_password;
use legal_common::BootstrapAdminConfig;
use legal_core::{Admin, AdminAccount, AdminPermissions, DomainError, Role, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{
    AdminAccountEnvelope, AdminAccountResponse, AdminDashboardResponse, AdminIdentityResponse,
    AdminListResponse, AdminLoginHistoryResponse, AdminRecordEnvelope, AdminRecordResponse,
    CreateAdminRequest, DashboardStatsResponse, LoginEntryResponse, LoginHistoryResponse,
    MessageResponse, PromoteToAdminRequest, RecentAppointmentResponse, UpdatePermissionsRequest,
};

use super::auth::normalize_email;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Logins listed per admin in the history view
const RECENT_LOGIN_LIMIT: i64 = 5;

/// Appointments listed on the dashboard
const RECENT_APPOINTMENT_LIMIT: i64 = 5;

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn get_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    async fn get_admin(&self, admin_id: Snowflake) -> ServiceResult<Admin> {
        Ok(self
            .ctx
            .admin_repo()
            .find_by_id(admin_id)
            .await?
            .ok_or(DomainError::AdminNotFound(admin_id))?)
    }

    /// Make an existing user an admin
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn create(&self, request: CreateAdminRequest) -> ServiceResult<AdminRecordEnvelope> {
        let mut user = self.get_user(request.user_id).await?;

        if self.ctx.admin_repo().find_by_user_id(user.id).await?.is_some() {
            return Err(DomainError::AlreadyAdmin.into());
        }

        let permissions = request.permissions.unwrap_or(AdminPermissions::DEFAULT_GRANT);
        let admin = Admin::new(self.ctx.generate_id(), user.id, permissions);
        self.ctx.admin_repo().create(&admin).await?;

        user.set_role(Role::Admin);
        self.ctx.user_repo().update(&user).await?;

        info!(admin_id = %admin.id, user_id = %user.id, "Admin created");

        Ok(AdminRecordEnvelope {
            message: "Admin created successfully".to_string(),
            admin: AdminRecordResponse {
                id: admin.id.to_string(),
                user_id: user.id.to_string(),
                permissions: admin.permissions,
            },
        })
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<AdminListResponse> {
        let admins: Vec<AdminAccountResponse> = self
            .ctx
            .admin_repo()
            .list_accounts()
            .await?
            .iter()
            .map(AdminAccountResponse::from)
            .collect();

        Ok(AdminListResponse {
            total: admins.len(),
            admins,
        })
    }

    /// Replace the permission set of an admin
    #[instrument(skip(self, request))]
    pub async fn update_permissions(
        &self,
        admin_id: Snowflake,
        request: UpdatePermissionsRequest,
    ) -> ServiceResult<AdminAccountEnvelope> {
        let mut admin = self.get_admin(admin_id).await?;
        admin.set_permissions(request.permissions);
        self.ctx.admin_repo().update(&admin).await?;

        let user = self.get_user(admin.user_id).await?;

        info!(admin_id = %admin.id, permissions = ?admin.permissions.names(), "Admin permissions updated");

        Ok(AdminAccountEnvelope {
            message: "Admin permissions updated successfully".to_string(),
            admin: AdminAccountResponse::from(&AdminAccount {
                admin,
                name: user.name,
                email: user.email,
            }),
        })
    }

    /// Drop the admin record and demote the user back to a client
    #[instrument(skip(self))]
    pub async fn remove(&self, admin_id: Snowflake) -> ServiceResult<MessageResponse> {
        let admin = self.get_admin(admin_id).await?;
        self.ctx.admin_repo().delete(admin.id).await?;

        if let Some(mut user) = self.ctx.user_repo().find_by_id(admin.user_id).await? {
            user.set_role(Role::Client);
            self.ctx.user_repo().update(&user).await?;
        }

        info!(admin_id = %admin.id, user_id = %admin.user_id, "Admin removed");

        Ok(MessageResponse::new("Admin removed successfully"))
    }

    /// Grant full admin rights to the user behind `email`
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn promote_to_admin(&self, request: PromoteToAdminRequest) -> ServiceResult<AdminAccountEnvelope> {
        let email = normalize_email(&request.email);
        let mut user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::UserEmailNotFound(email.clone()))?;

        if user.role != Role::Admin {
            user.set_role(Role::Admin);
            self.ctx.user_repo().update(&user).await?;
        }

        let admin = self.upsert_admin(user.id, AdminPermissions::FULL_GRANT).await?;

        info!(admin_id = %admin.id, user_id = %user.id, "User promoted to admin");

        Ok(AdminAccountEnvelope {
            message: "User promoted to admin successfully".to_string(),
            admin: AdminAccountResponse::from(&AdminAccount {
                admin,
                name: user.name,
                email: user.email,
            }),
        })
    }

    /// Create the admin record, or widen an existing one to `permissions`
    async fn upsert_admin(&self, user_id: Snowflake, permissions: AdminPermissions) -> ServiceResult<Admin> {
        match self.ctx.admin_repo().find_by_user_id(user_id).await? {
            Some(mut admin) => {
                if admin.permissions != permissions {
                    admin.set_permissions(permissions);
                    self.ctx.admin_repo().update(&admin).await?;
                }
                Ok(admin)
            }
            None => {
                let admin = Admin::new(self.ctx.generate_id(), user_id, permissions);
                self.ctx.admin_repo().create(&admin).await?;
                Ok(admin)
            }
        }
    }

    /// Caller identity, headline counters and the latest appointments
    #[instrument(skip(self))]
    pub async fn dashboard(&self, caller_id: Snowflake) -> ServiceResult<AdminDashboardResponse> {
        let user = self.ctx.user_repo().find_by_id(caller_id).await?;
        let admin = self.ctx.admin_repo().find_by_user_id(caller_id).await?;

        let identity = AdminIdentityResponse {
            name: user.as_ref().map_or_else(|| "Admin".to_string(), |u| u.name.clone()),
            email: user.map(|u| u.email).unwrap_or_default(),
            permissions: admin.map_or_else(AdminPermissions::empty, |a| a.permissions),
        };

        let appointment_stats = self.ctx.appointment_repo().stats().await?;
        let stats = DashboardStatsResponse {
            total_clients: self.ctx.user_repo().count_by_role(Role::Client).await?,
            total_attorneys: self.ctx.attorney_repo().count().await?,
            ..DashboardStatsResponse::from(&appointment_stats)
        };

        let recent_appointments = self
            .ctx
            .appointment_repo()
            .recent_detailed(RECENT_APPOINTMENT_LIMIT)
            .await?
            .iter()
            .map(RecentAppointmentResponse::from)
            .collect();

        Ok(AdminDashboardResponse {
            admin: identity,
            stats,
            recent_appointments,
        })
    }

    /// Per-admin login counters with the most recent sign-ins
    #[instrument(skip(self))]
    pub async fn login_history(&self) -> ServiceResult<LoginHistoryResponse> {
        let accounts = self.ctx.admin_repo().list_accounts_by_last_login().await?;

        let mut admins = Vec::with_capacity(accounts.len());
        for account in accounts {
            let recent_logins = self
                .ctx
                .admin_repo()
                .recent_logins(account.admin.id, RECENT_LOGIN_LIMIT)
                .await?
                .iter()
                .map(LoginEntryResponse::from)
                .collect();

            admins.push(AdminLoginHistoryResponse {
                email: account.email,
                name: account.name,
                last_login_at: account.admin.last_login_at,
                login_count: account.admin.login_count,
                recent_logins,
            });
        }

        Ok(LoginHistoryResponse {
            message: "Admin login history".to_string(),
            total: admins.len(),
            admins,
        })
    }

    /// Make sure the configured admin exists at startup.
    ///
    /// Creates the user when missing, restores the Admin role and record when
    /// they are not there, and never touches an existing password.
    #[instrument(skip(self, config), fields(email = %config.email))]
    pub async fn ensure_bootstrap_admin(&self, config: &BootstrapAdminConfig) -> ServiceResult<()> {
        let email = normalize_email(&config.email);

        let user = match self.ctx.user_repo().find_by_email(&email).await? {
            Some(mut user) => {
                if user.role != Role::Admin {
                    user.set_role(Role::Admin);
                    self.ctx.user_repo().update(&user).await?;
                    info!(user_id = %user.id, "Existing user granted the Admin role");
                }
                user
            }
            None => {
                let password_hash = hash_password(&config.password)?;
                let mut user = User::new(self.ctx.generate_id(), config.name.clone(), email);
                user.role = Role::Admin;
                self.ctx.user_repo().create(&user, Some(&password_hash)).await?;
                info!(user_id = %user.id, "Bootstrap admin user created");
                user
            }
        };

        if self.ctx.admin_repo().find_by_user_id(user.id).await?.is_none() {
            let admin = Admin::new(self.ctx.generate_id(), user.id, AdminPermissions::FULL_GRANT);
            self.ctx.admin_repo().create(&admin).await?;
            info!(admin_id = %admin.id, "Bootstrap admin record created");
        }

        Ok(())
    }
}
