//! User service
//!
//! Client profile and dashboard, plus the admin user management screens.

use chrono::{NaiveDate, Utc};
use legal_common::auth::hash_password;
use legal_core::{AppointmentDetails, AppointmentStatus, DomainError, Snowflake, User, ADMIN_SOFT_DELETE_REASON};
use tracing::{info, instrument};

use crate::dto::{
    AppointmentResponse, ClientAppointmentsResponse, ClientDashboardResponse, ClientProfileResponse,
    ClientStatsResponse, CreateUserRequest, CreatedUserEnvelope, CreatedUserResponse,
    UpdateProfileRequest, UserEnvelope, UserListResponse, UserRecordResponse, UserStatusEnvelope,
    UserStatusResponse, UserSummaryResponse,
};

use super::auth::normalize_email;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Appointment counters shown on the client dashboard
fn client_stats(appointments: &[AppointmentDetails], today: NaiveDate) -> ClientStatsResponse {
    ClientStatsResponse {
        total_appointments: appointments.len(),
        upcoming_appointments: appointments
            .iter()
            .filter(|a| a.appointment.is_upcoming(today))
            .count(),
        completed_appointments: appointments
            .iter()
            .filter(|a| a.appointment.status == AppointmentStatus::Completed)
            .count(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
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

    // === Client self-service ===

    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: Snowflake) -> ServiceResult<UserEnvelope> {
        let user = self.get_user(user_id).await?;
        Ok(UserEnvelope {
            message: None,
            user: UserSummaryResponse::from(&user),
        })
    }

    /// Update name, phone and address; omitted fields keep their value
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserEnvelope> {
        let mut user = self.get_user(user_id).await?;

        if let Some(name) = non_blank(request.name) {
            user.name = name;
        }
        if let Some(phone) = request.phone {
            user.phone = Some(phone);
        }
        if let Some(address) = request.address {
            user.address = Some(address);
        }
        user.updated_at = Utc::now();

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "Profile updated");

        Ok(UserEnvelope {
            message: Some("Profile updated successfully".to_string()),
            user: UserSummaryResponse::from(&user),
        })
    }

    #[instrument(skip(self))]
    pub async fn client_dashboard(&self, user_id: Snowflake) -> ServiceResult<ClientDashboardResponse> {
        let user = self.get_user(user_id).await?;
        let appointments = self.ctx.appointment_repo().list_for_user(user_id).await?;

        Ok(ClientDashboardResponse {
            message: "Dashboard data retrieved successfully".to_string(),
            user: ClientProfileResponse::from(&user),
            stats: client_stats(&appointments, Utc::now().date_naive()),
        })
    }

    #[instrument(skip(self))]
    pub async fn client_appointments(&self, user_id: Snowflake) -> ServiceResult<ClientAppointmentsResponse> {
        self.get_user(user_id).await?;
        let appointments = self.ctx.appointment_repo().list_for_user(user_id).await?;

        Ok(ClientAppointmentsResponse {
            message: "Appointments retrieved successfully".to_string(),
            stats: client_stats(&appointments, Utc::now().date_naive()),
            appointments: appointments.iter().map(AppointmentResponse::from).collect(),
        })
    }

    // === Admin user management ===

    /// Active users, newest first
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> ServiceResult<UserListResponse> {
        let users: Vec<UserRecordResponse> = self
            .ctx
            .user_repo()
            .list_active()
            .await?
            .iter()
            .map(UserRecordResponse::from)
            .collect();

        Ok(UserListResponse {
            message: None,
            total: users.len(),
            users,
        })
    }

    /// Every user, soft-deleted ones included
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ServiceResult<UserListResponse> {
        let users: Vec<UserRecordResponse> = self
            .ctx
            .user_repo()
            .list_all()
            .await?
            .iter()
            .map(UserRecordResponse::from)
            .collect();

        Ok(UserListResponse {
            message: Some("All users (including inactive)".to_string()),
            total: users.len(),
            users,
        })
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create(&self, request: CreateUserRequest) -> ServiceResult<CreatedUserEnvelope> {
        let email = normalize_email(&request.email);
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyRegistered.into());
        }

        let password_hash = hash_password(&request.password)?;

        let mut user = User::new(self.ctx.generate_id(), request.name.trim().to_string(), email);
        user.phone = non_blank(request.phone);
        user.address = non_blank(request.address);
        user.date_of_birth = request.dob;
        user.gender = request.gender;

        self.ctx.user_repo().create(&user, Some(&password_hash)).await?;

        info!(user_id = %user.id, "User created by admin");

        Ok(CreatedUserEnvelope {
            message: "User created successfully".to_string(),
            user: CreatedUserResponse::from(&user),
        })
    }

    /// Deactivate the account; the row and its history stay in place
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, user_id: Snowflake) -> ServiceResult<UserStatusEnvelope> {
        let mut user = self.get_user(user_id).await?;
        user.soft_delete(ADMIN_SOFT_DELETE_REASON);
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "User soft deleted");

        Ok(UserStatusEnvelope {
            message: "User marked as inactive. Data preserved in database.".to_string(),
            user: UserStatusResponse {
                id: user.id.to_string(),
                email: user.email,
                name: user.name,
                status: "inactive",
                deleted_at: user.deleted_at,
                restored_at: None,
            },
        })
    }

    #[instrument(skip(self))]
    pub async fn restore(&self, user_id: Snowflake) -> ServiceResult<UserStatusEnvelope> {
        let mut user = self.get_user(user_id).await?;
        user.restore();
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "User restored");

        Ok(UserStatusEnvelope {
            message: "User restored successfully. Data preserved in database.".to_string(),
            user: UserStatusResponse {
                id: user.id.to_string(),
                email: user.email,
                name: user.name,
                status: "active",
                deleted_at: None,
                restored_at: Some(user.updated_at),
            },
        })
    }
}
