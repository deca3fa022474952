//! Authentication service
//!
//! Handles registration, password login for clients and attorneys, password
//! resets and the admin console login.

use chrono::Utc;
use legal_common::auth::{hash_password, validate_password_length, verify_password};
use legal_common::AppError;
use legal_core::{Admin, AdminLogin, AdminPermissions, Attorney, DomainError, Role, User};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::dto::{
    AdminLoginRequest, AdminLoginResponse, AdminSessionResponse, AttorneyAccountResponse,
    AttorneyAuthResponse, AttorneyPasswordResponse, AuthResponse, LoginRequest, RegisterRequest,
    ResetPasswordRequest, UserAuthResponse, UserEnvelope, UserSummaryResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const GMAIL_DOMAIN: &str = "@gmail.com";

/// Emails are compared case-insensitively and stored lowercased
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_gmail(email: &str) -> bool {
    email.contains(GMAIL_DOMAIN)
}

/// Client metadata recorded with each admin login
#[derive(Debug, Clone, Default)]
pub struct LoginOrigin {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a client, or an attorney when the request asks for one
    #[instrument(skip(self, request), fields(email = %request.email, role = ?request.role))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_length(&request.password)?;
        let email = normalize_email(&request.email);

        if request.wants_attorney_account() {
            return self.register_attorney(request, email).await;
        }

        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::UserAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let mut user = User::new(self.ctx.generate_id(), request.name.trim().to_string(), email);
        user.phone = request.phone;
        user.address = request.address;
        user.date_of_birth = request.date_of_birth;
        user.gender = request.gender;

        self.ctx.user_repo().create(&user, Some(&password_hash)).await?;

        info!(user_id = %user.id, "User registered");

        let token = self.ctx.jwt_service().issue(user.id, user.role)?;
        Ok(AuthResponse::User(UserAuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: UserSummaryResponse::from(&user),
        }))
    }

    async fn register_attorney(&self, request: RegisterRequest, email: String) -> ServiceResult<AuthResponse> {
        if self.ctx.attorney_repo().email_exists(&email).await? {
            return Err(DomainError::AttorneyEmailTaken.into());
        }

        let password_hash = hash_password(&request.password)?;

        let mut attorney = Attorney::new(self.ctx.generate_id(), request.name.trim().to_string(), email);
        attorney.phone = request.phone;
        attorney.address = request.address;
        attorney.date_of_birth = request.date_of_birth;
        attorney.gender = request.gender;

        self.ctx
            .attorney_repo()
            .create(&attorney, Some(&password_hash))
            .await?;

        info!(attorney_id = %attorney.id, "Attorney registered");

        let token = self.ctx.jwt_service().issue(attorney.id, Role::Attorney)?;
        Ok(AuthResponse::Attorney(AttorneyAuthResponse {
            message: "Attorney registered successfully".to_string(),
            token,
            attorney: AttorneyAccountResponse::with_role(&attorney),
        }))
    }

    /// Password login against the store selected by the requested role
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);
        if request.is_attorney_login() {
            self.login_attorney(&email, &request.password).await
        } else {
            self.login_user(&email, &request.password).await
        }
    }

    async fn login_attorney(&self, email: &str, password: &str) -> ServiceResult<AuthResponse> {
        let attorney = self
            .ctx
            .attorney_repo()
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                warn!("Attorney login failed: unknown email");
                ServiceError::invalid_credentials()
            })?;

        let hash = self.ctx.attorney_repo().get_password_hash(attorney.id).await?;
        let valid = match hash {
            Some(hash) => verify_password(password, &hash)?,
            None => false,
        };
        if !valid {
            warn!(attorney_id = %attorney.id, "Attorney login failed: bad password");
            return Err(ServiceError::invalid_credentials());
        }

        info!(attorney_id = %attorney.id, "Attorney logged in");

        let token = self.ctx.jwt_service().issue(attorney.id, Role::Attorney)?;
        Ok(AuthResponse::Attorney(AttorneyAuthResponse {
            message: "Attorney login successful".to_string(),
            token,
            attorney: AttorneyAccountResponse::with_role(&attorney),
        }))
    }

    async fn login_user(&self, email: &str, password: &str) -> ServiceResult<AuthResponse> {
        let Some(user) = self.ctx.user_repo().find_by_email(email).await? else {
            warn!("Login failed: unknown email");
            if is_gmail(email) {
                return Err(ServiceError::login_hint(
                    "This Gmail account is not registered. Please use Google login button above or register first.",
                    json!({ "isGmailAddress": true, "suggestGoogleLogin": true }),
                ));
            }
            return Err(ServiceError::invalid_credentials());
        };

        let valid = match self.ctx.user_repo().get_password_hash(user.id).await? {
            Some(hash) => verify_password(password, &hash)?,
            None => false,
        };

        if !valid {
            warn!(user_id = %user.id, "Login failed: bad password");
            if user.is_google_account() {
                return Err(ServiceError::login_hint(
                    "This account was created with Google. Please use Google login or set a password first.",
                    json!({ "requiresPasswordSetup": true, "isGoogleUser": true, "email": user.email }),
                ));
            }
            if is_gmail(email) {
                return Err(ServiceError::login_hint(
                    "Invalid password. If you created this account with Google, please use the Google login button above.",
                    json!({ "isGmailAddress": true, "suggestGoogleLogin": true }),
                ));
            }
            return Err(ServiceError::invalid_credentials());
        }

        if !user.is_active {
            warn!(user_id = %user.id, "Login refused: account deactivated");
            return Err(DomainError::AccountDeactivated.into());
        }

        info!(user_id = %user.id, "User logged in");

        let token = self.ctx.jwt_service().issue(user.id, user.role)?;
        Ok(AuthResponse::User(UserAuthResponse {
            message: "Login successful".to_string(),
            token,
            user: UserSummaryResponse::from(&user),
        }))
    }

    /// Overwrite an attorney's password given only the email
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn attorney_forgot_password(
        &self,
        request: ResetPasswordRequest,
    ) -> ServiceResult<AttorneyPasswordResponse> {
        validate_password_length(&request.new_password)?;
        let email = normalize_email(&request.email);

        let attorney = self
            .ctx
            .attorney_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::AttorneyEmailNotFound(email.clone()))?;

        let password_hash = hash_password(&request.new_password)?;
        self.ctx
            .attorney_repo()
            .update_password(attorney.id, &password_hash)
            .await?;

        info!(attorney_id = %attorney.id, "Attorney password reset");

        Ok(AttorneyPasswordResponse {
            message: "Attorney password updated successfully! You can now login with your new password."
                .to_string(),
            attorney: AttorneyAccountResponse::from(&attorney),
        })
    }

    /// Let a Google-created account add a password for email login
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn set_password(&self, request: ResetPasswordRequest) -> ServiceResult<UserEnvelope> {
        validate_password_length(&request.new_password)?;
        let email = normalize_email(&request.email);

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::UserEmailNotFound(email.clone()))?;

        if !user.is_google_account() {
            return Err(DomainError::NotGoogleAccount.into());
        }

        let password_hash = hash_password(&request.new_password)?;
        self.ctx.user_repo().update_password(user.id, &password_hash).await?;

        info!(user_id = %user.id, "Password set for Google account");

        Ok(UserEnvelope {
            message: Some(
                "Password set successfully! You can now login with your email and password.".to_string(),
            ),
            user: UserSummaryResponse::from(&user),
        })
    }

    /// Admin console login; keeps the admin record and its login history current
    #[instrument(skip(self, request, origin), fields(email = %request.email))]
    pub async fn admin_login(
        &self,
        request: AdminLoginRequest,
        origin: LoginOrigin,
    ) -> ServiceResult<AdminLoginResponse> {
        let email = normalize_email(&request.email);
        let rejected = || ServiceError::App(AppError::Unauthorized("Invalid email or password".to_string()));

        let user = self.ctx.user_repo().find_by_email(&email).await?.ok_or_else(|| {
            warn!("Admin login failed: unknown email");
            rejected()
        })?;

        if !user.is_admin() {
            warn!(user_id = %user.id, "Admin login refused: not an admin");
            return Err(AppError::Unauthorized("Access denied. Admin privileges required.".to_string()).into());
        }

        let valid = match self.ctx.user_repo().get_password_hash(user.id).await? {
            Some(hash) => verify_password(&request.password, &hash)?,
            None => false,
        };
        if !valid {
            warn!(user_id = %user.id, "Admin login failed: bad password");
            return Err(rejected());
        }

        let now = Utc::now();
        let mut admin = match self.ctx.admin_repo().find_by_user_id(user.id).await? {
            Some(admin) => admin,
            None => {
                let admin = Admin::new(self.ctx.generate_id(), user.id, AdminPermissions::DEFAULT_GRANT);
                self.ctx.admin_repo().create(&admin).await?;
                info!(admin_id = %admin.id, "Admin record created on first login");
                admin
            }
        };

        admin.record_login(now);
        self.ctx.admin_repo().update(&admin).await?;
        self.ctx
            .admin_repo()
            .record_login(&AdminLogin {
                id: self.ctx.generate_id(),
                admin_id: admin.id,
                login_time: now,
                ip_address: origin.ip_address,
                user_agent: origin.user_agent,
            })
            .await?;

        info!(admin_id = %admin.id, login_count = admin.login_count, "Admin logged in");

        let token = self.ctx.jwt_service().issue(user.id, Role::Admin)?;
        Ok(AdminLoginResponse {
            message: "Admin login successful".to_string(),
            token,
            admin: AdminSessionResponse {
                id: user.id.to_string(),
                name: user.name,
                email: user.email,
                role: Role::Admin,
                permissions: admin.permissions,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
    }

    #[test]
    fn test_gmail_detection_runs_on_normalized_email() {
        assert!(is_gmail(&normalize_email("Someone@GMAIL.com")));
        assert!(!is_gmail("someone@firm.com"));
    }
}
