//! User handlers
//!
//! Registration, password login, social login and the client's own
//! profile, dashboard and appointment list.

use axum::{extract::State, Json};
use legal_service::dto::{
    AttorneyPasswordResponse, AuthResponse, ClientAppointmentsResponse, ClientDashboardResponse,
    LoginRequest, OAuthCodeRequest, RegisterRequest, ResetPasswordRequest, SocialAuthResponse,
    UpdateProfileRequest, UserEnvelope,
};
use legal_service::{AuthService, OAuthService, UserService};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a client, or an attorney when `role` is Attorney
///
/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// POST /api/users/attorney-forgot-password
pub async fn attorney_forgot_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<Json<AttorneyPasswordResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.attorney_forgot_password(request).await?;
    Ok(Json(response))
}

/// Let a Google account add a password
///
/// POST /api/users/set-password
pub async fn set_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<Json<UserEnvelope>> {
    let service = AuthService::new(state.service_context());
    let response = service.set_password(request).await?;
    Ok(Json(response))
}

/// GET /api/users/profile
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserEnvelope>> {
    let service = UserService::new(state.service_context());
    let response = service.profile(auth.id).await?;
    Ok(Json(response))
}

/// PUT /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserEnvelope>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.id, request).await?;
    Ok(Json(response))
}

/// GET /api/users/dashboard
pub async fn dashboard(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<ClientDashboardResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.client_dashboard(auth.id).await?;
    Ok(Json(response))
}

/// GET /api/users/appointments
pub async fn appointments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ClientAppointmentsResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.client_appointments(auth.id).await?;
    Ok(Json(response))
}

// === Social login ===

/// POST /api/users/auth/google
pub async fn google_auth(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<OAuthCodeRequest>,
) -> ApiResult<Json<SocialAuthResponse>> {
    let service = OAuthService::new(state.service_context());
    Ok(Json(service.google(request).await?))
}

/// POST /api/users/auth/facebook
pub async fn facebook_auth(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<OAuthCodeRequest>,
) -> ApiResult<Json<SocialAuthResponse>> {
    let service = OAuthService::new(state.service_context());
    Ok(Json(service.facebook(request).await?))
}

/// POST /api/users/auth/linkedin
pub async fn linkedin_auth(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<OAuthCodeRequest>,
) -> ApiResult<Json<SocialAuthResponse>> {
    let service = OAuthService::new(state.service_context());
    Ok(Json(service.linkedin(request).await?))
}
