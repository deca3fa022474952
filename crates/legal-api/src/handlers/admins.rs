//! Admin account handlers
//!
//! Admin login, the dashboard and management of admin accounts.

use axum::{extract::State, Json};
use legal_service::dto::{
    AdminAccountEnvelope, AdminDashboardResponse, AdminListResponse, AdminLoginRequest,
    AdminLoginResponse, AdminRecordEnvelope, CreateAdminRequest, LoginHistoryResponse,
    MessageResponse, PromoteToAdminRequest, UpdatePermissionsRequest,
};
use legal_service::{AdminService, AuthService};

use crate::extractors::{AdminUser, ClientOrigin, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    ClientOrigin(origin): ClientOrigin,
    ValidatedJson(request): ValidatedJson<AdminLoginRequest>,
) -> ApiResult<Json<AdminLoginResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.admin_login(request, origin).await?;
    Ok(Json(response))
}

/// GET /api/admin/login-history
pub async fn login_history(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<LoginHistoryResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.login_history().await?))
}

/// GET /api/admin/dashboard
pub async fn dashboard(State(state): State<AppState>, admin: AdminUser) -> ApiResult<Json<AdminDashboardResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.dashboard(admin.id()).await?))
}

/// POST /api/admin/create
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateAdminRequest>,
) -> ApiResult<Json<AdminRecordEnvelope>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.create(request).await?))
}

/// GET /api/admin/list
pub async fn list(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<AdminListResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// PUT /api/admin/permissions/:id
pub async fn update_permissions(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdatePermissionsRequest>,
) -> ApiResult<Json<AdminAccountEnvelope>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.update_permissions(id, request).await?))
}

/// DELETE /api/admin/:id
pub async fn remove(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.remove(id).await?))
}

/// POST /api/admin/promote-to-admin
pub async fn promote_to_admin(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<PromoteToAdminRequest>,
) -> ApiResult<Json<AdminAccountEnvelope>> {
    let service = AdminService::new(state.service_context());
    Ok(Json(service.promote_to_admin(request).await?))
}
