//! Admin user management handlers

use axum::{extract::State, Json};
use legal_service::dto::{CreateUserRequest, CreatedUserEnvelope, UserListResponse, UserStatusEnvelope};
use legal_service::UserService;

use crate::extractors::{AdminUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Active users only
///
/// GET /api/admin/users
pub async fn list_active(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<UserListResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.list_active().await?))
}

/// GET /api/admin/all-users
pub async fn list_all(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<UserListResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.list_all().await?))
}

/// POST /api/admin/users
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<CreatedUserEnvelope>>> {
    let service = UserService::new(state.service_context());
    Ok(Created(Json(service.create(request).await?)))
}

/// PUT /api/admin/users/:id/restore
pub async fn restore(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<UserStatusEnvelope>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.restore(id).await?))
}

/// Soft delete; the row stays
///
/// DELETE /api/admin/users/:id
pub async fn soft_delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<UserStatusEnvelope>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.soft_delete(id).await?))
}
