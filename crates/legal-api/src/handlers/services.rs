//! Legal service catalogue handlers

use axum::{extract::State, Json};
use legal_service::dto::{LegalServiceEnvelope, LegalServiceListResponse, MessageResponse};
use legal_service::CatalogService;

use crate::extractors::{AdminUser, IdPath, ServiceMultipart};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Public listing of active services
///
/// GET /api/services
pub async fn list_public(State(state): State<AppState>) -> ApiResult<Json<LegalServiceListResponse>> {
    let service = CatalogService::new(state.service_context());
    Ok(Json(service.list_active().await?))
}

/// GET /api/admin/services
pub async fn list(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<LegalServiceListResponse>> {
    let service = CatalogService::new(state.service_context());
    Ok(Json(service.list_active().await?))
}

/// Multipart form with a mandatory `iconFile`
///
/// POST /api/admin/services
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    upload: ServiceMultipart,
) -> ApiResult<Created<Json<LegalServiceEnvelope>>> {
    let service = CatalogService::new(state.service_context());
    Ok(Created(Json(service.create(upload.form, upload.icon).await?)))
}

/// PUT /api/admin/services/:id
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    upload: ServiceMultipart,
) -> ApiResult<Json<LegalServiceEnvelope>> {
    let service = CatalogService::new(state.service_context());
    Ok(Json(service.update(id, upload.form, upload.icon).await?))
}

/// Soft delete
///
/// DELETE /api/admin/services/:id
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = CatalogService::new(state.service_context());
    Ok(Json(service.delete(id).await?))
}
