//! Attorney handlers (admin)
//!
//! Mounted under `/api/admin/doctors`, the path the admin front end uses.

use axum::{extract::State, Json};
use legal_service::dto::{
    AttorneyEnvelope, AttorneyListResponse, CreateAttorneyRequest, MessageResponse, UpdateAttorneyRequest,
};
use legal_service::AttorneyService;

use crate::extractors::{AdminUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /api/admin/doctors
pub async fn list(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<AttorneyListResponse>> {
    let service = AttorneyService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// POST /api/admin/doctors
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateAttorneyRequest>,
) -> ApiResult<Created<Json<AttorneyEnvelope>>> {
    let service = AttorneyService::new(state.service_context());
    Ok(Created(Json(service.create(request).await?)))
}

/// PUT /api/admin/doctors/:id
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateAttorneyRequest>,
) -> ApiResult<Json<AttorneyEnvelope>> {
    let service = AttorneyService::new(state.service_context());
    Ok(Json(service.update(id, request).await?))
}

/// DELETE /api/admin/doctors/:id
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = AttorneyService::new(state.service_context());
    Ok(Json(service.delete(id).await?))
}
