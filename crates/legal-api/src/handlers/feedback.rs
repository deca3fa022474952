//! Feedback handlers

use axum::{
    extract::{Query, State},
    Json,
};
use legal_service::dto::{
    CreateFeedbackRequest, FeedbackEnvelope, FeedbackListResponse, MessageResponse, RespondFeedbackRequest,
    UpdateStatusRequest,
};
use legal_service::FeedbackService;
use serde::Deserialize;

use crate::extractors::{AdminUser, ClientUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// `?status=` filter for the admin list
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackQuery {
    pub status: Option<String>,
}

/// POST /api/feedback
pub async fn create(
    State(state): State<AppState>,
    client: ClientUser,
    ValidatedJson(request): ValidatedJson<CreateFeedbackRequest>,
) -> ApiResult<Created<Json<FeedbackEnvelope>>> {
    let service = FeedbackService::new(state.service_context());
    Ok(Created(Json(service.create(client.id(), request).await?)))
}

/// GET /api/admin/feedback
pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<FeedbackQuery>,
) -> ApiResult<Json<FeedbackListResponse>> {
    let service = FeedbackService::new(state.service_context());
    Ok(Json(service.list(query.status.as_deref()).await?))
}

/// PUT /api/admin/feedback/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<FeedbackEnvelope>> {
    let service = FeedbackService::new(state.service_context());
    Ok(Json(service.update_status(id, request).await?))
}

/// PUT /api/admin/feedback/:id/respond
pub async fn respond(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<RespondFeedbackRequest>,
) -> ApiResult<Json<FeedbackEnvelope>> {
    let service = FeedbackService::new(state.service_context());
    Ok(Json(service.respond(id, admin.id(), request).await?))
}

/// DELETE /api/admin/feedback/:id
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = FeedbackService::new(state.service_context());
    Ok(Json(service.delete(id).await?))
}
