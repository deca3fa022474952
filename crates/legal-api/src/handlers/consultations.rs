//! Consultation handlers
//!
//! Participants see and post into their own threads; admins see every
//! thread and reply on the attorney's side.

use axum::{extract::State, Json};
use legal_service::dto::{
    ConsultationEnvelope, ConsultationListResponse, OpenConsultationRequest, PostMessageRequest,
    PostedMessageEnvelope, ThreadMessagesResponse,
};
use legal_service::ConsultationService;

use crate::extractors::{AdminUser, AuthUser, ClientUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /api/consultations
pub async fn list_mine(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<ConsultationListResponse>> {
    let service = ConsultationService::new(state.service_context());
    Ok(Json(service.list_for_participant(auth.id).await?))
}

/// POST /api/consultations
pub async fn open(
    State(state): State<AppState>,
    client: ClientUser,
    ValidatedJson(request): ValidatedJson<OpenConsultationRequest>,
) -> ApiResult<Created<Json<ConsultationEnvelope>>> {
    let service = ConsultationService::new(state.service_context());
    Ok(Created(Json(service.open(client.id(), request).await?)))
}

/// GET /api/consultations/:id/messages
pub async fn messages(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ThreadMessagesResponse>> {
    let service = ConsultationService::new(state.service_context());
    Ok(Json(service.messages(auth.id, id).await?))
}

/// POST /api/consultations/:id/messages
pub async fn post_message(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<PostMessageRequest>,
) -> ApiResult<Created<Json<PostedMessageEnvelope>>> {
    let service = ConsultationService::new(state.service_context());
    Ok(Created(Json(service.post(auth.id, auth.role, id, request).await?)))
}

/// GET /api/admin/consultations
pub async fn list(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<ConsultationListResponse>> {
    let service = ConsultationService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// GET /api/admin/consultations/:id/messages
pub async fn admin_messages(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<ThreadMessagesResponse>> {
    let service = ConsultationService::new(state.service_context());
    Ok(Json(service.admin_messages(id).await?))
}

/// POST /api/admin/consultations/:id/reply
pub async fn reply(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<PostMessageRequest>,
) -> ApiResult<Created<Json<PostedMessageEnvelope>>> {
    let service = ConsultationService::new(state.service_context());
    Ok(Created(Json(service.admin_reply(admin.id(), id, request).await?)))
}
