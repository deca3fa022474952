//! Appointment handlers
//!
//! Client booking plus the admin appointment screens.

use axum::{extract::State, Json};
use legal_service::dto::{
    AdminBookAppointmentRequest, AppointmentEnvelope, AppointmentListResponse, BookAppointmentRequest,
    MarkExpiredResponse, MessageResponse, UpdateStatusRequest,
};
use legal_service::AppointmentService;

use crate::extractors::{AdminUser, ClientUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /api/appointments
pub async fn book(
    State(state): State<AppState>,
    client: ClientUser,
    ValidatedJson(request): ValidatedJson<BookAppointmentRequest>,
) -> ApiResult<Created<Json<AppointmentEnvelope>>> {
    let service = AppointmentService::new(state.service_context());
    Ok(Created(Json(service.book_for_client(client.id(), request).await?)))
}

/// Runs the expiry sweep before listing
///
/// GET /api/admin/appointments
pub async fn list(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<AppointmentListResponse>> {
    let service = AppointmentService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// POST /api/admin/appointments
pub async fn admin_book(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<AdminBookAppointmentRequest>,
) -> ApiResult<Created<Json<AppointmentEnvelope>>> {
    let service = AppointmentService::new(state.service_context());
    Ok(Created(Json(service.book_by_admin(request).await?)))
}

/// PUT /api/admin/appointments/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<AppointmentEnvelope>> {
    let service = AppointmentService::new(state.service_context());
    Ok(Json(service.update_status(id, request).await?))
}

/// DELETE /api/admin/appointments/:id
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = AppointmentService::new(state.service_context());
    Ok(Json(service.delete(id).await?))
}

/// POST /api/admin/mark-expired
pub async fn mark_expired(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<MarkExpiredResponse>> {
    let service = AppointmentService::new(state.service_context());
    Ok(Json(service.mark_expired().await?))
}
