//! Lab test handlers
//!
//! The catalogue and client booking, then the admin catalogue and booking screens.

use axum::{extract::State, Json};
use legal_service::dto::{
    BookLabTestRequest, BookingEnvelope, LabTestBookingListResponse, LabTestEnvelope, LabTestListResponse,
    LabTestRequest, MessageResponse, UpdateStatusRequest,
};
use legal_service::LabTestService;

use crate::extractors::{AdminUser, AuthUser, ClientUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /api/lab-tests
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> ApiResult<Json<LabTestListResponse>> {
    let service = LabTestService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// GET /api/admin/lab-tests
pub async fn admin_list(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Json<LabTestListResponse>> {
    let service = LabTestService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// POST /api/lab-tests/bookings
pub async fn book(
    State(state): State<AppState>,
    client: ClientUser,
    ValidatedJson(request): ValidatedJson<BookLabTestRequest>,
) -> ApiResult<Created<Json<BookingEnvelope>>> {
    let service = LabTestService::new(state.service_context());
    Ok(Created(Json(service.book(client.id(), request).await?)))
}

/// POST /api/admin/lab-tests
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<LabTestRequest>,
) -> ApiResult<Created<Json<LabTestEnvelope>>> {
    let service = LabTestService::new(state.service_context());
    Ok(Created(Json(service.create(request).await?)))
}

/// PUT /api/admin/lab-tests/:id
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<LabTestRequest>,
) -> ApiResult<Json<LabTestEnvelope>> {
    let service = LabTestService::new(state.service_context());
    Ok(Json(service.update(id, request).await?))
}

/// DELETE /api/admin/lab-tests/:id
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = LabTestService::new(state.service_context());
    Ok(Json(service.delete(id).await?))
}

/// GET /api/admin/lab-test-bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<LabTestBookingListResponse>> {
    let service = LabTestService::new(state.service_context());
    Ok(Json(service.list_bookings().await?))
}

/// PUT /api/admin/lab-test-bookings/:id/status
pub async fn update_booking_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<Json<BookingEnvelope>> {
    let service = LabTestService::new(state.service_context());
    Ok(Json(service.update_booking_status(id, request).await?))
}

/// DELETE /api/admin/lab-test-bookings/:id
pub async fn delete_booking(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = LabTestService::new(state.service_context());
    Ok(Json(service.delete_booking(id).await?))
}
