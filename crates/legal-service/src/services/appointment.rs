//! Appointment service
//!
//! Booking (by clients and by admins), the admin listing with its lazy
//! expiry sweep, and status changes.

use chrono::{NaiveDate, Utc};
use legal_core::{parse_slot_time, Appointment, AppointmentStatus, DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    AdminBookAppointmentRequest, AppointmentEnvelope, AppointmentListResponse,
    AppointmentRecordResponse, AppointmentResponse, BookAppointmentRequest, MarkExpiredResponse,
    MessageResponse, UpdateStatusRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Everything needed to place one appointment
#[derive(Debug, Clone)]
struct Booking {
    user_id: Snowflake,
    attorney_id: Snowflake,
    date: NaiveDate,
    time: String,
    symptoms: Option<String>,
    notes: Option<String>,
    status: AppointmentStatus,
}

/// Parse a raw status label, listing every valid label on failure
pub(crate) fn parse_appointment_status(raw: &str) -> Result<AppointmentStatus, DomainError> {
    raw.trim().parse().map_err(|_| DomainError::InvalidStatus {
        valid: AppointmentStatus::valid_values(),
    })
}

/// Appointment service
pub struct AppointmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AppointmentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Client books a slot with an attorney; starts out Pending
    #[instrument(skip(self, request), fields(attorney_id = %request.attorney_id, date = %request.date))]
    pub async fn book_for_client(
        &self,
        user_id: Snowflake,
        request: BookAppointmentRequest,
    ) -> ServiceResult<AppointmentEnvelope> {
        self.ctx.active_user(user_id).await?;

        let appointment = self
            .place(Booking {
                user_id,
                attorney_id: request.attorney_id,
                date: request.date,
                time: request.time,
                symptoms: request.symptoms,
                notes: request.notes,
                status: AppointmentStatus::Pending,
            })
            .await?;

        Ok(AppointmentEnvelope {
            message: "Appointment booked successfully".to_string(),
            appointment: AppointmentRecordResponse::from(&appointment),
        })
    }

    /// Admin books on behalf of a client; Confirmed unless told otherwise
    #[instrument(skip(self, request))]
    pub async fn book_by_admin(&self, request: AdminBookAppointmentRequest) -> ServiceResult<AppointmentEnvelope> {
        let (Some(user_id), Some(attorney_id), Some(date), Some(time)) =
            (request.user_id, request.doctor_id, request.date, request.time)
        else {
            return Err(ServiceError::validation(
                "User ID, Attorney ID, date, and time are required",
            ));
        };

        let appointment = self
            .place(Booking {
                user_id,
                attorney_id,
                date,
                time,
                symptoms: request.symptoms,
                notes: request.notes,
                status: request.status.unwrap_or(AppointmentStatus::Confirmed),
            })
            .await?;

        Ok(AppointmentEnvelope {
            message: "Appointment booked successfully".to_string(),
            appointment: AppointmentRecordResponse::from(&appointment),
        })
    }

    async fn place(&self, booking: Booking) -> ServiceResult<Appointment> {
        let time = parse_slot_time(&booking.time).ok_or_else(|| DomainError::InvalidSlotTime(booking.time.clone()))?;

        if self.ctx.user_repo().find_by_id(booking.user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(booking.user_id).into());
        }
        if self.ctx.attorney_repo().find_by_id(booking.attorney_id).await?.is_none() {
            return Err(DomainError::AttorneyNotFound(booking.attorney_id).into());
        }

        if self
            .ctx
            .appointment_repo()
            .slot_taken(booking.attorney_id, booking.date, &time)
            .await?
        {
            warn!(attorney_id = %booking.attorney_id, date = %booking.date, %time, "Slot already booked");
            return Err(DomainError::SlotAlreadyBooked.into());
        }

        let mut appointment = Appointment::new(
            self.ctx.generate_id(),
            booking.user_id,
            booking.attorney_id,
            booking.date,
            time,
            booking.status,
        );
        appointment.symptoms = booking.symptoms;
        appointment.notes = booking.notes;

        self.ctx.appointment_repo().create(&appointment).await?;

        info!(
            appointment_id = %appointment.id,
            status = %appointment.status,
            "Appointment booked"
        );

        Ok(appointment)
    }

    /// All appointments, after expiring the stale ones
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<AppointmentListResponse> {
        let expired = self.ctx.appointment_repo().mark_expired(Utc::now().date_naive()).await?;
        if expired > 0 {
            info!(expired, "Expired stale appointments");
        }

        let appointments: Vec<AppointmentResponse> = self
            .ctx
            .appointment_repo()
            .list_detailed()
            .await?
            .iter()
            .map(AppointmentResponse::from)
            .collect();

        Ok(AppointmentListResponse {
            total: appointments.len(),
            appointments,
        })
    }

    /// Set any valid status; there is no transition table
    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn update_status(
        &self,
        id: Snowflake,
        request: UpdateStatusRequest,
    ) -> ServiceResult<AppointmentEnvelope> {
        let status = parse_appointment_status(&request.status)?;

        let mut appointment = self
            .ctx
            .appointment_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AppointmentNotFound(id))?;

        self.ctx.appointment_repo().update_status(id, status).await?;
        appointment.status = status;
        appointment.updated_at = Utc::now();

        info!(appointment_id = %id, %status, "Appointment status updated");

        Ok(AppointmentEnvelope {
            message: "Appointment status updated successfully".to_string(),
            appointment: AppointmentRecordResponse::from(&appointment),
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake) -> ServiceResult<MessageResponse> {
        if self.ctx.appointment_repo().find_by_id(id).await?.is_none() {
            return Err(DomainError::AppointmentNotFound(id).into());
        }

        self.ctx.appointment_repo().delete(id).await?;

        info!(appointment_id = %id, "Appointment deleted");

        Ok(MessageResponse::new("Appointment deleted successfully"))
    }

    #[instrument(skip(self))]
    pub async fn mark_expired(&self) -> ServiceResult<MarkExpiredResponse> {
        let modified = self.ctx.appointment_repo().mark_expired(Utc::now().date_naive()).await?;

        info!(modified, "Expiry sweep run on demand");

        Ok(MarkExpiredResponse::new(modified))
    }
}
