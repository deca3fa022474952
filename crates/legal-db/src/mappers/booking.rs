//! Appointment, feedback and lab booking mappers

use legal_core::entities::{
    Appointment, AppointmentDetails, AppointmentStats, AttorneySummary, Feedback, FeedbackDetails,
    LabTestBooking, LabTestBookingDetails, PartySummary,
};
use legal_core::value_objects::Snowflake;

use super::{parse_label, snowflake};
use crate::models::{
    AppointmentDetailsModel, AppointmentModel, AppointmentStatsModel, FeedbackDetailsModel,
    FeedbackModel, LabTestBookingDetailsModel, LabTestBookingModel,
};

/// Build a party summary from LEFT JOIN columns; absent when the join found nothing
pub(crate) fn party(
    id: Option<i64>,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Option<PartySummary> {
    match (id, name, email) {
        (Some(id), Some(name), Some(email)) => Some(PartySummary {
            id: Snowflake::new(id),
            name,
            email,
            phone,
        }),
        _ => None,
    }
}

impl From<AppointmentModel> for Appointment {
    fn from(model: AppointmentModel) -> Self {
        Appointment {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            attorney_id: snowflake(model.attorney_id),
            date: model.date,
            time: model.time,
            symptoms: model.symptoms,
            notes: model.notes,
            status: parse_label(&model.status, "appointments.status"),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AppointmentDetailsModel> for AppointmentDetails {
    fn from(model: AppointmentDetailsModel) -> Self {
        let client = party(
            Some(model.appointment.user_id),
            model.client_name,
            model.client_email,
            model.client_phone,
        );
        let attorney = match (model.appointment.attorney_id, model.attorney_name, model.attorney_email) {
            (Some(id), Some(name), Some(email)) => Some(AttorneySummary {
                id: Snowflake::new(id),
                name,
                email,
                specialization: model.attorney_specialization,
                fees: model.attorney_fees,
            }),
            _ => None,
        };

        AppointmentDetails {
            appointment: model.appointment.into(),
            client,
            attorney,
        }
    }
}

impl From<AppointmentStatsModel> for AppointmentStats {
    fn from(model: AppointmentStatsModel) -> Self {
        AppointmentStats {
            total: model.total,
            pending: model.pending,
            confirmed: model.confirmed,
            completed: model.completed,
            cancelled: model.cancelled,
            expired: model.expired,
        }
    }
}

impl From<FeedbackModel> for Feedback {
    fn from(model: FeedbackModel) -> Self {
        Feedback {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            subject: model.subject,
            message: model.message,
            rating: model.rating,
            status: parse_label(&model.status, "feedback.status"),
            admin_response: model.admin_response,
            responded_by: snowflake(model.responded_by),
            responded_at: model.responded_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<FeedbackDetailsModel> for FeedbackDetails {
    fn from(model: FeedbackDetailsModel) -> Self {
        let user = party(
            Some(model.feedback.user_id),
            model.user_name,
            model.user_email,
            model.user_phone,
        );
        FeedbackDetails {
            feedback: model.feedback.into(),
            user,
            responder_name: model.responder_name,
        }
    }
}

impl From<LabTestBookingModel> for LabTestBooking {
    fn from(model: LabTestBookingModel) -> Self {
        LabTestBooking {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            test_id: Snowflake::new(model.test_id),
            date: model.date,
            time: model.time,
            status: parse_label(&model.status, "lab_test_bookings.status"),
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<LabTestBookingDetailsModel> for LabTestBookingDetails {
    fn from(model: LabTestBookingDetailsModel) -> Self {
        let user = party(
            Some(model.booking.user_id),
            model.user_name,
            model.user_email,
            model.user_phone,
        );
        LabTestBookingDetails {
            booking: model.booking.into(),
            user,
            test_name: model.test_name,
            price: model.test_price,
        }
    }
}
