//! Domain entities - core business objects

mod admin;
mod appointment;
mod attorney;
mod consultation;
mod feedback;
mod legal_service;
mod user;

pub use admin::{Admin, AdminAccount, AdminLogin};
pub use appointment::{
    parse_slot_time, Appointment, AppointmentDetails, AppointmentStats, AttorneySummary,
    PartySummary,
};
pub use attorney::{Attorney, AvailableTime, PracticeDetails};
pub use consultation::{
    Consultation, ConsultationDetails, ConsultationMessage, MessageWithSender, ADMIN_REPLY_PREFIX,
};
pub use feedback::{Feedback, FeedbackDetails};
pub use lab_test::{LabTest, LabTestBooking, LabTestBookingDetails};
pub use legal_service::LegalService;
pub use user::{User, ADMIN_SOFT_DELETE_REASON};
