//! Database models - SQLx-compatible structs for PostgreSQL tables

mod admin;
mod appointment;
mod attorney;
mod consultation;
mod feedback;
mod legal_service;
mod user;

pub use admin::{AdminAccountModel, AdminLoginModel, AdminModel};
pub use appointment::{AppointmentDetailsModel, AppointmentModel, AppointmentStatsModel};
pub use attorney::AttorneyModel;
pub use consultation::{
    ConsultationDetailsModel, ConsultationMessageModel, ConsultationModel, MessageWithSenderModel,
};
pub use feedback::{FeedbackDetailsModel, FeedbackModel};
pub use lab_test::{LabTestBookingDetailsModel, LabTestBookingModel, LabTestModel};
pub use legal_service::LegalServiceModel;
pub use user::UserModel;
