//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in legal-core.
//! Each repository handles database operations for a specific domain entity.

mod admin;
mod appointment;
mod attorney;
mod consultation;
mod error;
mod feedback;
mod legal_service;
mod user;

pub use admin::PgAdminRepository;
pub use appointment::PgAppointmentRepository;
pub use attorney::PgAttorneyRepository;
pub use consultation::PgConsultationRepository;
pub use feedback::PgFeedbackRepository;
pub use lab_test::{PgLabTestBookingRepository, PgLabTestRepository};
pub use legal_service::PgLegalServiceRepository;
pub use user::PgUserRepository;
