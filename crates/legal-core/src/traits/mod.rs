//! Ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    AdminRepository, AppointmentRepository, AttorneyRepository, ConsultationRepository,
    FeedbackRepository, LabTestBookingRepository, LabTestRepository, LegalServiceRepository,
    RepoResult, UserRepository,
};
