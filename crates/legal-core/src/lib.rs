//! # legal-core
//!
//! Domain layer for the legal services marketplace: entities, value objects,
//! repository traits and the domain error type.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    parse_slot_time, Admin, AdminAccount, AdminLogin, Appointment, AppointmentDetails,
    AppointmentStats, Attorney, AttorneySummary, AvailableTime, Consultation,
    ConsultationDetails, ConsultationMessage, Feedback, FeedbackDetails, LabTest, LabTestBooking,
    LabTestBookingDetails, LegalService, MessageWithSender, PartySummary, PracticeDetails, User,
    ADMIN_REPLY_PREFIX, ADMIN_SOFT_DELETE_REASON,
};
pub use error::DomainError;
pub use traits::{
    AdminRepository, AppointmentRepository, AttorneyRepository, ConsultationRepository,
    FeedbackRepository, LabTestBookingRepository, LabTestRepository, LegalServiceRepository,
    RepoResult, UserRepository,
};
pub use value_objects::{
    AdminPermissions, AppointmentStatus, BookingStatus, ConsultationStatus, FeedbackStatus,
    Gender, OAuthProvider, ParseLabelError, PermissionParseError, Role, SenderRole,
    ServiceCategory, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
