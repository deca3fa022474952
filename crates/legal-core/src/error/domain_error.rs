//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found")]
    UserNotFound(Snowflake),

    #[error("User not found")]
    UserEmailNotFound(String),

    #[error("Attorney not found")]
    AttorneyNotFound(Snowflake),

    #[error("Attorney not found with this email")]
    AttorneyEmailNotFound(String),

    #[error("Admin not found")]
    AdminNotFound(Snowflake),

    #[error("Service not found")]
    ServiceNotFound(Snowflake),

    #[error("Appointment not found")]
    AppointmentNotFound(Snowflake),

    #[error("Feedback not found")]
    FeedbackNotFound(Snowflake),

    #[error("Lab test not found")]
    LabTestNotFound(Snowflake),

    #[error("Booking not found")]
    BookingNotFound(Snowflake),

    #[error("Consultation not found")]
    ConsultationNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid status. Valid statuses are: {valid}")]
    InvalidStatus { valid: String },

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidSlotTime(String),

    #[error("Password must be at least {min} characters long")]
    WeakPassword { min: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only admins can access this endpoint")]
    AdminRequired,

    #[error("You are not a participant in this consultation")]
    NotParticipant,

    #[error("Account has been deactivated")]
    AccountDeactivated,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Record already exists")]
    DuplicateRecord,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Attorney with this email already exists")]
    AttorneyEmailTaken,

    #[error("User is already an admin")]
    AlreadyAdmin,

    #[error("This time slot is already booked")]
    SlotAlreadyBooked,

    #[error("Lab test with this name already exists")]
    LabTestNameTaken,

    #[error("Service name already exists")]
    ServiceNameTaken,

    #[error("Cannot delete lab test. There are {bookings} booking(s) associated with this test.")]
    LabTestInUse { bookings: i64 },

    #[error("This feature is only for Google users")]
    NotGoogleAccount,

    #[error("Email not verified with provider")]
    EmailNotVerified,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) | Self::UserEmailNotFound(_) => "UNKNOWN_USER",
            Self::AttorneyNotFound(_) | Self::AttorneyEmailNotFound(_) => "UNKNOWN_ATTORNEY",
            Self::AdminNotFound(_) => "UNKNOWN_ADMIN",
            Self::ServiceNotFound(_) => "UNKNOWN_SERVICE",
            Self::AppointmentNotFound(_) => "UNKNOWN_APPOINTMENT",
            Self::FeedbackNotFound(_) => "UNKNOWN_FEEDBACK",
            Self::LabTestNotFound(_) => "UNKNOWN_LAB_TEST",
            Self::BookingNotFound(_) => "UNKNOWN_BOOKING",
            Self::ConsultationNotFound(_) => "UNKNOWN_CONSULTATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidStatus { .. } => "INVALID_STATUS",
            Self::InvalidSlotTime(_) => "INVALID_TIME",
            Self::WeakPassword { .. } => "WEAK_PASSWORD",

            // Authorization
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::NotParticipant => "NOT_PARTICIPANT",
            Self::AccountDeactivated => "ACCOUNT_DEACTIVATED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::DuplicateRecord => "DUPLICATE_RECORD",

            // Business Rules
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::AttorneyEmailTaken => "ATTORNEY_ALREADY_EXISTS",
            Self::AlreadyAdmin => "ALREADY_ADMIN",
            Self::SlotAlreadyBooked => "SLOT_ALREADY_BOOKED",
            Self::LabTestNameTaken => "LAB_TEST_NAME_TAKEN",
            Self::ServiceNameTaken => "SERVICE_NAME_TAKEN",
            Self::LabTestInUse { .. } => "LAB_TEST_IN_USE",
            Self::NotGoogleAccount => "NOT_GOOGLE_ACCOUNT",
            Self::EmailNotVerified => "EMAIL_NOT_VERIFIED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::UserEmailNotFound(_)
                | Self::AttorneyNotFound(_)
                | Self::AttorneyEmailNotFound(_)
                | Self::AdminNotFound(_)
                | Self::ServiceNotFound(_)
                | Self::AppointmentNotFound(_)
                | Self::FeedbackNotFound(_)
                | Self::LabTestNotFound(_)
                | Self::BookingNotFound(_)
                | Self::ConsultationNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidStatus { .. }
                | Self::InvalidSlotTime(_)
                | Self::WeakPassword { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AdminRequired | Self::NotParticipant | Self::AccountDeactivated
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::DuplicateRecord)
    }

    /// Check if this breaks a business rule; these are reported as bad requests
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            Self::UserAlreadyExists
                | Self::EmailAlreadyRegistered
                | Self::AttorneyEmailTaken
                | Self::AlreadyAdmin
                | Self::SlotAlreadyBooked
                | Self::LabTestNameTaken
                | Self::ServiceNameTaken
                | Self::LabTestInUse { .. }
                | Self::NotGoogleAccount
                | Self::EmailNotVerified
        )
    }
}
