//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{
    Admin, AdminAccount, AdminLogin, Appointment, AppointmentDetails, AppointmentStats, Attorney,
    Consultation, ConsultationDetails, ConsultationMessage, Feedback, FeedbackDetails, LabTest,
    LabTestBooking, LabTestBookingDetails, LegalService, MessageWithSender, User,
};
use crate::error::DomainError;
use crate::value_objects::{AppointmentStatus, BookingStatus, FeedbackStatus, Role, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a user; social accounts pass no password hash
    async fn create(&self, user: &User, password_hash: Option<&str>) -> RepoResult<()>;

    /// Persist every mutable field of the user
    async fn update(&self, user: &User) -> RepoResult<()>;

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;

    /// Active users, newest first
    async fn list_active(&self) -> RepoResult<Vec<User>>;

    /// Every user including soft-deleted ones, newest first
    async fn list_all(&self) -> RepoResult<Vec<User>>;

    async fn count_by_role(&self, role: Role) -> RepoResult<i64>;
}

// ============================================================================
// Attorney Repository
// ============================================================================

#[async_trait]
pub trait AttorneyRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Attorney>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Attorney>>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    async fn create(&self, attorney: &Attorney, password_hash: Option<&str>) -> RepoResult<()>;

    async fn update(&self, attorney: &Attorney) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;

    /// All attorneys, newest first
    async fn list(&self) -> RepoResult<Vec<Attorney>>;

    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Admin Repository
// ============================================================================

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Admin>>;

    async fn find_by_user_id(&self, user_id: Snowflake) -> RepoResult<Option<Admin>>;

    async fn create(&self, admin: &Admin) -> RepoResult<()>;

    /// Persist permissions and login bookkeeping
    async fn update(&self, admin: &Admin) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// All admins with their user identity, newest first
    async fn list_accounts(&self) -> RepoResult<Vec<AdminAccount>>;

    /// All admins ordered by most recent login, never-logged-in last
    async fn list_accounts_by_last_login(&self) -> RepoResult<Vec<AdminAccount>>;

    async fn record_login(&self, login: &AdminLogin) -> RepoResult<()>;

    /// Most recent logins of one admin, newest first
    async fn recent_logins(&self, admin_id: Snowflake, limit: i64) -> RepoResult<Vec<AdminLogin>>;
}

// ============================================================================
// Legal Service Repository
// ============================================================================

#[async_trait]
pub trait LegalServiceRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LegalService>>;

    /// Whether another active service already uses `name`
    async fn name_taken(&self, name: &str, exclude: Option<Snowflake>) -> RepoResult<bool>;

    async fn create(&self, service: &LegalService) -> RepoResult<()>;

    async fn update(&self, service: &LegalService) -> RepoResult<()>;

    /// Active services, newest first
    async fn list_active(&self) -> RepoResult<Vec<LegalService>>;
}

// ============================================================================
// Appointment Repository
// ============================================================================

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Appointment>>;

    async fn create(&self, appointment: &Appointment) -> RepoResult<()>;

    async fn update_status(&self, id: Snowflake, status: AppointmentStatus) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Whether the attorney already has a Pending or Confirmed appointment in this slot
    async fn slot_taken(&self, attorney_id: Snowflake, date: NaiveDate, time: &str) -> RepoResult<bool>;

    /// Expire every unsettled appointment dated before `today`; returns the number changed
    async fn mark_expired(&self, today: NaiveDate) -> RepoResult<u64>;

    /// All appointments with client and attorney, latest slot first
    async fn list_detailed(&self) -> RepoResult<Vec<AppointmentDetails>>;

    /// One client's appointments, latest slot first
    async fn list_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<AppointmentDetails>>;

    /// Most recently created appointments
    async fn recent_detailed(&self, limit: i64) -> RepoResult<Vec<AppointmentDetails>>;

    async fn stats(&self) -> RepoResult<AppointmentStats>;
}

// ============================================================================
// Feedback Repository
// ============================================================================

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Feedback>>;

    async fn create(&self, feedback: &Feedback) -> RepoResult<()>;

    /// Persist status and response fields
    async fn update(&self, feedback: &Feedback) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Newest first, optionally restricted to one status
    async fn list_detailed(&self, status: Option<FeedbackStatus>) -> RepoResult<Vec<FeedbackDetails>>;
}

// ============================================================================
// Lab Test Repositories
// ============================================================================

#[async_trait]
pub trait LabTestRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LabTest>>;

    async fn name_taken(&self, name: &str, exclude: Option<Snowflake>) -> RepoResult<bool>;

    async fn create(&self, test: &LabTest) -> RepoResult<()>;

    async fn update(&self, test: &LabTest) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Sorted by test name
    async fn list(&self) -> RepoResult<Vec<LabTest>>;

    async fn booking_count(&self, test_id: Snowflake) -> RepoResult<i64>;
}

#[async_trait]
pub trait LabTestBookingRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LabTestBooking>>;

    async fn create(&self, booking: &LabTestBooking) -> RepoResult<()>;

    async fn update_status(&self, id: Snowflake, status: BookingStatus) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// All bookings with client and test, latest slot first
    async fn list_detailed(&self) -> RepoResult<Vec<LabTestBookingDetails>>;
}

// ============================================================================
// Consultation Repository
// ============================================================================

#[async_trait]
pub trait ConsultationRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Consultation>>;

    async fn create(&self, consultation: &Consultation) -> RepoResult<()>;

    /// Bump `updated_at` to now
    async fn touch(&self, id: Snowflake) -> RepoResult<()>;

    /// Every consultation, most recently active first
    async fn list_detailed(&self) -> RepoResult<Vec<ConsultationDetails>>;

    /// Consultations where `participant_id` is the client or the attorney
    async fn list_for_participant(&self, participant_id: Snowflake) -> RepoResult<Vec<ConsultationDetails>>;

    async fn add_message(&self, message: &ConsultationMessage) -> RepoResult<()>;

    /// Messages oldest first
    async fn messages(&self, consultation_id: Snowflake) -> RepoResult<Vec<MessageWithSender>>;
}
