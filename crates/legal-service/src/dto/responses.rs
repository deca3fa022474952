//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.
//! Key casing matches what the web client reads: camelCase on the user
//! surface, snake_case for a few admin fields (`admin_response`, `test_name`, ...).

use chrono::{DateTime, NaiveDate, Utc};
use legal_core::{
    AdminPermissions, AppointmentStatus, BookingStatus, ConsultationStatus, FeedbackStatus, Gender,
    OAuthProvider, PracticeDetails, Role, SenderRole, ServiceCategory,
};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Contact details of a client or attorney shown next to a record
#[derive(Debug, Clone, Serialize)]
pub struct PartyResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

// ============================================================================
// Account Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserSummaryResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttorneyAccountResponse {
    pub id: String,
    pub attorney_name: String,
    pub attorney_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserAuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummaryResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttorneyAuthResponse {
    pub message: String,
    pub token: String,
    pub attorney: AttorneyAccountResponse,
}

/// Login or registration outcome, keyed by the store that holds the account
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AuthResponse {
    User(UserAuthResponse),
    Attorney(AttorneyAuthResponse),
}

impl AuthResponse {
    pub fn token(&self) -> &str {
        match self {
            Self::User(auth) => &auth.token,
            Self::Attorney(auth) => &auth.token,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttorneyPasswordResponse {
    pub message: String,
    pub attorney: AttorneyAccountResponse,
}

/// Profile read or update; `message` only accompanies updates
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserSummaryResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile_picture: Option<String>,
    pub provider: Option<OAuthProvider>,
    pub is_social_login: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialAuthResponse {
    pub token: String,
    pub user: SocialUserResponse,
}

// ============================================================================
// Client Dashboard Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
    pub is_social_login: bool,
    pub provider: Option<OAuthProvider>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStatsResponse {
    pub total_appointments: usize,
    pub upcoming_appointments: usize,
    pub completed_appointments: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientDashboardResponse {
    pub message: String,
    pub user: ClientProfileResponse,
    pub stats: ClientStatsResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientAppointmentsResponse {
    pub message: String,
    pub appointments: Vec<AppointmentResponse>,
    pub stats: ClientStatsResponse,
}

// ============================================================================
// Appointment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentAttorneyResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub specialization: Option<String>,
    pub fees: Option<f64>,
}

/// Appointment with client (`patient`) and attorney (`doctor`) summaries
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    pub patient: Option<PartyResponse>,
    pub doctor: Option<AppointmentAttorneyResponse>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<AppointmentResponse>,
    pub total: usize,
}

/// Appointment row without joins, returned after writes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecordResponse {
    pub id: String,
    pub user_id: String,
    pub attorney_id: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentEnvelope {
    pub message: String,
    pub appointment: AppointmentRecordResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkExpiredResponse {
    pub message: String,
    pub modified_count: u64,
}

impl MarkExpiredResponse {
    pub fn new(modified_count: u64) -> Self {
        Self {
            message: format!("{modified_count} appointments marked as expired"),
            modified_count,
        }
    }
}

// ============================================================================
// Admin Dashboard Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AdminIdentityResponse {
    pub name: String,
    pub email: String,
    pub permissions: AdminPermissions,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub total_clients: i64,
    pub total_attorneys: i64,
    pub total_appointments: i64,
    pub pending_appointments: i64,
    pub confirmed_appointments: i64,
    pub completed_appointments: i64,
    pub cancelled_appointments: i64,
    pub expired_appointments: i64,
}

/// Compact row of the dashboard's recent appointments
#[derive(Debug, Clone, Serialize)]
pub struct RecentAppointmentResponse {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
    pub patient: Option<String>,
    pub doctor: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardResponse {
    pub admin: AdminIdentityResponse,
    pub stats: DashboardStatsResponse,
    pub recent_appointments: Vec<RecentAppointmentResponse>,
}

// ============================================================================
// Admin User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecordResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_social_login: bool,
    pub profile_picture: Option<String>,
    pub provider: Option<OAuthProvider>,
    pub provider_id: Option<String>,
    pub is_active: bool,
    pub status: &'static str,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deletion_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub users: Vec<UserRecordResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedUserEnvelope {
    pub message: String,
    pub user: CreatedUserResponse,
}

/// Outcome of a soft delete or restore
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restored_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserStatusEnvelope {
    pub message: String,
    pub user: UserStatusResponse,
}

// ============================================================================
// Attorney Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttorneyResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub fees: Option<f64>,
    pub experience: Option<i32>,
    pub qualification: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Attorney with the practice details inlined at the top level
#[derive(Debug, Clone, Serialize)]
pub struct AttorneyDetailResponse {
    #[serde(flatten)]
    pub attorney: AttorneyResponse,
    #[serde(flatten)]
    pub practice: PracticeDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttorneyListResponse {
    pub attorneys: Vec<AttorneyResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttorneyEnvelope {
    pub message: String,
    pub attorney: AttorneyDetailResponse,
}

// ============================================================================
// Admin Account Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecordResponse {
    pub id: String,
    pub user_id: String,
    pub permissions: AdminPermissions,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminRecordEnvelope {
    pub message: String,
    pub admin: AdminRecordResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccountResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub permissions: AdminPermissions,
    pub last_login_at: Option<DateTime<Utc>>,
    pub login_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminListResponse {
    pub admins: Vec<AdminAccountResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminAccountEnvelope {
    pub message: String,
    pub admin: AdminAccountResponse,
}

/// Admin identity returned by the admin login; `id` is the user id
#[derive(Debug, Clone, Serialize)]
pub struct AdminSessionResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub permissions: AdminPermissions,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminLoginResponse {
    pub message: String,
    pub token: String,
    pub admin: AdminSessionResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginEntryResponse {
    pub time: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginHistoryResponse {
    pub email: String,
    pub name: String,
    /// `None` for admins that never logged in
    pub last_login_at: Option<DateTime<Utc>>,
    pub login_count: i32,
    pub recent_logins: Vec<LoginEntryResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginHistoryResponse {
    pub message: String,
    pub admins: Vec<AdminLoginHistoryResponse>,
    pub total: usize,
}

// ============================================================================
// Feedback Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ResponderResponse {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub id: String,
    pub subject: String,
    pub message: String,
    pub rating: i16,
    pub status: FeedbackStatus,
    pub admin_response: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub user: Option<PartyResponse>,
    pub responded_by: Option<ResponderResponse>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackListResponse {
    pub feedbacks: Vec<FeedbackResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEnvelope {
    pub message: String,
    pub feedback: FeedbackResponse,
}

// ============================================================================
// Lab Test Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LabTestResponse {
    pub id: String,
    pub test_name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTestListResponse {
    pub lab_tests: Vec<LabTestResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTestEnvelope {
    pub message: String,
    pub lab_test: LabTestResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookedTestResponse {
    pub id: String,
    pub test_name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTestBookingResponse {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub patient: Option<PartyResponse>,
    pub test: BookedTestResponse,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabTestBookingListResponse {
    pub bookings: Vec<LabTestBookingResponse>,
    pub total: usize,
}

/// Booking row without joins, returned after writes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecordResponse {
    pub id: String,
    pub user_id: String,
    pub test_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingEnvelope {
    pub message: String,
    pub booking: BookingRecordResponse,
}

// ============================================================================
// Consultation Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationResponse {
    pub id: String,
    pub client: Option<PartyResponse>,
    pub attorney: Option<PartyResponse>,
    pub status: ConsultationStatus,
    pub subject: String,
    pub message_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsultationListResponse {
    pub consultations: Vec<ConsultationResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRecordResponse {
    pub id: String,
    pub client_id: String,
    pub attorney_id: Option<String>,
    pub subject: String,
    pub status: ConsultationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsultationEnvelope {
    pub message: String,
    pub consultation: ConsultationRecordResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadMessageResponse {
    pub id: String,
    pub message: String,
    pub sender_role: SenderRole,
    pub sender_name: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadMessagesResponse {
    pub messages: Vec<ThreadMessageResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostedMessageResponse {
    pub id: String,
    pub message: String,
    pub sender_role: SenderRole,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedMessageEnvelope {
    pub message: String,
    pub message_data: PostedMessageResponse,
}

// ============================================================================
// Catalogue Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LegalServiceResponse {
    pub id: String,
    pub service_name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: ServiceCategory,
    pub icon: String,
    pub icon_file: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegalServiceListResponse {
    pub services: Vec<LegalServiceResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegalServiceEnvelope {
    pub message: String,
    pub service: LegalServiceResponse,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_response_is_keyed_by_account_kind() {
        let response = AuthResponse::Attorney(AttorneyAuthResponse {
            message: "Attorney login successful".into(),
            token: "t".into(),
            attorney: AttorneyAccountResponse {
                id: "1".into(),
                attorney_name: "Adv. Rao".into(),
                attorney_email: "rao@example.com".into(),
                role: Some(Role::Attorney),
            },
        });
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["attorney"]["attorneyName"], "Adv. Rao");
        assert_eq!(value["attorney"]["role"], "Attorney");
        assert!(value.get("user").is_none());
        assert_eq!(response.token(), "t");
    }

    #[test]
    fn test_feedback_mixes_key_casing() {
        let now = Utc::now();
        let response = FeedbackResponse {
            id: "9".into(),
            subject: "s".into(),
            message: "m".into(),
            rating: 4,
            status: FeedbackStatus::Reviewed,
            admin_response: Some("ok".into()),
            responded_at: Some(now),
            user: None,
            responded_by: None,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["admin_response"], "ok");
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["responded_by"], json!(null));
    }

    #[test]
    fn test_attorney_detail_inlines_practice() {
        let mut practice = PracticeDetails::default();
        practice.bar_number = Some("B-7".into());
        let response = AttorneyDetailResponse {
            attorney: AttorneyResponse {
                id: "3".into(),
                name: "Mehta".into(),
                email: "m@example.com".into(),
                phone: None,
                specialization: Some("Tax".into()),
                fees: Some(900.0),
                experience: Some(4),
                qualification: None,
                created_at: Utc::now(),
            },
            practice,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["barNumber"], "B-7");
        assert_eq!(value["specialization"], "Tax");
        assert_eq!(value["availableTime"]["start"], "09:00");
    }

    #[test]
    fn test_mark_expired_message() {
        let response = MarkExpiredResponse::new(3);
        assert_eq!(response.message, "3 appointments marked as expired");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["modifiedCount"], 3);
    }

    #[test]
    fn test_readiness_response() {
        assert!(ReadinessResponse::ready(true).is_ready());
        let not_ready = ReadinessResponse::ready(false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.database, "unhealthy");
    }
}
