//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names follow the JSON the web client already sends, which mixes
//! camelCase and snake_case between the user and admin surfaces.

use chrono::NaiveDate;
use legal_core::{AdminPermissions, AppointmentStatus, Gender, Role, Snowflake};
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

// ============================================================================
// Account Requests
// ============================================================================

/// Self-registration; `role = Attorney` creates an attorney account instead of a user
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub role: Option<Role>,
}

impl RegisterRequest {
    pub fn wants_attorney_account(&self) -> bool {
        self.role == Some(Role::Attorney)
    }
}

/// Email/password login against the user or attorney store
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,

    pub role: Option<Role>,
}

impl LoginRequest {
    pub fn is_attorney_login(&self) -> bool {
        self.role == Some(Role::Attorney)
    }
}

/// Shared by attorney password reset and Google password setup
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and new password are required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Email and new password are required"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
}

/// OAuth authorization code returned to the front end by the provider
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OAuthCodeRequest {
    pub code: Option<String>,
}

// ============================================================================
// Client Self-Service Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub attorney_id: Snowflake,

    pub date: NaiveDate,

    #[validate(length(min = 1, message = "Time is required"))]
    pub time: String,

    #[validate(length(max = 2000, message = "Case summary must be at most 2000 characters"))]
    pub symptoms: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFeedbackRequest {
    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookLabTestRequest {
    pub test_id: Snowflake,

    pub date: NaiveDate,

    #[validate(length(min = 1, message = "Time is required"))]
    pub time: String,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OpenConsultationRequest {
    pub attorney_id: Snowflake,

    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,
}

/// Message posted into a consultation thread, by a participant or an admin
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostMessageRequest {
    #[serde(default)]
    #[validate(length(max = 5000, message = "Message must be at most 5000 characters"))]
    pub message: String,
}

// ============================================================================
// Admin Session Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub user_id: Snowflake,

    /// Falls back to the default grant
    pub permissions: Option<AdminPermissions>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePermissionsRequest {
    pub permissions: AdminPermissions,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PromoteToAdminRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

// ============================================================================
// Admin User Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name, email, and password are required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Name, email, and password are required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Name, email, and password are required"))]
    pub password: String,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
}

// ============================================================================
// Admin Attorney Requests
// ============================================================================

/// Attorney profile created by an admin from an existing user.
///
/// Practice fields (`attorneyName`, `bio`, `languages`, ...) sit at the top
/// level of the body and are collected into `practice`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttorneyRequest {
    pub user_id: Option<Snowflake>,

    pub specialization: Option<String>,
    pub qualification: Option<String>,

    #[validate(range(min = 0, max = 80, message = "Experience must be 0-80 years"))]
    pub experience: Option<i32>,

    #[validate(range(min = 0.0, message = "Fees cannot be negative"))]
    pub fees: Option<f64>,

    pub phone: Option<String>,

    #[serde(flatten)]
    pub practice: Map<String, Value>,
}

impl CreateAttorneyRequest {
    /// Every mandatory field is present and non-blank
    pub fn has_required_fields(&self) -> bool {
        let filled = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        self.user_id.is_some()
            && filled(&self.specialization)
            && filled(&self.qualification)
            && self.experience.is_some_and(|years| years > 0)
            && self.fees.is_some_and(|fees| fees > 0.0)
    }
}

/// Partial attorney update; absent fields are left untouched
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttorneyRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,

    #[validate(range(min = 0, max = 80, message = "Experience must be 0-80 years"))]
    pub experience: Option<i32>,

    #[validate(range(min = 0.0, message = "Fees cannot be negative"))]
    pub fees: Option<f64>,

    #[serde(flatten)]
    pub practice: Map<String, Value>,
}

// ============================================================================
// Admin Appointment Requests
// ============================================================================

/// Admin booking on behalf of a client. Missing fields are reported together.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AdminBookAppointmentRequest {
    pub user_id: Option<Snowflake>,
    pub doctor_id: Option<Snowflake>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,

    #[validate(length(max = 2000, message = "Case summary must be at most 2000 characters"))]
    pub symptoms: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,

    /// Defaults to Confirmed
    pub status: Option<AppointmentStatus>,
}

/// Status change; the raw label is checked by the service so the error can list valid values
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

// ============================================================================
// Feedback Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RespondFeedbackRequest {
    #[serde(default)]
    #[validate(length(max = 2000, message = "Response must be at most 2000 characters"))]
    pub admin_response: String,

    /// An unknown label is ignored rather than rejected
    pub status: Option<String>,
}

// ============================================================================
// Lab Test Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LabTestRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Test name must be at most 100 characters"))]
    pub test_name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
}

// ============================================================================
// Catalogue Requests
// ============================================================================

/// Text fields of the multipart service form
#[derive(Debug, Clone, Default, Validate)]
pub struct ServiceForm {
    #[validate(length(max = 100, message = "Service name must be at most 100 characters"))]
    pub service_name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub category: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
}

/// File part of the multipart service form
#[derive(Debug, Clone)]
pub struct IconUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let valid: RegisterRequest = serde_json::from_value(json!({
            "name": "Asha",
            "email": "asha@example.com",
            "password": "secret1",
            "dateOfBirth": "1990-04-01",
            "gender": "Female"
        }))
        .unwrap();
        assert!(valid.validate().is_ok());
        assert!(!valid.wants_attorney_account());
        assert_eq!(valid.date_of_birth, NaiveDate::from_ymd_opt(1990, 4, 1));

        let mut short_password = valid.clone();
        short_password.password = "abc".to_string();
        assert!(short_password.validate().is_err());

        let mut bad_email = valid;
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_attorney_role_selects_attorney_store() {
        let request: LoginRequest =
            serde_json::from_value(json!({ "email": "a@x.com", "password": "pw", "role": "Attorney" })).unwrap();
        assert!(request.is_attorney_login());

        let request: RegisterRequest = serde_json::from_value(json!({
            "name": "A", "email": "a@x.com", "password": "secret1", "role": "Attorney"
        }))
        .unwrap();
        assert!(request.wants_attorney_account());
    }

    #[test]
    fn test_missing_reset_fields_fail_validation() {
        let request: ResetPasswordRequest = serde_json::from_value(json!({ "email": "a@x.com" })).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("new_password"));
    }

    #[test]
    fn test_feedback_rating_bounds() {
        let mut request = CreateFeedbackRequest {
            subject: "Service".into(),
            message: "Helpful".into(),
            rating: 5,
        };
        assert!(request.validate().is_ok());
        request.rating = 0;
        assert!(request.validate().is_err());
        request.rating = 6;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_attorney_collects_practice_fields() {
        let request: CreateAttorneyRequest = serde_json::from_value(json!({
            "userId": "42",
            "specialization": "Family",
            "qualification": "LLB",
            "experience": 7,
            "fees": 1500.0,
            "bio": "Mediator",
            "languages": ["English", "Gujarati"]
        }))
        .unwrap();
        assert!(request.has_required_fields());
        assert_eq!(request.practice["bio"], "Mediator");
        assert!(!request.practice.contains_key("specialization"));
    }

    #[test]
    fn test_create_attorney_requires_core_fields() {
        let request: CreateAttorneyRequest = serde_json::from_value(json!({
            "userId": "42",
            "specialization": " ",
            "qualification": "LLB",
            "experience": 7,
            "fees": 100.0
        }))
        .unwrap();
        assert!(!request.has_required_fields());
    }

    #[test]
    fn test_admin_booking_uses_snake_case_keys() {
        let request: AdminBookAppointmentRequest = serde_json::from_value(json!({
            "user_id": "1",
            "doctor_id": "2",
            "date": "2030-01-15",
            "time": "10:30"
        }))
        .unwrap();
        assert_eq!(request.doctor_id, Some(Snowflake::new(2)));
        assert!(request.status.is_none());
    }

    #[test]
    fn test_unknown_permission_is_rejected() {
        let result: Result<UpdatePermissionsRequest, _> =
            serde_json::from_value(json!({ "permissions": ["view_users", "fly"] }));
        assert!(result.is_err());
    }
}
