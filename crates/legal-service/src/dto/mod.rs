//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export request types
pub use requests::{
    AdminBookAppointmentRequest, AdminLoginRequest, BookAppointmentRequest, BookLabTestRequest,
    CreateAdminRequest, CreateAttorneyRequest, CreateFeedbackRequest, CreateUserRequest, IconUpload,
    LabTestRequest, LoginRequest, OAuthCodeRequest, OpenConsultationRequest, PostMessageRequest,
    PromoteToAdminRequest, RegisterRequest, ResetPasswordRequest, RespondFeedbackRequest, ServiceForm,
    UpdateAttorneyRequest, UpdatePermissionsRequest, UpdateProfileRequest, UpdateStatusRequest,
};

// Re-export response types
pub use responses::{
    AdminAccountEnvelope, AdminAccountResponse, AdminDashboardResponse, AdminIdentityResponse,
    AdminListResponse, AdminLoginHistoryResponse, AdminLoginResponse, AdminRecordEnvelope,
    AdminRecordResponse, AdminSessionResponse, AppointmentAttorneyResponse, AppointmentEnvelope,
    AppointmentListResponse, AppointmentRecordResponse, AppointmentResponse, AttorneyAccountResponse,
    AttorneyAuthResponse, AttorneyDetailResponse, AttorneyEnvelope, AttorneyListResponse,
    AttorneyPasswordResponse, AttorneyResponse, AuthResponse, BookedTestResponse, BookingEnvelope,
    BookingRecordResponse, ClientAppointmentsResponse, ClientDashboardResponse, ClientProfileResponse,
    ClientStatsResponse, ConsultationEnvelope, ConsultationListResponse, ConsultationRecordResponse,
    ConsultationResponse, CreatedUserEnvelope, CreatedUserResponse, DashboardStatsResponse,
    FeedbackEnvelope, FeedbackListResponse, FeedbackResponse, HealthChecks, HealthResponse,
    LabTestBookingListResponse, LabTestBookingResponse, LabTestEnvelope, LabTestListResponse,
    LabTestResponse, LegalServiceEnvelope, LegalServiceListResponse, LegalServiceResponse,
    LoginEntryResponse, LoginHistoryResponse, MarkExpiredResponse, MessageResponse, PartyResponse,
    PostedMessageEnvelope, PostedMessageResponse, ReadinessResponse, RecentAppointmentResponse,
    ResponderResponse, SocialAuthResponse, SocialUserResponse, ThreadMessageResponse,
    ThreadMessagesResponse, UserAuthResponse, UserEnvelope, UserListResponse, UserRecordResponse,
    UserStatusEnvelope, UserStatusResponse, UserSummaryResponse,
};
