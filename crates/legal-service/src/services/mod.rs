//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod admin;
pub mod appointment;
pub mod attorney;
pub mod auth;
pub mod catalog;
pub mod consultation;
pub mod context;
pub mod error;
pub mod feedback;
pub mod oauth;
pub mod storage;
pub mod user;

// Re-export all services for convenience
pub use admin::AdminService;
pub use appointment::AppointmentService;
pub use attorney::AttorneyService;
pub use auth::{AuthService, LoginOrigin};
pub use catalog::CatalogService;
pub use consultation::ConsultationService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use feedback::FeedbackService;
pub use lab_test::LabTestService;
pub use oauth::OAuthService;
pub use storage::IconStorage;
pub use user::UserService;
