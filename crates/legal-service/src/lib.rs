//! # legal-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AdminService, AppointmentService, AttorneyService, AuthService, CatalogService,
    ConsultationService, FeedbackService, IconStorage, LabTestService, LoginOrigin, OAuthService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
