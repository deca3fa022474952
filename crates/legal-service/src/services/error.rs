//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use legal_common::{domain_status, AppError};
use legal_core::DomainError;
use serde_json::Value;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (auth, config, infrastructure)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Malformed or incomplete input, reported verbatim
    Validation(String),

    /// Bad request carrying its own error code
    BadRequest { code: &'static str, message: String },

    /// Login refused, optionally with hints for the client
    LoginRejected {
        message: String,
        details: Option<Value>,
    },

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, .. } => write!(f, "{resource} not found"),
            Self::Validation(msg) => f.write_str(msg),
            Self::BadRequest { message, .. } => f.write_str(message),
            Self::LoginRejected { message, .. } => f.write_str(message),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn bad_request(code: &'static str, msg: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: msg.into(),
        }
    }

    /// Plain "Invalid credentials" rejection
    pub fn invalid_credentials() -> Self {
        Self::LoginRejected {
            message: "Invalid credentials".to_string(),
            details: None,
        }
    }

    pub fn login_hint(msg: impl Into<String>, details: Value) -> Self {
        Self::LoginRejected {
            message: msg.into(),
            details: Some(details),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) | Self::BadRequest { .. } | Self::LoginRejected { .. } => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest { code, .. } => *code,
            Self::LoginRejected { .. } => "INVALID_CREDENTIALS",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Structured hints attached to the error, if any
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::LoginRejected { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => AppError::NotFound(format!("{resource} {id}")),
            ServiceError::Validation(msg)
            | ServiceError::BadRequest { message: msg, .. }
            | ServiceError::LoginRejected { message: msg, .. } => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
