//! # legal-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `legal-core`. It handles:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use legal_db::{create_pool, PoolConfig, PgUserRepository};
//! use legal_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/legal")).await?;
//!     let users = PgUserRepository::new(pool);
//!     let _ = users.find_by_email("client@example.com").await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_lazy_pool, create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgAdminRepository, PgAppointmentRepository, PgAttorneyRepository, PgConsultationRepository,
    PgFeedbackRepository, PgLabTestBookingRepository, PgLabTestRepository,
    PgLegalServiceRepository, PgUserRepository,
};
