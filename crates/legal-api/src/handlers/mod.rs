//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod admin_users;
pub mod admins;
pub mod appointments;
pub mod attorneys;
pub mod consultations;
pub mod feedback;
pub mod health;
pub mod lab_tests;
pub mod services;
pub mod users;
