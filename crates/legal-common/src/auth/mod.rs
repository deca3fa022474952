//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService};
pub use password::{hash_password, validate_password_length, verify_password, MIN_PASSWORD_LENGTH};
