//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, path ids, the client
//! origin and the multipart service form.

mod auth;
mod multipart;
mod origin;
mod path;
mod validated;

pub use auth::{AdminUser, AuthUser, ClientUser};
pub use multipart::{ServiceMultipart, ICON_FIELD};
pub use origin::ClientOrigin;
pub use path::IdPath;
pub use validated::ValidatedJson;
