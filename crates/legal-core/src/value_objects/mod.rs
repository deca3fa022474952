//! Value objects - immutable types that represent domain concepts

mod admin_permissions;
mod labels;
mod snowflake;

pub use admin_permissions::{AdminPermissions, PermissionParseError};
pub use labels::{
    AppointmentStatus, BookingStatus, ConsultationStatus, FeedbackStatus, Gender, OAuthProvider,
    ParseLabelError, Role, SenderRole, ServiceCategory,
};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
