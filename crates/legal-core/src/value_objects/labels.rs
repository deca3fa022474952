//! Closed sets of labels stored as TEXT columns and sent verbatim over the API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string is not one of an enum's labels
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Comma separated list of every label, for error messages
            pub fn valid_values() -> String {
                Self::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    other => Err(ParseLabelError { kind: $kind, value: other.to_string() }),
                }
            }
        }
    };
}

labelled_enum! {
    /// Account role; decides which store holds the login credential
    pub enum Role ("role") {
        #[default]
        Client => "Client",
        Attorney => "Attorney",
        Admin => "Admin",
    }
}

labelled_enum! {
    pub enum Gender ("gender") {
        #[default]
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

labelled_enum! {
    pub enum OAuthProvider ("provider") {
        #[default]
        Google => "google",
        Facebook => "facebook",
        LinkedIn => "linkedin",
    }
}

labelled_enum! {
    /// Appointment lifecycle. There is no transition table: admins may set any value.
    pub enum AppointmentStatus ("appointment status") {
        #[default]
        Pending => "Pending",
        Confirmed => "Confirmed",
        Completed => "Completed",
        Cancelled => "Cancelled",
        Rejected => "Rejected",
        Expired => "Expired",
    }
}

labelled_enum! {
    pub enum FeedbackStatus ("feedback status") {
        #[default]
        Pending => "Pending",
        Reviewed => "Reviewed",
        Resolved => "Resolved",
        Archived => "Archived",
    }
}

labelled_enum! {
    pub enum BookingStatus ("booking status") {
        #[default]
        Pending => "Pending",
        Confirmed => "Confirmed",
        Completed => "Completed",
        Cancelled => "Cancelled",
        Expired => "Expired",
    }
}

labelled_enum! {
    pub enum ConsultationStatus ("consultation status") {
        #[default]
        Active => "Active",
        Closed => "Closed",
    }
}

labelled_enum! {
    pub enum SenderRole ("sender role") {
        #[default]
        Client => "Client",
        Attorney => "Attorney",
    }
}

labelled_enum! {
    pub enum ServiceCategory ("service category") {
        #[default]
        LegalService => "Legal Service",
        Consultation => "Consultation",
        DocumentReview => "Document Review",
        CourtRepresentation => "Court Representation",
        LegalAdvice => "Legal Advice",
    }
}

impl AppointmentStatus {
    /// Statuses that hold an attorney's slot
    pub const BLOCKING: [Self; 2] = [Self::Pending, Self::Confirmed];

    /// Statuses the expiry sweep leaves alone
    pub const FINAL: [Self; 3] = [Self::Completed, Self::Cancelled, Self::Expired];

    pub fn blocks_slot(self) -> bool {
        Self::BLOCKING.contains(&self)
    }
}

impl From<Role> for SenderRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Attorney | Role::Admin => Self::Attorney,
            Role::Client => Self::Client,
        }
    }
}
