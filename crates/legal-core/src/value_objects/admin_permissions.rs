//! Admin permission flags
//!
//! Stored as BIGINT bits in the database and exchanged over the API as a list of
//! snake_case names such as `["view_users", "manage_users"]`.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AdminPermissions: u64 {
        const VIEW_APPOINTMENTS   = 1 << 0;
        const MANAGE_APPOINTMENTS = 1 << 1;
        const VIEW_USERS          = 1 << 2;
        const MANAGE_USERS        = 1 << 3;
        const VIEW_DOCTORS        = 1 << 4;
        const MANAGE_DOCTORS      = 1 << 5;
        const VIEW_FEEDBACK       = 1 << 6;
        const MANAGE_FEEDBACK     = 1 << 7;
        const VIEW_SERVICES       = 1 << 8;
        const MANAGE_SERVICES     = 1 << 9;

        /// Granted to admins created without an explicit permission list
        const DEFAULT_GRANT = Self::VIEW_APPOINTMENTS.bits()
            | Self::MANAGE_APPOINTMENTS.bits()
            | Self::VIEW_USERS.bits()
            | Self::VIEW_DOCTORS.bits();

        const FULL_GRANT = (1 << 10) - 1;
    }
}

/// Wire name for every single flag, in declaration order
const NAMES: [(AdminPermissions, &str); 10] = [
    (AdminPermissions::VIEW_APPOINTMENTS, "view_appointments"),
    (AdminPermissions::MANAGE_APPOINTMENTS, "manage_appointments"),
    (AdminPermissions::VIEW_USERS, "view_users"),
    (AdminPermissions::MANAGE_USERS, "manage_users"),
    (AdminPermissions::VIEW_DOCTORS, "view_doctors"),
    (AdminPermissions::MANAGE_DOCTORS, "manage_doctors"),
    (AdminPermissions::VIEW_FEEDBACK, "view_feedback"),
    (AdminPermissions::MANAGE_FEEDBACK, "manage_feedback"),
    (AdminPermissions::VIEW_SERVICES, "view_services"),
    (AdminPermissions::MANAGE_SERVICES, "manage_services"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown permission: {0}")]
pub struct PermissionParseError(pub String);

impl AdminPermissions {
    pub fn names(self) -> Vec<&'static str> {
        NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }

    /// Build a set from wire names, rejecting anything unknown
    pub fn from_names<I, S>(names: I) -> Result<Self, PermissionParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(Self::empty(), |acc, name| {
            let name = name.as_ref();
            NAMES
                .iter()
                .find(|(_, candidate)| *candidate == name)
                .map(|(flag, _)| acc | *flag)
                .ok_or_else(|| PermissionParseError(name.to_string()))
        })
    }

    // Only the low 10 bits are ever set, both conversions are lossless
    #[allow(clippy::cast_possible_wrap)]
    #[inline]
    pub fn to_i64(self) -> i64 {
        self.bits() as i64
    }

    #[allow(clippy::cast_sign_loss)]
    #[inline]
    pub fn from_i64(bits: i64) -> Self {
        Self::from_bits_truncate(bits as u64)
    }
}

impl Default for AdminPermissions {
    fn default() -> Self {
        Self::DEFAULT_GRANT
    }
}

impl Serialize for AdminPermissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

impl<'de> Deserialize<'de> for AdminPermissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Self::from_names(&names).map_err(serde::de::Error::custom)
    }
}
