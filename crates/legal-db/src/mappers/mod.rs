//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions for every table. Status and role
//! columns are TEXT; labels the domain does not know fall back to the
//! enum default and are logged.

mod account;
mod booking;
mod catalogue;
mod consultation;

use std::str::FromStr;

use legal_core::value_objects::Snowflake;

/// Parse a TEXT label column, falling back to the default on unknown values
pub(crate) fn parse_label<T>(value: &str, column: &'static str) -> T
where
    T: FromStr + Default,
{
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(column, value, "Unknown label in database row");
        T::default()
    })
}

/// Parse a nullable TEXT label column
pub(crate) fn parse_optional_label<T>(value: Option<&str>, column: &'static str) -> Option<T>
where
    T: FromStr,
{
    let value = value?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(column, value, "Unknown label in database row");
            None
        }
    }
}

pub(crate) fn snowflake(id: Option<i64>) -> Option<Snowflake> {
    id.map(Snowflake::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use legal_core::value_objects::{AppointmentStatus, Gender};

    #[test]
    fn unknown_labels_fall_back() {
        let status: AppointmentStatus = parse_label("Rescheduled", "status");
        assert_eq!(status, AppointmentStatus::Pending);

        let status: AppointmentStatus = parse_label("Confirmed", "status");
        assert_eq!(status, AppointmentStatus::Confirmed);
    }

    #[test]
    fn optional_labels() {
        assert_eq!(parse_optional_label::<Gender>(Some("Female"), "gender"), Some(Gender::Female));
        assert_eq!(parse_optional_label::<Gender>(Some("f"), "gender"), None);
        assert_eq!(parse_optional_label::<Gender>(None, "gender"), None);
    }
}
