//! Appointment entity and the read models built around it

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::value_objects::{AppointmentStatus, Snowflake};

/// Parse an `HH:MM` slot time, returning the canonical zero-padded form
pub fn parse_slot_time(value: &str) -> Option<String> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .ok()
        .map(|time| time.format("%H:%M").to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: Snowflake,
    pub user_id: Snowflake,
    /// `None` once the attorney has been removed
    pub attorney_id: Option<Snowflake>,
    pub date: NaiveDate,
    pub time: String,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        attorney_id: Snowflake,
        date: NaiveDate,
        time: String,
        status: AppointmentStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            attorney_id: Some(attorney_id),
            date,
            time,
            symptoms: None,
            notes: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Still ahead of the client and not yet settled
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today && self.status.blocks_slot()
    }
}

/// Identity of a client shown next to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartySummary {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttorneySummary {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub specialization: Option<String>,
    pub fees: Option<f64>,
}

/// Appointment joined with its client and attorney
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub client: Option<PartySummary>,
    pub attorney: Option<AttorneySummary>,
}

/// Appointment totals for the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppointmentStats {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub expired: i64,
}
