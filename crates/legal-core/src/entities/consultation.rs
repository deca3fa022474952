//! Consultation threads between a client and an attorney

use chrono::{DateTime, Utc};

use super::PartySummary;
use crate::value_objects::{ConsultationStatus, SenderRole, Snowflake};

/// Prefix marking messages an admin posted on an attorney's behalf
pub const ADMIN_REPLY_PREFIX: &str = "[Admin Reply] ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consultation {
    pub id: Snowflake,
    pub client_id: Snowflake,
    pub attorney_id: Option<Snowflake>,
    pub subject: String,
    pub status: ConsultationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Consultation {
    pub fn new(id: Snowflake, client_id: Snowflake, attorney_id: Snowflake, subject: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            client_id,
            attorney_id: Some(attorney_id),
            subject,
            status: ConsultationStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// The client who opened the thread or the attorney it was opened with
    pub fn is_participant(&self, id: Snowflake) -> bool {
        self.client_id == id || self.attorney_id == Some(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationMessage {
    pub id: Snowflake,
    pub consultation_id: Snowflake,
    pub sender_id: Snowflake,
    pub sender_role: SenderRole,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl ConsultationMessage {
    pub fn new(
        id: Snowflake,
        consultation_id: Snowflake,
        sender_id: Snowflake,
        sender_role: SenderRole,
        message: String,
    ) -> Self {
        Self {
            id,
            consultation_id,
            sender_id,
            sender_role,
            message,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Reply an admin posts into a thread; it shows up on the attorney side
    pub fn admin_reply(id: Snowflake, consultation_id: Snowflake, admin_user_id: Snowflake, text: &str) -> Self {
        Self::new(
            id,
            consultation_id,
            admin_user_id,
            SenderRole::Attorney,
            format!("{ADMIN_REPLY_PREFIX}{}", text.trim()),
        )
    }
}

/// Consultation joined with both participants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationDetails {
    pub consultation: Consultation,
    pub client: Option<PartySummary>,
    pub attorney: Option<PartySummary>,
    pub message_count: i64,
}

/// Message joined with the sender's display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageWithSender {
    pub message: ConsultationMessage,
    pub sender_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_reply_is_prefixed_and_attributed_to_attorney_side() {
        let reply = ConsultationMessage::admin_reply(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "  We will call you tomorrow.  ",
        );
        assert_eq!(reply.message, "[Admin Reply] We will call you tomorrow.");
        assert_eq!(reply.sender_role, SenderRole::Attorney);
        assert!(!reply.read);
    }

    #[test]
    fn participants() {
        let consultation = Consultation::new(Snowflake::new(1), Snowflake::new(10), Snowflake::new(20), "Lease".into());
        assert!(consultation.is_participant(Snowflake::new(10)));
        assert!(consultation.is_participant(Snowflake::new(20)));
        assert!(!consultation.is_participant(Snowflake::new(30)));
    }
}
