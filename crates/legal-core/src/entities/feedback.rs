//! Client feedback and the admin response to it

use chrono::{DateTime, Utc};

use super::PartySummary;
use crate::value_objects::{FeedbackStatus, Snowflake};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub subject: String,
    pub message: String,
    pub rating: i16,
    pub status: FeedbackStatus,
    pub admin_response: Option<String>,
    pub responded_by: Option<Snowflake>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feedback {
    pub const MIN_RATING: i16 = 1;
    pub const MAX_RATING: i16 = 5;

    pub fn new(id: Snowflake, user_id: Snowflake, subject: String, message: String, rating: i16) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            subject,
            message,
            rating,
            status: FeedbackStatus::Pending,
            admin_response: None,
            responded_by: None,
            responded_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: FeedbackStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Record an admin response. `status` of `None` keeps the current status.
    pub fn respond(&mut self, responder: Snowflake, response: String, status: Option<FeedbackStatus>) {
        let now = Utc::now();
        self.admin_response = Some(response);
        self.responded_by = Some(responder);
        self.responded_at = Some(now);
        if let Some(status) = status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

/// Feedback joined with its author and responder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackDetails {
    pub feedback: Feedback,
    pub user: Option<PartySummary>,
    pub responder_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respond_stamps_responder() {
        let mut feedback = Feedback::new(Snowflake::new(1), Snowflake::new(2), "s".into(), "m".into(), 4);
        feedback.respond(Snowflake::new(9), "Thanks".into(), Some(FeedbackStatus::Resolved));

        assert_eq!(feedback.responded_by, Some(Snowflake::new(9)));
        assert!(feedback.responded_at.is_some());
        assert_eq!(feedback.status, FeedbackStatus::Resolved);
    }

    #[test]
    fn respond_without_status_keeps_current() {
        let mut feedback = Feedback::new(Snowflake::new(1), Snowflake::new(2), "s".into(), "m".into(), 4);
        feedback.set_status(FeedbackStatus::Archived);
        feedback.respond(Snowflake::new(9), "Noted".into(), None);
        assert_eq!(feedback.status, FeedbackStatus::Archived);
    }
}
