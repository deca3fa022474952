//! Feedback service
//!
//! Clients leave rated feedback; admins triage and answer it.

use legal_core::{DomainError, Feedback, FeedbackDetails, FeedbackStatus, PartySummary, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CreateFeedbackRequest, FeedbackEnvelope, FeedbackListResponse, FeedbackResponse, MessageResponse,
    RespondFeedbackRequest, UpdateStatusRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// How a list filter narrows the feedback set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusFilter {
    Any,
    Only(FeedbackStatus),
    /// An unknown label matches nothing
    Nothing,
}

impl StatusFilter {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::Any,
            Some(label) => label.parse().map_or(Self::Nothing, Self::Only),
        }
    }
}

/// Status applied alongside a response: default Reviewed, unknown labels ignored
fn response_status(raw: Option<&str>) -> Option<FeedbackStatus> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Some(FeedbackStatus::Reviewed),
        Some(label) => label.parse().ok(),
    }
}

/// Feedback service
pub struct FeedbackService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedbackService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn get(&self, id: Snowflake) -> ServiceResult<Feedback> {
        Ok(self
            .ctx
            .feedback_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::FeedbackNotFound(id))?)
    }

    /// Join the author and responder for a single feedback
    async fn details(&self, feedback: Feedback) -> ServiceResult<FeedbackDetails> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(feedback.user_id)
            .await?
            .map(|u| PartySummary {
                id: u.id,
                name: u.name,
                email: u.email,
                phone: u.phone,
            });

        let responder_name = match feedback.responded_by {
            Some(id) => self.ctx.user_repo().find_by_id(id).await?.map(|u| u.name),
            None => None,
        };

        Ok(FeedbackDetails {
            feedback,
            user,
            responder_name,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, user_id: Snowflake, request: CreateFeedbackRequest) -> ServiceResult<FeedbackEnvelope> {
        self.ctx.active_user(user_id).await?;

        let feedback = Feedback::new(
            self.ctx.generate_id(),
            user_id,
            request.subject.trim().to_string(),
            request.message.trim().to_string(),
            request.rating,
        );
        self.ctx.feedback_repo().create(&feedback).await?;

        info!(feedback_id = %feedback.id, rating = feedback.rating, "Feedback submitted");

        Ok(FeedbackEnvelope {
            message: "Feedback submitted successfully".to_string(),
            feedback: FeedbackResponse::from(&self.details(feedback).await?),
        })
    }

    /// Newest first, optionally filtered by status
    #[instrument(skip(self))]
    pub async fn list(&self, status: Option<&str>) -> ServiceResult<FeedbackListResponse> {
        let details = match StatusFilter::parse(status) {
            StatusFilter::Any => self.ctx.feedback_repo().list_detailed(None).await?,
            StatusFilter::Only(status) => self.ctx.feedback_repo().list_detailed(Some(status)).await?,
            StatusFilter::Nothing => Vec::new(),
        };

        let feedbacks: Vec<FeedbackResponse> = details.iter().map(FeedbackResponse::from).collect();
        Ok(FeedbackListResponse {
            total: feedbacks.len(),
            feedbacks,
        })
    }

    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn update_status(&self, id: Snowflake, request: UpdateStatusRequest) -> ServiceResult<FeedbackEnvelope> {
        let status: FeedbackStatus = request.status.trim().parse().map_err(|_| DomainError::InvalidStatus {
            valid: FeedbackStatus::valid_values(),
        })?;

        let mut feedback = self.get(id).await?;
        feedback.set_status(status);
        self.ctx.feedback_repo().update(&feedback).await?;

        info!(feedback_id = %id, %status, "Feedback status updated");

        Ok(FeedbackEnvelope {
            message: "Feedback status updated successfully".to_string(),
            feedback: FeedbackResponse::from(&self.details(feedback).await?),
        })
    }

    /// Record the admin's answer and stamp who gave it
    #[instrument(skip(self, request))]
    pub async fn respond(
        &self,
        id: Snowflake,
        responder_id: Snowflake,
        request: RespondFeedbackRequest,
    ) -> ServiceResult<FeedbackEnvelope> {
        let response = request.admin_response.trim();
        if response.is_empty() {
            return Err(ServiceError::validation("Admin response is required"));
        }

        let mut feedback = self.get(id).await?;
        feedback.respond(responder_id, response.to_string(), response_status(request.status.as_deref()));
        self.ctx.feedback_repo().update(&feedback).await?;

        info!(feedback_id = %id, responder_id = %responder_id, status = %feedback.status, "Feedback answered");

        Ok(FeedbackEnvelope {
            message: "Response added successfully".to_string(),
            feedback: FeedbackResponse::from(&self.details(feedback).await?),
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake) -> ServiceResult<MessageResponse> {
        self.get(id).await?;
        self.ctx.feedback_repo().delete(id).await?;

        info!(feedback_id = %id, "Feedback deleted");

        Ok(MessageResponse::new("Feedback deleted successfully"))
    }
}
