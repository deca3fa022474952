//! Consultation service
//!
//! Message threads between a client and an attorney. Admins can read every
//! thread and answer on the attorney's side.

use legal_core::{Consultation, ConsultationMessage, DomainError, Role, SenderRole, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    ConsultationEnvelope, ConsultationListResponse, ConsultationRecordResponse, ConsultationResponse,
    OpenConsultationRequest, PostMessageRequest, PostedMessageEnvelope, PostedMessageResponse,
    ThreadMessageResponse, ThreadMessagesResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

fn message_text(request: &PostMessageRequest) -> ServiceResult<&str> {
    let text = request.message.trim();
    if text.is_empty() {
        return Err(ServiceError::validation("Message is required"));
    }
    Ok(text)
}

/// Consultation service
pub struct ConsultationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConsultationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn get(&self, id: Snowflake) -> ServiceResult<Consultation> {
        Ok(self
            .ctx
            .consultation_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ConsultationNotFound(id))?)
    }

    /// Load a consultation the caller takes part in
    async fn get_for_participant(&self, id: Snowflake, caller_id: Snowflake) -> ServiceResult<Consultation> {
        let consultation = self.get(id).await?;
        if !consultation.is_participant(caller_id) {
            return Err(DomainError::NotParticipant.into());
        }
        Ok(consultation)
    }

    async fn thread(&self, consultation_id: Snowflake) -> ServiceResult<ThreadMessagesResponse> {
        let messages: Vec<ThreadMessageResponse> = self
            .ctx
            .consultation_repo()
            .messages(consultation_id)
            .await?
            .iter()
            .map(ThreadMessageResponse::from)
            .collect();

        Ok(ThreadMessagesResponse {
            total: messages.len(),
            messages,
        })
    }

    // === Participants ===

    /// Threads where the caller is the client or the attorney
    #[instrument(skip(self))]
    pub async fn list_for_participant(&self, caller_id: Snowflake) -> ServiceResult<ConsultationListResponse> {
        let consultations: Vec<ConsultationResponse> = self
            .ctx
            .consultation_repo()
            .list_for_participant(caller_id)
            .await?
            .iter()
            .map(ConsultationResponse::from)
            .collect();

        Ok(ConsultationListResponse {
            total: consultations.len(),
            consultations,
        })
    }

    #[instrument(skip(self, request), fields(attorney_id = %request.attorney_id))]
    pub async fn open(&self, client_id: Snowflake, request: OpenConsultationRequest) -> ServiceResult<ConsultationEnvelope> {
        self.ctx.active_user(client_id).await?;
        if self.ctx.attorney_repo().find_by_id(request.attorney_id).await?.is_none() {
            return Err(DomainError::AttorneyNotFound(request.attorney_id).into());
        }

        let consultation = Consultation::new(
            self.ctx.generate_id(),
            client_id,
            request.attorney_id,
            request.subject.trim().to_string(),
        );
        self.ctx.consultation_repo().create(&consultation).await?;

        info!(consultation_id = %consultation.id, "Consultation opened");

        Ok(ConsultationEnvelope {
            message: "Consultation started successfully".to_string(),
            consultation: ConsultationRecordResponse::from(&consultation),
        })
    }

    #[instrument(skip(self))]
    pub async fn messages(&self, caller_id: Snowflake, id: Snowflake) -> ServiceResult<ThreadMessagesResponse> {
        self.get_for_participant(id, caller_id).await?;
        self.thread(id).await
    }

    /// Post into a thread as the client or the attorney
    #[instrument(skip(self, request))]
    pub async fn post(
        &self,
        caller_id: Snowflake,
        role: Role,
        id: Snowflake,
        request: PostMessageRequest,
    ) -> ServiceResult<PostedMessageEnvelope> {
        let text = message_text(&request)?;
        self.get_for_participant(id, caller_id).await?;

        let message = ConsultationMessage::new(
            self.ctx.generate_id(),
            id,
            caller_id,
            SenderRole::from(role),
            text.to_string(),
        );
        self.ctx.consultation_repo().add_message(&message).await?;
        self.ctx.consultation_repo().touch(id).await?;

        info!(consultation_id = %id, message_id = %message.id, sender_role = %message.sender_role, "Message posted");

        Ok(PostedMessageEnvelope {
            message: "Message sent successfully".to_string(),
            message_data: PostedMessageResponse::from(&message),
        })
    }

    // === Admin ===

    /// Every thread, most recently active first
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<ConsultationListResponse> {
        let consultations: Vec<ConsultationResponse> = self
            .ctx
            .consultation_repo()
            .list_detailed()
            .await?
            .iter()
            .map(ConsultationResponse::from)
            .collect();

        Ok(ConsultationListResponse {
            total: consultations.len(),
            consultations,
        })
    }

    #[instrument(skip(self))]
    pub async fn admin_messages(&self, id: Snowflake) -> ServiceResult<ThreadMessagesResponse> {
        self.get(id).await?;
        self.thread(id).await
    }

    /// Answer on the attorney's side of the thread
    #[instrument(skip(self, request))]
    pub async fn admin_reply(
        &self,
        admin_user_id: Snowflake,
        id: Snowflake,
        request: PostMessageRequest,
    ) -> ServiceResult<PostedMessageEnvelope> {
        let text = message_text(&request)?;
        self.get(id).await?;

        let reply = ConsultationMessage::admin_reply(self.ctx.generate_id(), id, admin_user_id, text);
        self.ctx.consultation_repo().add_message(&reply).await?;
        self.ctx.consultation_repo().touch(id).await?;

        info!(consultation_id = %id, admin_user_id = %admin_user_id, "Admin replied to consultation");

        Ok(PostedMessageEnvelope {
            message: "Reply sent successfully".to_string(),
            message_data: PostedMessageResponse::from(&reply),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text_is_trimmed() {
        let request = PostMessageRequest {
            message: "  Can we reschedule?\n".into(),
        };
        assert_eq!(message_text(&request).unwrap(), "Can we reschedule?");
    }

    #[test]
    fn test_blank_message_is_rejected() {
        let request = PostMessageRequest { message: " \t ".into() };
        let err = message_text(&request).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Message is required");
    }
}
