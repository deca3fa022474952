//! Consultation mappers

use legal_core::entities::{
    Consultation, ConsultationDetails, ConsultationMessage, MessageWithSender,
};
use legal_core::value_objects::Snowflake;

use super::booking::party;
use super::{parse_label, snowflake};
use crate::models::{
    ConsultationDetailsModel, ConsultationMessageModel, ConsultationModel, MessageWithSenderModel,
};

impl From<ConsultationModel> for Consultation {
    fn from(model: ConsultationModel) -> Self {
        Consultation {
            id: Snowflake::new(model.id),
            client_id: Snowflake::new(model.client_id),
            attorney_id: snowflake(model.attorney_id),
            subject: model.subject,
            status: parse_label(&model.status, "consultations.status"),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ConsultationDetailsModel> for ConsultationDetails {
    fn from(model: ConsultationDetailsModel) -> Self {
        let client = party(
            Some(model.consultation.client_id),
            model.client_name,
            model.client_email,
            model.client_phone,
        );
        let attorney = party(
            model.consultation.attorney_id,
            model.attorney_name,
            model.attorney_email,
            model.attorney_phone,
        );
        ConsultationDetails {
            consultation: model.consultation.into(),
            client,
            attorney,
            message_count: model.message_count,
        }
    }
}

impl From<ConsultationMessageModel> for ConsultationMessage {
    fn from(model: ConsultationMessageModel) -> Self {
        ConsultationMessage {
            id: Snowflake::new(model.id),
            consultation_id: Snowflake::new(model.consultation_id),
            sender_id: Snowflake::new(model.sender_id),
            sender_role: parse_label(&model.sender_role, "consultation_messages.sender_role"),
            message: model.message,
            read: model.is_read,
            created_at: model.created_at,
        }
    }
}

impl From<MessageWithSenderModel> for MessageWithSender {
    fn from(model: MessageWithSenderModel) -> Self {
        MessageWithSender {
            message: model.message.into(),
            sender_name: model.sender_name,
        }
    }
}
