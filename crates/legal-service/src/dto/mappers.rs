//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use legal_core::{
    AdminAccount, AdminLogin, Appointment, AppointmentDetails, AppointmentStats, Attorney,
    AttorneySummary, Consultation, ConsultationDetails, ConsultationMessage, FeedbackDetails,
    LabTest, LabTestBooking, LabTestBookingDetails, LegalService, MessageWithSender, PartySummary,
    Role, User,
};

use super::responses::{
    AdminAccountResponse, AppointmentAttorneyResponse, AppointmentRecordResponse,
    AppointmentResponse, AttorneyAccountResponse, AttorneyDetailResponse, AttorneyResponse,
    BookedTestResponse, BookingRecordResponse, ClientProfileResponse, ConsultationRecordResponse,
    ConsultationResponse, CreatedUserResponse, DashboardStatsResponse, FeedbackResponse,
    LabTestBookingResponse, LabTestResponse, LegalServiceResponse, LoginEntryResponse,
    PartyResponse, PostedMessageResponse, RecentAppointmentResponse, ResponderResponse,
    SocialUserResponse, ThreadMessageResponse, UserRecordResponse, UserSummaryResponse,
};

// ============================================================================
// Account Mappers
// ============================================================================

impl From<&User> for UserSummaryResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            phone: user.phone.clone(),
            address: user.address.clone(),
        }
    }
}

impl From<&User> for SocialUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            profile_picture: user.profile_picture.clone(),
            provider: user.provider,
            is_social_login: user.is_social_login,
        }
    }
}

impl From<&User> for ClientProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            phone: user.phone.clone(),
            address: user.address.clone(),
            profile_picture: user.profile_picture.clone(),
            is_social_login: user.is_social_login,
            provider: user.provider,
        }
    }
}

impl From<&User> for UserRecordResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            phone: user.phone.clone(),
            address: user.address.clone(),
            is_social_login: user.is_social_login,
            profile_picture: user.profile_picture.clone(),
            provider: user.provider,
            provider_id: user.provider_id.clone(),
            is_active: user.is_active,
            status: user.status_label(),
            deleted_at: user.deleted_at,
            deletion_reason: user.deletion_reason.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for CreatedUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            dob: user.date_of_birth,
            gender: user.gender,
            role: user.role,
        }
    }
}

impl From<&PartySummary> for PartyResponse {
    fn from(party: &PartySummary) -> Self {
        Self {
            id: party.id.to_string(),
            name: party.name.clone(),
            email: party.email.clone(),
            phone: party.phone.clone(),
        }
    }
}

// ============================================================================
// Attorney Mappers
// ============================================================================

impl AttorneyAccountResponse {
    /// Identity shown after attorney login or registration
    pub fn with_role(attorney: &Attorney) -> Self {
        Self {
            role: Some(Role::Attorney),
            ..Self::from(attorney)
        }
    }
}

impl From<&Attorney> for AttorneyAccountResponse {
    fn from(attorney: &Attorney) -> Self {
        Self {
            id: attorney.id.to_string(),
            attorney_name: attorney.name.clone(),
            attorney_email: attorney.email.clone(),
            role: None,
        }
    }
}

impl From<&Attorney> for AttorneyResponse {
    fn from(attorney: &Attorney) -> Self {
        Self {
            id: attorney.id.to_string(),
            name: attorney.display_name().to_string(),
            email: attorney.email.clone(),
            phone: attorney.phone.clone(),
            specialization: attorney.specialization.clone(),
            fees: attorney.fees,
            experience: attorney.experience,
            qualification: attorney.qualification.clone(),
            created_at: attorney.created_at,
        }
    }
}

impl From<&Attorney> for AttorneyDetailResponse {
    fn from(attorney: &Attorney) -> Self {
        Self {
            attorney: AttorneyResponse::from(attorney),
            practice: attorney.practice.clone(),
        }
    }
}

impl From<&AttorneySummary> for AppointmentAttorneyResponse {
    fn from(attorney: &AttorneySummary) -> Self {
        Self {
            id: attorney.id.to_string(),
            name: attorney.name.clone(),
            email: attorney.email.clone(),
            specialization: attorney.specialization.clone(),
            fees: attorney.fees,
        }
    }
}

// ============================================================================
// Admin Mappers
// ============================================================================

impl From<&AdminAccount> for AdminAccountResponse {
    fn from(account: &AdminAccount) -> Self {
        Self {
            id: account.admin.id.to_string(),
            user_id: account.admin.user_id.to_string(),
            name: account.name.clone(),
            email: account.email.clone(),
            role: Role::Admin,
            permissions: account.admin.permissions,
            last_login_at: account.admin.last_login_at,
            login_count: account.admin.login_count,
            created_at: account.admin.created_at,
        }
    }
}

impl From<&AdminLogin> for LoginEntryResponse {
    fn from(login: &AdminLogin) -> Self {
        Self {
            time: login.login_time,
            ip_address: login.ip_address.clone().unwrap_or_else(|| "Unknown".to_string()),
            user_agent: login.user_agent.clone().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

impl From<&AppointmentStats> for DashboardStatsResponse {
    fn from(stats: &AppointmentStats) -> Self {
        Self {
            total_appointments: stats.total,
            pending_appointments: stats.pending,
            confirmed_appointments: stats.confirmed,
            completed_appointments: stats.completed,
            cancelled_appointments: stats.cancelled,
            expired_appointments: stats.expired,
            ..Self::default()
        }
    }
}

// ============================================================================
// Appointment Mappers
// ============================================================================

impl From<&AppointmentDetails> for AppointmentResponse {
    fn from(details: &AppointmentDetails) -> Self {
        let appointment = &details.appointment;
        Self {
            id: appointment.id.to_string(),
            date: appointment.date,
            time: appointment.time.clone(),
            status: appointment.status,
            symptoms: appointment.symptoms.clone(),
            notes: appointment.notes.clone(),
            patient: details.client.as_ref().map(PartyResponse::from),
            doctor: details.attorney.as_ref().map(AppointmentAttorneyResponse::from),
            created_at: appointment.created_at,
        }
    }
}

impl From<&AppointmentDetails> for RecentAppointmentResponse {
    fn from(details: &AppointmentDetails) -> Self {
        let appointment = &details.appointment;
        Self {
            id: appointment.id.to_string(),
            date: appointment.date,
            time: appointment.time.clone(),
            status: appointment.status,
            patient: details.client.as_ref().map(|client| client.name.clone()),
            doctor: details.attorney.as_ref().map(|attorney| attorney.name.clone()),
            specialization: details.attorney.as_ref().and_then(|attorney| attorney.specialization.clone()),
        }
    }
}

impl From<&Appointment> for AppointmentRecordResponse {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id.to_string(),
            user_id: appointment.user_id.to_string(),
            attorney_id: appointment.attorney_id.map(|id| id.to_string()),
            date: appointment.date,
            time: appointment.time.clone(),
            status: appointment.status,
            symptoms: appointment.symptoms.clone(),
            notes: appointment.notes.clone(),
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

// ============================================================================
// Feedback Mappers
// ============================================================================

impl From<&FeedbackDetails> for FeedbackResponse {
    fn from(details: &FeedbackDetails) -> Self {
        let feedback = &details.feedback;
        Self {
            id: feedback.id.to_string(),
            subject: feedback.subject.clone(),
            message: feedback.message.clone(),
            rating: feedback.rating,
            status: feedback.status,
            admin_response: feedback.admin_response.clone(),
            responded_at: feedback.responded_at,
            user: details.user.as_ref().map(PartyResponse::from),
            responded_by: feedback.responded_by.map(|id| ResponderResponse {
                id: id.to_string(),
                name: details.responder_name.clone(),
            }),
            created_at: feedback.created_at,
            updated_at: feedback.updated_at,
        }
    }
}

// ============================================================================
// Lab Test Mappers
// ============================================================================

impl From<&LabTest> for LabTestResponse {
    fn from(test: &LabTest) -> Self {
        Self {
            id: test.id.to_string(),
            test_name: test.test_name.clone(),
            description: test.description.clone(),
            price: test.price,
        }
    }
}

impl From<&LabTestBookingDetails> for LabTestBookingResponse {
    fn from(details: &LabTestBookingDetails) -> Self {
        let booking = &details.booking;
        Self {
            id: booking.id.to_string(),
            date: booking.date,
            time: booking.time.clone(),
            status: booking.status,
            notes: booking.notes.clone(),
            patient: details.user.as_ref().map(PartyResponse::from),
            test: BookedTestResponse {
                id: booking.test_id.to_string(),
                test_name: details.test_name.clone(),
                price: details.price,
            },
            created_at: booking.created_at,
        }
    }
}

impl From<&LabTestBooking> for BookingRecordResponse {
    fn from(booking: &LabTestBooking) -> Self {
        Self {
            id: booking.id.to_string(),
            user_id: booking.user_id.to_string(),
            test_id: booking.test_id.to_string(),
            date: booking.date,
            time: booking.time.clone(),
            status: booking.status,
            notes: booking.notes.clone(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

// ============================================================================
// Consultation Mappers
// ============================================================================

impl From<&ConsultationDetails> for ConsultationResponse {
    fn from(details: &ConsultationDetails) -> Self {
        let consultation = &details.consultation;
        Self {
            id: consultation.id.to_string(),
            client: details.client.as_ref().map(PartyResponse::from),
            attorney: details.attorney.as_ref().map(PartyResponse::from),
            status: consultation.status,
            subject: consultation.subject.clone(),
            message_count: details.message_count,
            created_at: consultation.created_at,
            updated_at: consultation.updated_at,
        }
    }
}

impl From<&Consultation> for ConsultationRecordResponse {
    fn from(consultation: &Consultation) -> Self {
        Self {
            id: consultation.id.to_string(),
            client_id: consultation.client_id.to_string(),
            attorney_id: consultation.attorney_id.map(|id| id.to_string()),
            subject: consultation.subject.clone(),
            status: consultation.status,
            created_at: consultation.created_at,
            updated_at: consultation.updated_at,
        }
    }
}

impl From<&MessageWithSender> for ThreadMessageResponse {
    fn from(entry: &MessageWithSender) -> Self {
        Self {
            id: entry.message.id.to_string(),
            message: entry.message.message.clone(),
            sender_role: entry.message.sender_role,
            sender_name: entry.sender_name.clone(),
            created_at: entry.message.created_at,
            read: entry.message.read,
        }
    }
}

impl From<&ConsultationMessage> for PostedMessageResponse {
    fn from(message: &ConsultationMessage) -> Self {
        Self {
            id: message.id.to_string(),
            message: message.message.clone(),
            sender_role: message.sender_role,
            created_at: message.created_at,
        }
    }
}

// ============================================================================
// Catalogue Mappers
// ============================================================================

impl From<&LegalService> for LegalServiceResponse {
    fn from(service: &LegalService) -> Self {
        Self {
            id: service.id.to_string(),
            service_name: service.service_name.clone(),
            description: service.description.clone(),
            price: service.price,
            category: service.category,
            icon: service.icon.clone(),
            icon_file: service.icon_file.clone(),
            is_active: service.is_active,
            created_at: service.created_at,
            updated_at: service.updated_at,
        }
    }
}
