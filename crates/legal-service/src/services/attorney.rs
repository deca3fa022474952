//! Attorney service
//!
//! Admin management of attorney profiles.

use legal_core::{Attorney, DomainError, PracticeDetails, Snowflake};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::dto::{
    AttorneyDetailResponse, AttorneyEnvelope, AttorneyListResponse, AttorneyResponse,
    CreateAttorneyRequest, MessageResponse, UpdateAttorneyRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Practice fields that form clients send as JSON text, e.g. `"[\"English\"]"`
const ENCODED_FIELDS: &[&str] = &["languages", "practiceAreas", "availableDays", "achievements", "availableTime"];

/// Decode a string-encoded array or object in place; other strings are left alone
fn decode_encoded_fields(fields: &mut Map<String, Value>) {
    for key in ENCODED_FIELDS {
        let Some(Value::String(raw)) = fields.get(*key) else {
            continue;
        };
        if let Ok(decoded @ (Value::Array(_) | Value::Object(_))) = serde_json::from_str::<Value>(raw) {
            fields.insert((*key).to_string(), decoded);
        }
    }
}

/// Overlay the supplied practice fields onto `current`.
///
/// Keys the client did not send keep their value; unknown keys are ignored.
fn merge_practice(current: &PracticeDetails, mut fields: Map<String, Value>) -> ServiceResult<PracticeDetails> {
    if fields.is_empty() {
        return Ok(current.clone());
    }
    decode_encoded_fields(&mut fields);

    let mut merged = match serde_json::to_value(current) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => return Err(ServiceError::internal(e.to_string())),
    };
    merged.extend(fields);

    serde_json::from_value(Value::Object(merged))
        .map_err(|e| ServiceError::validation(format!("Invalid practice details: {e}")))
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Attorney service
pub struct AttorneyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttorneyService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<AttorneyListResponse> {
        let attorneys: Vec<AttorneyResponse> = self
            .ctx
            .attorney_repo()
            .list()
            .await?
            .iter()
            .map(AttorneyResponse::from)
            .collect();

        Ok(AttorneyListResponse {
            total: attorneys.len(),
            attorneys,
        })
    }

    /// Create an attorney profile for an existing user
    #[instrument(skip(self, request), fields(user_id = ?request.user_id))]
    pub async fn create(&self, request: CreateAttorneyRequest) -> ServiceResult<AttorneyEnvelope> {
        if !request.has_required_fields() {
            return Err(ServiceError::validation(
                "Required fields: userId, specialization, qualification, experience, fees",
            ));
        }
        let Some(user_id) = request.user_id else {
            return Err(ServiceError::validation("userId is required"));
        };

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if self.ctx.attorney_repo().email_exists(&user.email).await? {
            return Err(DomainError::AttorneyEmailTaken.into());
        }

        let practice = merge_practice(&PracticeDetails::default(), request.practice)?;

        let mut attorney = Attorney::new(self.ctx.generate_id(), user.name, user.email);
        attorney.user_id = Some(user.id);
        attorney.phone = trimmed(request.phone).or(user.phone);
        attorney.address = user.address;
        attorney.gender = user.gender;
        attorney.date_of_birth = user.date_of_birth;
        attorney.specialization = trimmed(request.specialization);
        attorney.qualification = trimmed(request.qualification);
        attorney.experience = request.experience;
        attorney.fees = request.fees;
        attorney.profile_picture = user.profile_picture;
        attorney.practice = practice;

        self.ctx.attorney_repo().create(&attorney, None).await?;

        info!(attorney_id = %attorney.id, user_id = %user.id, "Attorney created");

        Ok(AttorneyEnvelope {
            message: "Attorney created successfully".to_string(),
            attorney: AttorneyDetailResponse::from(&attorney),
        })
    }

    /// Partial update; practice fields are merged into the stored document
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: Snowflake, request: UpdateAttorneyRequest) -> ServiceResult<AttorneyEnvelope> {
        let mut attorney = self
            .ctx
            .attorney_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AttorneyNotFound(id))?;

        if let Some(name) = trimmed(request.name) {
            attorney.name = name;
        }
        if let Some(phone) = request.phone {
            attorney.phone = Some(phone);
        }
        if let Some(specialization) = request.specialization {
            attorney.specialization = Some(specialization);
        }
        if let Some(qualification) = request.qualification {
            attorney.qualification = Some(qualification);
        }
        if let Some(experience) = request.experience {
            attorney.experience = Some(experience);
        }
        if let Some(fees) = request.fees {
            attorney.fees = Some(fees);
        }
        attorney.practice = merge_practice(&attorney.practice, request.practice)?;
        attorney.touch();

        self.ctx.attorney_repo().update(&attorney).await?;

        info!(attorney_id = %attorney.id, "Attorney updated");

        Ok(AttorneyEnvelope {
            message: "Attorney updated successfully".to_string(),
            attorney: AttorneyDetailResponse::from(&attorney),
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake) -> ServiceResult<MessageResponse> {
        if self.ctx.attorney_repo().find_by_id(id).await?.is_none() {
            return Err(DomainError::AttorneyNotFound(id).into());
        }

        self.ctx.attorney_repo().delete(id).await?;

        info!(attorney_id = %id, "Attorney deleted");

        Ok(MessageResponse::new("Attorney deleted successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_merge_keeps_unsent_fields() {
        let mut current = PracticeDetails::default();
        current.bar_number = Some("B-1".into());
        current.languages = vec!["English".into()];

        let merged = merge_practice(&current, fields(json!({ "city": "Pune", "languages": ["Hindi", "Marathi"] }))).unwrap();
        assert_eq!(merged.bar_number.as_deref(), Some("B-1"));
        assert_eq!(merged.city.as_deref(), Some("Pune"));
        assert_eq!(merged.languages, vec!["Hindi", "Marathi"]);
    }

    #[test]
    fn test_merge_parses_available_time_object() {
        let merged = merge_practice(
            &PracticeDetails::default(),
            fields(json!({ "availableTime": { "start": "10:00", "end": "18:00" } })),
        )
        .unwrap();
        assert_eq!(merged.available_time.start, "10:00");
        assert_eq!(merged.available_time.end, "18:00");
    }

    #[test]
    fn test_merge_accepts_json_encoded_lists() {
        let merged = merge_practice(
            &PracticeDetails::default(),
            fields(json!({
                "languages": "[\"English\",\"Hindi\"]",
                "practiceAreas": "[\"Tenancy\"]",
                "availableDays": "[]",
                "availableTime": "{\"start\":\"09:30\",\"end\":\"16:00\"}",
            })),
        )
        .unwrap();
        assert_eq!(merged.languages, vec!["English", "Hindi"]);
        assert_eq!(merged.practice_areas, vec!["Tenancy"]);
        assert!(merged.available_days.is_empty());
        assert_eq!(merged.available_time.start, "09:30");
    }

    #[test]
    fn test_merge_rejects_wrong_shapes() {
        let err = merge_practice(&PracticeDetails::default(), fields(json!({ "languages": "English" }))).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().starts_with("Invalid practice details"));
    }

    #[test]
    fn test_merge_ignores_unknown_keys() {
        let merged = merge_practice(&PracticeDetails::default(), fields(json!({ "favouriteColour": "blue" }))).unwrap();
        assert_eq!(merged, PracticeDetails::default());
    }
}
