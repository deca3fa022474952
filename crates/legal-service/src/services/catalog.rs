//! Legal service catalogue
//!
//! The public listing and the admin screens that add, edit and retire
//! catalogue entries along with their uploaded icons.

use chrono::Utc;
use legal_core::{DomainError, LegalService, ServiceCategory, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    IconUpload, LegalServiceEnvelope, LegalServiceListResponse, LegalServiceResponse, MessageResponse,
    ServiceForm,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::storage::IconStorage;

/// Blank means the default category; anything else must be a known label
fn parse_category(raw: Option<&str>) -> ServiceResult<ServiceCategory> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(ServiceCategory::default()),
        Some(label) => label.parse().map_err(|_| {
            ServiceError::bad_request(
                "INVALID_CATEGORY",
                format!("Invalid category. Valid categories are: {}", ServiceCategory::valid_values()),
            )
        }),
    }
}

fn required_name(form: &ServiceForm) -> ServiceResult<String> {
    let name = form.service_name.trim();
    if name.is_empty() {
        return Err(ServiceError::validation("Service name is required"));
    }
    Ok(name.to_string())
}

/// Catalogue service
pub struct CatalogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CatalogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Active services, newest first
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> ServiceResult<LegalServiceListResponse> {
        let services = self
            .ctx
            .legal_service_repo()
            .list_active()
            .await?
            .iter()
            .map(LegalServiceResponse::from)
            .collect();

        Ok(LegalServiceListResponse { services })
    }

    /// Add a service; an image icon is mandatory
    #[instrument(skip(self, form, icon), fields(service_name = %form.service_name))]
    pub async fn create(&self, form: ServiceForm, icon: Option<IconUpload>) -> ServiceResult<LegalServiceEnvelope> {
        let name = required_name(&form)?;
        let Some(icon) = icon else {
            return Err(ServiceError::validation("Service icon file is required"));
        };
        let category = parse_category(form.category.as_deref())?;

        let storage = IconStorage::new(self.ctx.storage());
        storage.validate(&icon)?;

        if self.ctx.legal_service_repo().name_taken(&name, None).await? {
            return Err(DomainError::ServiceNameTaken.into());
        }

        let mut service = LegalService::new(self.ctx.generate_id(), name);
        service.description = form.description.map(|d| d.trim().to_string());
        service.category = category;
        service.price = form.price;
        service.set_icon_file(storage.save(&icon).await?);

        self.ctx.legal_service_repo().create(&service).await?;

        info!(service_id = %service.id, category = %service.category, "Legal service created");

        Ok(LegalServiceEnvelope {
            message: "Service created successfully".to_string(),
            service: LegalServiceResponse::from(&service),
        })
    }

    /// Replace the editable fields; the icon only changes when a new one is sent
    #[instrument(skip(self, form, icon))]
    pub async fn update(
        &self,
        id: Snowflake,
        form: ServiceForm,
        icon: Option<IconUpload>,
    ) -> ServiceResult<LegalServiceEnvelope> {
        let name = required_name(&form)?;
        let category = parse_category(form.category.as_deref())?;

        let mut service = self
            .ctx
            .legal_service_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ServiceNotFound(id))?;

        if name != service.service_name && self.ctx.legal_service_repo().name_taken(&name, Some(id)).await? {
            return Err(DomainError::ServiceNameTaken.into());
        }

        service.service_name = name;
        service.description = form.description.map(|d| d.trim().to_string());
        service.category = category;
        if form.price.is_some() {
            service.price = form.price;
        }
        service.updated_at = Utc::now();

        if let Some(icon) = icon {
            let path = IconStorage::new(self.ctx.storage()).save(&icon).await?;
            service.set_icon_file(path);
        }

        self.ctx.legal_service_repo().update(&service).await?;

        info!(service_id = %id, "Legal service updated");

        Ok(LegalServiceEnvelope {
            message: "Service updated successfully".to_string(),
            service: LegalServiceResponse::from(&service),
        })
    }

    /// Retire the service; the row stays for history
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake) -> ServiceResult<MessageResponse> {
        let mut service = self
            .ctx
            .legal_service_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ServiceNotFound(id))?;

        service.deactivate();
        self.ctx.legal_service_repo().update(&service).await?;

        info!(service_id = %id, "Legal service deactivated");

        Ok(MessageResponse::new("Service deleted successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_category_defaults() {
        assert_eq!(parse_category(None).unwrap(), ServiceCategory::LegalService);
        assert_eq!(parse_category(Some("  ")).unwrap(), ServiceCategory::LegalService);
    }

    #[test]
    fn test_known_category_is_parsed() {
        assert_eq!(parse_category(Some("Document Review")).unwrap(), ServiceCategory::DocumentReview);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = parse_category(Some("Notary")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CATEGORY");
        assert!(err.to_string().contains("Court Representation"));
    }

    #[test]
    fn test_service_name_is_required_and_trimmed() {
        let form = ServiceForm {
            service_name: "  Will drafting ".into(),
            ..ServiceForm::default()
        };
        assert_eq!(required_name(&form).unwrap(), "Will drafting");

        let err = required_name(&ServiceForm::default()).unwrap_err();
        assert_eq!(err.to_string(), "Service name is required");
    }
}
