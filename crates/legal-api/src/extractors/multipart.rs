//! Multipart extractor for the service catalogue form

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use legal_service::dto::{IconUpload, ServiceForm};
use validator::Validate;

use crate::response::ApiError;

/// Form part carrying the icon file
pub const ICON_FIELD: &str = "iconFile";

/// Parsed `service_name`/`description`/`category`/`price` fields plus the optional icon
#[derive(Debug, Clone)]
pub struct ServiceMultipart {
    pub form: ServiceForm,
    pub icon: Option<IconUpload>,
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[async_trait]
impl<S> FromRequest<S> for ServiceMultipart
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        let mut form = ServiceForm::default();
        let mut icon = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::invalid_body(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == ICON_FIELD {
                let file_name = field.file_name().map(ToString::to_string);
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await.map_err(|e| ApiError::invalid_body(e.to_string()))?;
                if !bytes.is_empty() {
                    icon = Some(IconUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                continue;
            }

            let value = field.text().await.map_err(|e| ApiError::invalid_body(e.to_string()))?;
            match name.as_str() {
                "service_name" => form.service_name = value,
                "description" => form.description = non_empty(value),
                "category" => form.category = non_empty(value),
                "price" => {
                    form.price = match non_empty(value) {
                        Some(raw) => Some(
                            raw.parse()
                                .map_err(|_| ApiError::invalid_body(format!("Invalid price '{raw}'")))?,
                        ),
                        None => None,
                    };
                }
                _ => {}
            }
        }

        form.validate()?;

        Ok(ServiceMultipart { form, icon })
    }
}
