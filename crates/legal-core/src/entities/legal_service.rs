//! Catalogue entry for a service offered on the marketplace

use chrono::{DateTime, Utc};

use crate::value_objects::{ServiceCategory, Snowflake};

#[derive(Debug, Clone, PartialEq)]
pub struct LegalService {
    pub id: Snowflake,
    pub service_name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: ServiceCategory,
    /// Icon key understood by the front end, `Custom` when `icon_file` is set
    pub icon: String,
    pub icon_file: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LegalService {
    pub const DEFAULT_ICON: &'static str = "Gavel";
    pub const CUSTOM_ICON: &'static str = "Custom";
    pub const MAX_NAME_LEN: usize = 100;
    pub const MAX_DESCRIPTION_LEN: usize = 500;

    pub fn new(id: Snowflake, service_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            service_name,
            description: None,
            price: None,
            category: ServiceCategory::default(),
            icon: Self::DEFAULT_ICON.to_string(),
            icon_file: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Point the service at an uploaded icon
    pub fn set_icon_file(&mut self, path: String) {
        self.icon = Self::CUSTOM_ICON.to_string();
        self.icon_file = Some(path);
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploaded_icon_switches_to_custom() {
        let mut service = LegalService::new(Snowflake::new(1), "Will drafting".into());
        assert_eq!(service.icon, "Gavel");

        service.set_icon_file("/uploads/service-icons/a.png".into());
        assert_eq!(service.icon, "Custom");
        assert!(service.icon_file.is_some());
    }
}
