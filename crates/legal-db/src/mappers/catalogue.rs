//! Service catalogue and lab test mappers

use legal_core::entities::{LabTest, LegalService};
use legal_core::value_objects::Snowflake;

use super::parse_label;
use crate::models::{LabTestModel, LegalServiceModel};

impl From<LegalServiceModel> for LegalService {
    fn from(model: LegalServiceModel) -> Self {
        LegalService {
            id: Snowflake::new(model.id),
            service_name: model.service_name,
            description: model.description,
            price: model.price,
            category: parse_label(&model.category, "services.category"),
            icon: model.icon,
            icon_file: model.icon_file,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<LabTestModel> for LabTest {
    fn from(model: LabTestModel) -> Self {
        LabTest {
            id: Snowflake::new(model.id),
            test_name: model.test_name,
            description: model.description,
            price: model.price,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
