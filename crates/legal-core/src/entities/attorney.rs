//! Attorney entity - credentials plus the professional profile

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Gender, Snowflake};

/// Office hours shown on the attorney profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTime {
    pub start: String,
    pub end: String,
}

impl Default for AvailableTime {
    fn default() -> Self {
        Self {
            start: "09:00".to_string(),
            end: "17:00".to_string(),
        }
    }
}

/// Free-form practice details, persisted as a single JSONB document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PracticeDetails {
    pub attorney_name: Option<String>,
    pub years_in_practice: Option<i32>,
    pub education: Option<String>,
    pub university: Option<String>,
    pub bar_number: Option<String>,
    pub license_number: Option<String>,
    pub bio: Option<String>,
    pub office_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub languages: Vec<String>,
    pub practice_areas: Vec<String>,
    pub available_days: Vec<String>,
    pub available_time: AvailableTime,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attorney {
    pub id: Snowflake,
    /// Set when an admin created the attorney from an existing user
    pub user_id: Option<Snowflake>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<i32>,
    pub fees: Option<f64>,
    pub profile_picture: Option<String>,
    pub practice: PracticeDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attorney {
    pub fn new(id: Snowflake, name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: None,
            name,
            email,
            phone: None,
            gender: None,
            address: None,
            date_of_birth: None,
            specialization: None,
            qualification: None,
            experience: None,
            fees: None,
            profile_picture: None,
            practice: PracticeDetails::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown to clients: the practice override, else the account name
    pub fn display_name(&self) -> &str {
        self.practice
            .attorney_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.name)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
