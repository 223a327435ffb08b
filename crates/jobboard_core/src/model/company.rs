//! Company aggregate.
//!
//! # Invariants
//! - A company exclusively owns its custom fields.
//! - `job_count` reflects the job posting rows present at read time.

use crate::model::custom_field::{CustomField, CustomFieldInput, RecordId};
use crate::model::validation::{validate_custom_fields, ValidationError};
use serde::{Deserialize, Serialize};

/// Company read model, fully populated by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: RecordId,
    pub name: String,
    /// Serialized as `business_description` to match the external schema.
    #[serde(rename = "business_description")]
    pub description: Option<String>,
    pub custom_fields: Vec<CustomField>,
    /// Number of job postings owned by this company.
    pub job_count: u64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create/update payload for a company.
///
/// Update uses full replacement: `custom_fields` becomes the complete new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInput {
    pub name: String,
    #[serde(rename = "business_description")]
    pub description: Option<String>,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldInput>,
}

impl CompanyInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            custom_fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field_name: impl Into<String>, content: impl Into<String>) -> Self {
        self.custom_fields
            .push(CustomFieldInput::new(field_name, content));
        self
    }

    /// Checks non-emptiness of the name and every custom field name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        validate_custom_fields(&self.custom_fields)
    }
}
