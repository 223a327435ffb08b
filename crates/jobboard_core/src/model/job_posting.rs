//! Job posting aggregate.
//!
//! # Invariants
//! - `company_id` is fixed at creation; updates never move a posting.
//! - A posting exclusively owns its custom fields.

use crate::model::company::Company;
use crate::model::custom_field::{CustomField, CustomFieldInput, RecordId};
use crate::model::validation::{validate_custom_fields, ValidationError};
use serde::{Deserialize, Serialize};

/// Job posting read model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: RecordId,
    pub company_id: RecordId,
    pub title: String,
    pub description: Option<String>,
    pub custom_fields: Vec<CustomField>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create payload for a job posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPostingInput {
    pub company_id: RecordId,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldInput>,
}

impl JobPostingInput {
    pub fn new(company_id: RecordId, title: impl Into<String>) -> Self {
        Self {
            company_id,
            title: title.into(),
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

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title_and_fields(&self.title, &self.custom_fields)
    }
}

/// Update payload for a job posting: full replacement of editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPostingUpdate {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldInput>,
}

impl JobPostingUpdate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
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

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title_and_fields(&self.title, &self.custom_fields)
    }
}

/// One company together with every posting it owns (unpaginated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub company: Company,
    pub job_postings: Vec<JobPosting>,
}

fn validate_title_and_fields(
    title: &str,
    fields: &[CustomFieldInput],
) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    validate_custom_fields(fields)
}
