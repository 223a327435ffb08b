//! Owned key/value attribute records.
//!
//! Both companies and job postings carry an open-ended list of custom fields.
//! The record shape is shared; only the owning table differs.

use serde::{Deserialize, Serialize};

/// Store-assigned surrogate id of any persisted record.
pub type RecordId = i64;

/// One persisted custom field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: RecordId,
    /// Id of the owning company or job posting.
    pub owner_id: RecordId,
    pub field_name: String,
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Caller-supplied custom field, before it has an owner or an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldInput {
    pub field_name: String,
    pub content: String,
}

impl CustomFieldInput {
    pub fn new(field_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            content: content.into(),
        }
    }
}
