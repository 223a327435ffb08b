//! Input validation shared by company and job posting write paths.
//!
//! Repositories never call these checks; the store enforces the same rules
//! through `CHECK` constraints. Services validate up front to report a
//! precise reason instead of a constraint failure.

use crate::model::custom_field::CustomFieldInput;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reason an input was rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Company name is blank after trim.
    EmptyName,
    /// Job posting title is blank after trim.
    EmptyTitle,
    /// Custom field at `index` has a blank field name.
    EmptyFieldName { index: usize },
    /// Custom field at `index` has empty content.
    EmptyContent { index: usize },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "company name must not be blank"),
            Self::EmptyTitle => write!(f, "job posting title must not be blank"),
            Self::EmptyFieldName { index } => {
                write!(f, "custom field #{index} must have a non-blank field_name")
            }
            Self::EmptyContent { index } => {
                write!(f, "custom field #{index} must have content")
            }
        }
    }
}

impl Error for ValidationError {}

/// Checks fields in order and reports the first offending position.
pub(crate) fn validate_custom_fields(fields: &[CustomFieldInput]) -> Result<(), ValidationError> {
    for (index, field) in fields.iter().enumerate() {
        if field.field_name.trim().is_empty() {
            return Err(ValidationError::EmptyFieldName { index });
        }
        if field.content.is_empty() {
            return Err(ValidationError::EmptyContent { index });
        }
    }
    Ok(())
}
