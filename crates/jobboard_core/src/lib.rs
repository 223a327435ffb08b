//! Core persistence for companies, job postings and their custom fields.
//! This crate is the single source of truth for aggregate write semantics.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::company::{Company, CompanyInput};
pub use model::custom_field::{CustomField, CustomFieldInput, RecordId};
pub use model::job_posting::{CompanyOverview, JobPosting, JobPostingInput, JobPostingUpdate};
pub use model::validation::ValidationError;
pub use repo::attribute_store::{
    AttributeStore, CompanyAttributes, CompanyOwner, JobAttributes, JobPostingOwner,
    OwnedAttributeSet, OwnerKind,
};
pub use repo::cascade::{delete_company_cascade, CascadeReport};
pub use repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
pub use repo::error::{EntityKind, RepoError, RepoResult};
pub use repo::job_repo::{JobPostingRepository, SqliteJobPostingRepository};
pub use repo::pagination::{offset, Page, PageRequest, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use service::company_service::CompanyService;
pub use service::error::{ServiceError, ServiceResult};
pub use service::job_posting_service::JobPostingService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
