//! Company use-case service.
//!
//! # Invariants
//! - Create/update inputs are validated before any repository call.
//! - Raw page/limit values are normalized through `PageRequest`.

use crate::model::company::{Company, CompanyInput};
use crate::model::custom_field::RecordId;
use crate::repo::cascade::CascadeReport;
use crate::repo::company_repo::CompanyRepository;
use crate::repo::pagination::{Page, PageRequest};
use crate::service::error::ServiceResult;

/// Use-case service wrapper for company aggregates.
pub struct CompanyService<R: CompanyRepository> {
    repo: R,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new company.
    pub fn create_company(&self, input: &CompanyInput) -> ServiceResult<Company> {
        input.validate()?;
        Ok(self.repo.create_company(input)?)
    }

    pub fn get_company(&self, id: RecordId) -> ServiceResult<Company> {
        Ok(self.repo.find_company_by_id(id)?)
    }

    /// Lists companies; out-of-range `page`/`limit` fall back to defaults.
    pub fn list_companies(&self, page: i64, limit: i64) -> ServiceResult<Page<Company>> {
        Ok(self.repo.list_companies(PageRequest::new(page, limit))?)
    }

    /// Validates and applies a full replacement update.
    pub fn update_company(&self, id: RecordId, input: &CompanyInput) -> ServiceResult<Company> {
        input.validate()?;
        Ok(self.repo.update_company(id, input)?)
    }

    pub fn delete_company(&self, id: RecordId) -> ServiceResult<CascadeReport> {
        Ok(self.repo.delete_company(id)?)
    }
}
