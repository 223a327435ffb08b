//! Job posting use-case service.
//!
//! The owning company is not looked up before create; a dangling
//! `company_id` surfaces as `ServiceError::Persistence` from the store's
//! foreign key.

use crate::model::custom_field::RecordId;
use crate::model::job_posting::{CompanyOverview, JobPosting, JobPostingInput, JobPostingUpdate};
use crate::repo::job_repo::JobPostingRepository;
use crate::repo::pagination::{Page, PageRequest};
use crate::service::error::ServiceResult;

/// Use-case service wrapper for job posting aggregates.
pub struct JobPostingService<R: JobPostingRepository> {
    repo: R,
}

impl<R: JobPostingRepository> JobPostingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_job_posting(&self, input: &JobPostingInput) -> ServiceResult<JobPosting> {
        input.validate()?;
        Ok(self.repo.create_job_posting(input)?)
    }

    pub fn get_job_posting(&self, id: RecordId) -> ServiceResult<JobPosting> {
        Ok(self.repo.find_job_posting_by_id(id)?)
    }

    pub fn list_job_postings(&self, page: i64, limit: i64) -> ServiceResult<Page<JobPosting>> {
        Ok(self.repo.list_job_postings(PageRequest::new(page, limit))?)
    }

    /// Lists postings of one company; an unknown company yields an empty page.
    pub fn list_company_job_postings(
        &self,
        company_id: RecordId,
        page: i64,
        limit: i64,
    ) -> ServiceResult<Page<JobPosting>> {
        Ok(self
            .repo
            .list_job_postings_by_company(company_id, PageRequest::new(page, limit))?)
    }

    pub fn get_company_with_postings(&self, company_id: RecordId) -> ServiceResult<CompanyOverview> {
        Ok(self.repo.find_company_with_postings(company_id)?)
    }

    pub fn update_job_posting(
        &self,
        id: RecordId,
        update: &JobPostingUpdate,
    ) -> ServiceResult<JobPosting> {
        update.validate()?;
        Ok(self.repo.update_job_posting(id, update)?)
    }

    pub fn delete_job_posting(&self, id: RecordId) -> ServiceResult<()> {
        Ok(self.repo.delete_job_posting(id)?)
    }
}
