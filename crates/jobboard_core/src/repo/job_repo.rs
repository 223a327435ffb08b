//! Job posting repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist job postings together with their custom field sets.
//! - Serve company-scoped listings and the company overview read path.
//!
//! # Invariants
//! - Create, update and delete each run in one `IMMEDIATE` transaction.
//! - Update fully replaces the custom field set; `company_id` never changes.
//! - Delete removes the posting's own fields, then the posting.
//! - `company_id` existence is not checked here; the schema foreign key
//!   rejects dangling references as a persistence failure.

use crate::model::custom_field::RecordId;
use crate::model::job_posting::{CompanyOverview, JobPosting, JobPostingInput, JobPostingUpdate};
use crate::repo::attribute_store::{CompanyAttributes, JobAttributes, OwnedAttributeSet};
use crate::repo::common::{
    begin_immediate, ensure_connection_ready, log_write_outcome, record_exists,
};
use crate::repo::company_repo::load_company;
use crate::repo::error::{EntityKind, RepoError, RepoResult};
use crate::repo::pagination::{count_rows, CountScope, Page, PageRequest};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::time::Instant;

const JOB_POSTING_SELECT_SQL: &str = "SELECT
    id,
    company_id,
    title,
    description,
    created_at,
    updated_at
FROM job_postings";

/// Repository interface for job posting aggregates.
pub trait JobPostingRepository {
    /// Inserts a posting and its custom fields.
    fn create_job_posting(&self, input: &JobPostingInput) -> RepoResult<JobPosting>;
    /// Loads one posting with its custom fields.
    fn find_job_posting_by_id(&self, id: RecordId) -> RepoResult<JobPosting>;
    /// Lists every posting ordered by id.
    fn list_job_postings(&self, request: PageRequest) -> RepoResult<Page<JobPosting>>;
    /// Lists postings of one company ordered by id.
    fn list_job_postings_by_company(
        &self,
        company_id: RecordId,
        request: PageRequest,
    ) -> RepoResult<Page<JobPosting>>;
    /// Loads a company with all of its postings, unpaginated.
    fn find_company_with_postings(&self, company_id: RecordId) -> RepoResult<CompanyOverview>;
    /// Replaces title, description and the full custom field set.
    fn update_job_posting(&self, id: RecordId, update: &JobPostingUpdate)
        -> RepoResult<JobPosting>;
    /// Deletes a posting and its custom fields.
    fn delete_job_posting(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed job posting repository.
pub struct SqliteJobPostingRepository<'conn> {
    conn: &'conn Connection,
    fields: JobAttributes,
    company_fields: CompanyAttributes,
}

impl<'conn> SqliteJobPostingRepository<'conn> {
    /// Creates a repository over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            fields: JobAttributes::new(),
            company_fields: CompanyAttributes::new(),
        })
    }

    fn load_page(
        &self,
        company_id: Option<RecordId>,
        request: PageRequest,
    ) -> RepoResult<Page<JobPosting>> {
        let scope = company_id.map(|value| CountScope {
            column: "company_id",
            value,
        });
        let total = count_rows(self.conn, "job_postings", scope)?;

        let mut sql = format!("{JOB_POSTING_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(company_id) = company_id {
            sql.push_str(" AND company_id = ?");
            bind_values.push(Value::Integer(company_id));
        }
        sql.push_str(" ORDER BY id ASC LIMIT ? OFFSET ?");
        let (limit, offset) = request.sql_bounds();
        bind_values.push(Value::Integer(limit));
        bind_values.push(Value::Integer(offset));

        let postings = self.query_postings(&sql, bind_values)?;
        Ok(Page::new(postings, total, request))
    }

    fn query_postings(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<JobPosting>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut postings = Vec::new();
        while let Some(row) = rows.next()? {
            postings.push(parse_job_posting_row(row)?);
        }

        for posting in &mut postings {
            posting.custom_fields = self.fields.find_by_owner(self.conn, posting.id)?;
        }
        Ok(postings)
    }

    fn create_job_posting_tx(&self, input: &JobPostingInput) -> RepoResult<JobPosting> {
        let tx = begin_immediate(self.conn)?;
        tx.execute(
            "INSERT INTO job_postings (company_id, title, description) VALUES (?1, ?2, ?3);",
            params![
                input.company_id,
                input.title.as_str(),
                input.description.as_deref()
            ],
        )?;
        let posting_id = tx.last_insert_rowid();
        self.fields
            .insert_all(&tx, posting_id, &input.custom_fields)?;
        let posting = load_job_posting(&tx, &self.fields, posting_id)?;
        tx.commit()?;
        Ok(posting)
    }

    fn update_job_posting_tx(
        &self,
        id: RecordId,
        update: &JobPostingUpdate,
    ) -> RepoResult<JobPosting> {
        let tx = begin_immediate(self.conn)?;
        let changed = tx.execute(
            "UPDATE job_postings
             SET
                title = ?2,
                description = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id, update.title.as_str(), update.description.as_deref()],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::JobPosting, id));
        }

        self.fields.put(&tx, id, &update.custom_fields)?;
        let posting = load_job_posting(&tx, &self.fields, id)?;
        tx.commit()?;
        Ok(posting)
    }

    fn delete_job_posting_tx(&self, id: RecordId) -> RepoResult<()> {
        let tx = begin_immediate(self.conn)?;
        if !record_exists(&tx, "job_postings", id)? {
            return Err(RepoError::not_found(EntityKind::JobPosting, id));
        }
        self.fields.delete_by_owner(&tx, id)?;
        tx.execute("DELETE FROM job_postings WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(())
    }
}

impl JobPostingRepository for SqliteJobPostingRepository<'_> {
    fn create_job_posting(&self, input: &JobPostingInput) -> RepoResult<JobPosting> {
        let started_at = Instant::now();
        let result = self.create_job_posting_tx(input);
        log_write_outcome(
            "job_posting_create",
            result.as_ref().ok().map(|posting| posting.id),
            started_at,
            &result,
        );
        result
    }

    fn find_job_posting_by_id(&self, id: RecordId) -> RepoResult<JobPosting> {
        load_job_posting(self.conn, &self.fields, id)
    }

    fn list_job_postings(&self, request: PageRequest) -> RepoResult<Page<JobPosting>> {
        self.load_page(None, request)
    }

    fn list_job_postings_by_company(
        &self,
        company_id: RecordId,
        request: PageRequest,
    ) -> RepoResult<Page<JobPosting>> {
        self.load_page(Some(company_id), request)
    }

    fn find_company_with_postings(&self, company_id: RecordId) -> RepoResult<CompanyOverview> {
        let company = load_company(self.conn, &self.company_fields, company_id)?;
        let job_postings = self.query_postings(
            &format!("{JOB_POSTING_SELECT_SQL} WHERE company_id = ? ORDER BY id ASC"),
            vec![Value::Integer(company_id)],
        )?;
        Ok(CompanyOverview {
            company,
            job_postings,
        })
    }

    fn update_job_posting(
        &self,
        id: RecordId,
        update: &JobPostingUpdate,
    ) -> RepoResult<JobPosting> {
        let started_at = Instant::now();
        let result = self.update_job_posting_tx(id, update);
        log_write_outcome("job_posting_update", Some(id), started_at, &result);
        result
    }

    fn delete_job_posting(&self, id: RecordId) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = self.delete_job_posting_tx(id);
        log_write_outcome("job_posting_delete", Some(id), started_at, &result);
        result
    }
}

fn load_job_posting(
    conn: &Connection,
    fields: &JobAttributes,
    id: RecordId,
) -> RepoResult<JobPosting> {
    let posting = conn
        .query_row(
            &format!("{JOB_POSTING_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_job_posting_row,
        )
        .optional()?;

    let Some(mut posting) = posting else {
        return Err(RepoError::not_found(EntityKind::JobPosting, id));
    };
    posting.custom_fields = fields.find_by_owner(conn, id)?;
    Ok(posting)
}

fn parse_job_posting_row(row: &Row<'_>) -> rusqlite::Result<JobPosting> {
    Ok(JobPosting {
        id: row.get("id")?,
        company_id: row.get("company_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        custom_fields: Vec::new(),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
