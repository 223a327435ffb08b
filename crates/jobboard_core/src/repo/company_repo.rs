//! Company repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist companies together with their custom field sets.
//! - Derive `job_count` from `job_postings` on every read.
//!
//! # Invariants
//! - Create and update run in one `IMMEDIATE` transaction; a failing
//!   custom field write rolls back the company row as well.
//! - Update fully replaces the custom field set.
//! - Delete goes through the cascade coordinator.
//! - Concurrent updates are last-writer-wins; there is no version check.

use crate::model::company::{Company, CompanyInput};
use crate::model::custom_field::RecordId;
use crate::repo::attribute_store::{CompanyAttributes, OwnedAttributeSet};
use crate::repo::cascade::{delete_company_cascade, CascadeReport};
use crate::repo::common::{
    begin_immediate, ensure_connection_ready, log_write_outcome, to_count,
};
use crate::repo::error::{EntityKind, RepoError, RepoResult};
use crate::repo::pagination::{count_rows, Page, PageRequest};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::time::Instant;

const COMPANY_SELECT_SQL: &str = "SELECT
    c.id AS id,
    c.name AS name,
    c.business_description AS business_description,
    c.created_at AS created_at,
    c.updated_at AS updated_at,
    (SELECT COUNT(*) FROM job_postings jp WHERE jp.company_id = c.id) AS job_count
FROM companies c";

/// Repository interface for company aggregates.
pub trait CompanyRepository {
    /// Inserts a company and its custom fields.
    fn create_company(&self, input: &CompanyInput) -> RepoResult<Company>;
    /// Loads one company with custom fields and job count.
    fn find_company_by_id(&self, id: RecordId) -> RepoResult<Company>;
    /// Lists companies ordered by id, one page at a time.
    fn list_companies(&self, request: PageRequest) -> RepoResult<Page<Company>>;
    /// Replaces name, description and the full custom field set.
    fn update_company(&self, id: RecordId, input: &CompanyInput) -> RepoResult<Company>;
    /// Deletes a company and everything it owns.
    fn delete_company(&self, id: RecordId) -> RepoResult<CascadeReport>;
}

/// SQLite-backed company repository.
pub struct SqliteCompanyRepository<'conn> {
    conn: &'conn Connection,
    fields: CompanyAttributes,
}

impl<'conn> SqliteCompanyRepository<'conn> {
    /// Creates a repository over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            fields: CompanyAttributes::new(),
        })
    }

    fn create_company_tx(&self, input: &CompanyInput) -> RepoResult<Company> {
        let tx = begin_immediate(self.conn)?;
        tx.execute(
            "INSERT INTO companies (name, business_description) VALUES (?1, ?2);",
            params![input.name.as_str(), input.description.as_deref()],
        )?;
        let company_id = tx.last_insert_rowid();
        self.fields
            .insert_all(&tx, company_id, &input.custom_fields)?;
        let company = load_company(&tx, &self.fields, company_id)?;
        tx.commit()?;
        Ok(company)
    }

    fn update_company_tx(&self, id: RecordId, input: &CompanyInput) -> RepoResult<Company> {
        let tx = begin_immediate(self.conn)?;
        let changed = tx.execute(
            "UPDATE companies
             SET
                name = ?2,
                business_description = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id, input.name.as_str(), input.description.as_deref()],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Company, id));
        }

        self.fields.put(&tx, id, &input.custom_fields)?;
        let company = load_company(&tx, &self.fields, id)?;
        tx.commit()?;
        Ok(company)
    }
}

impl CompanyRepository for SqliteCompanyRepository<'_> {
    fn create_company(&self, input: &CompanyInput) -> RepoResult<Company> {
        let started_at = Instant::now();
        let result = self.create_company_tx(input);
        log_write_outcome(
            "company_create",
            result.as_ref().ok().map(|company| company.id),
            started_at,
            &result,
        );
        result
    }

    fn find_company_by_id(&self, id: RecordId) -> RepoResult<Company> {
        load_company(self.conn, &self.fields, id)
    }

    fn list_companies(&self, request: PageRequest) -> RepoResult<Page<Company>> {
        let total = count_rows(self.conn, "companies", None)?;
        let (limit, offset) = request.sql_bounds();

        let mut stmt = self.conn.prepare(&format!(
            "{COMPANY_SELECT_SQL}
             ORDER BY c.id ASC
             LIMIT ?1 OFFSET ?2;"
        ))?;
        let mut rows = stmt.query(params![limit, offset])?;
        let mut companies = Vec::new();
        while let Some(row) = rows.next()? {
            companies.push(parse_company_row(row)?);
        }

        for company in &mut companies {
            company.custom_fields = self.fields.find_by_owner(self.conn, company.id)?;
        }

        Ok(Page::new(companies, total, request))
    }

    fn update_company(&self, id: RecordId, input: &CompanyInput) -> RepoResult<Company> {
        let started_at = Instant::now();
        let result = self.update_company_tx(id, input);
        log_write_outcome("company_update", Some(id), started_at, &result);
        result
    }

    fn delete_company(&self, id: RecordId) -> RepoResult<CascadeReport> {
        delete_company_cascade(self.conn, id)
    }
}

/// Loads one company aggregate, or `NotFound`.
pub(crate) fn load_company(
    conn: &Connection,
    fields: &CompanyAttributes,
    id: RecordId,
) -> RepoResult<Company> {
    let company = conn
        .query_row(
            &format!("{COMPANY_SELECT_SQL} WHERE c.id = ?1;"),
            [id],
            parse_company_row,
        )
        .optional()?;

    let Some(mut company) = company else {
        return Err(RepoError::not_found(EntityKind::Company, id));
    };
    company.custom_fields = fields.find_by_owner(conn, id)?;
    Ok(company)
}

fn parse_company_row(row: &Row<'_>) -> rusqlite::Result<Company> {
    Ok(Company {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("business_description")?,
        custom_fields: Vec::new(),
        job_count: to_count(row.get("job_count")?),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
