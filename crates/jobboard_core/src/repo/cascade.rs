//! Company cascade delete.
//!
//! # Invariants
//! - Runs as one `IMMEDIATE` transaction; readers never observe a partial
//!   cascade.
//! - Deletion order is children first: job posting fields, job postings,
//!   company fields, company. The schema declares no `ON DELETE CASCADE`, so
//!   this order is what satisfies the foreign keys.
//! - A missing company is `NotFound`, not a silent no-op.

use crate::model::custom_field::RecordId;
use crate::repo::attribute_store::{CompanyAttributes, JobAttributes, OwnedAttributeSet};
use crate::repo::common::{begin_immediate, log_write_outcome, record_exists};
use crate::repo::error::{EntityKind, RepoError, RepoResult};
use log::info;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Rows removed by one company cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub company_id: RecordId,
    pub job_custom_fields: usize,
    pub job_postings: usize,
    pub company_custom_fields: usize,
}

/// Deletes `company_id` and everything it transitively owns.
pub fn delete_company_cascade(conn: &Connection, company_id: RecordId) -> RepoResult<CascadeReport> {
    let started_at = Instant::now();
    let result = run_cascade(conn, company_id);
    if let Ok(report) = &result {
        info!(
            "event=company_cascade module=cascade status=ok company_id={} job_postings={} job_custom_fields={} company_custom_fields={}",
            report.company_id,
            report.job_postings,
            report.job_custom_fields,
            report.company_custom_fields
        );
    }
    log_write_outcome("company_delete", Some(company_id), started_at, &result);
    result
}

fn run_cascade(conn: &Connection, company_id: RecordId) -> RepoResult<CascadeReport> {
    let tx = begin_immediate(conn)?;
    if !record_exists(&tx, "companies", company_id)? {
        return Err(RepoError::not_found(EntityKind::Company, company_id));
    }

    let job_fields = JobAttributes::new();
    let company_fields = CompanyAttributes::new();
    let mut report = CascadeReport {
        company_id,
        ..CascadeReport::default()
    };

    for posting_id in posting_ids_for_company(&tx, company_id)? {
        report.job_custom_fields += job_fields.delete_by_owner(&tx, posting_id)?;
    }
    report.job_postings = tx.execute(
        "DELETE FROM job_postings WHERE company_id = ?1;",
        [company_id],
    )?;
    report.company_custom_fields = company_fields.delete_by_owner(&tx, company_id)?;
    tx.execute("DELETE FROM companies WHERE id = ?1;", [company_id])?;

    tx.commit()?;
    Ok(report)
}

fn posting_ids_for_company(conn: &Connection, company_id: RecordId) -> RepoResult<Vec<RecordId>> {
    let mut stmt = conn.prepare(
        "SELECT id
         FROM job_postings
         WHERE company_id = ?1
         ORDER BY id ASC;",
    )?;
    let mut rows = stmt.query([company_id])?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next()? {
        ids.push(row.get(0)?);
    }
    Ok(ids)
}
