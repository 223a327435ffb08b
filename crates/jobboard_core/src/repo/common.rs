//! SQLite plumbing shared by the aggregate repositories.

use crate::db::migrations::{current_version, latest_version};
use crate::model::custom_field::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use log::{error, info};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Instant;

/// Tables every repository expects after migrations.
const REQUIRED_TABLES: &[&str] = &[
    "companies",
    "company_custom_fields",
    "job_postings",
    "job_custom_fields",
];

/// Opens a write transaction on a shared connection borrow.
///
/// The returned transaction rolls back when dropped without `commit`, which
/// covers early `?` returns and unwinding.
pub(crate) fn begin_immediate(conn: &Connection) -> RepoResult<Transaction<'_>> {
    Ok(Transaction::new_unchecked(
        conn,
        TransactionBehavior::Immediate,
    )?)
}

/// Returns whether `table` holds a row with primary key `id`.
pub(crate) fn record_exists(conn: &Connection, table: &'static str, id: RecordId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Rejects connections that were not opened through `db::open_db*`.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

/// Emits one metadata-only line for a finished write operation.
pub(crate) fn log_write_outcome<T>(
    event: &'static str,
    target_id: Option<RecordId>,
    started_at: Instant,
    result: &RepoResult<T>,
) {
    let target = target_id.map_or_else(|| "new".to_string(), |id| id.to_string());
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!(
            "event={event} module=repo status=ok target={target} duration_ms={duration_ms}"
        ),
        Err(RepoError::NotFound { .. }) => info!(
            "event={event} module=repo status=not_found target={target} duration_ms={duration_ms}"
        ),
        Err(err) => error!(
            "event={event} module=repo status=error target={target} duration_ms={duration_ms} error={err}"
        ),
    }
}

/// Converts a SQLite `COUNT(*)` value into an unsigned count.
pub(crate) fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
