//! Generic storage for owner-scoped custom field records.
//!
//! # Responsibility
//! - Provide `put` / `find_by_owner` / `delete_by_owner` over one custom
//!   field table, parameterized by owner kind.
//!
//! # Invariants
//! - Never opens a transaction; always runs on the caller's connection or
//!   transaction so it joins the caller's atomic scope.
//! - `put` is full replacement: delete every record of the owner, then insert.
//! - Records are returned in insertion order (`id ASC`).

use crate::model::custom_field::{CustomField, CustomFieldInput, RecordId};
use crate::repo::error::RepoResult;
use rusqlite::{params, Connection, Row};
use std::marker::PhantomData;

/// Binds an attribute table to the aggregate that owns its rows.
pub trait OwnerKind {
    /// Table holding the records.
    const TABLE: &'static str;
    /// Foreign key column pointing at the owner.
    const OWNER_COLUMN: &'static str;
}

/// Owner marker for `company_custom_fields`.
#[derive(Debug, Clone, Copy)]
pub struct CompanyOwner;

impl OwnerKind for CompanyOwner {
    const TABLE: &'static str = "company_custom_fields";
    const OWNER_COLUMN: &'static str = "company_id";
}

/// Owner marker for `job_custom_fields`.
#[derive(Debug, Clone, Copy)]
pub struct JobPostingOwner;

impl OwnerKind for JobPostingOwner {
    const TABLE: &'static str = "job_custom_fields";
    const OWNER_COLUMN: &'static str = "job_id";
}

/// Capability interface over one owned attribute collection.
pub trait OwnedAttributeSet {
    /// Replaces every record of `owner_id` with `fields`.
    fn put(
        &self,
        conn: &Connection,
        owner_id: RecordId,
        fields: &[CustomFieldInput],
    ) -> RepoResult<Vec<CustomField>>;
    /// Loads every record of `owner_id`.
    fn find_by_owner(&self, conn: &Connection, owner_id: RecordId)
        -> RepoResult<Vec<CustomField>>;
    /// Removes every record of `owner_id` and returns how many were removed.
    fn delete_by_owner(&self, conn: &Connection, owner_id: RecordId) -> RepoResult<usize>;
}

/// SQLite attribute store for owner kind `K`.
pub struct AttributeStore<K: OwnerKind> {
    _owner: PhantomData<fn() -> K>,
}

/// Custom fields owned by companies.
pub type CompanyAttributes = AttributeStore<CompanyOwner>;
/// Custom fields owned by job postings.
pub type JobAttributes = AttributeStore<JobPostingOwner>;

impl<K: OwnerKind> AttributeStore<K> {
    pub const fn new() -> Self {
        Self {
            _owner: PhantomData,
        }
    }

    /// Inserts `fields` for an owner that has no records yet.
    pub fn insert_all(
        &self,
        conn: &Connection,
        owner_id: RecordId,
        fields: &[CustomFieldInput],
    ) -> RepoResult<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let mut stmt = conn.prepare_cached(&format!(
            "INSERT INTO {} ({}, field_name, content) VALUES (?1, ?2, ?3);",
            K::TABLE,
            K::OWNER_COLUMN
        ))?;
        for field in fields {
            stmt.execute(params![
                owner_id,
                field.field_name.as_str(),
                field.content.as_str()
            ])?;
        }
        Ok(())
    }
}

impl<K: OwnerKind> Default for AttributeStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: OwnerKind> OwnedAttributeSet for AttributeStore<K> {
    fn put(
        &self,
        conn: &Connection,
        owner_id: RecordId,
        fields: &[CustomFieldInput],
    ) -> RepoResult<Vec<CustomField>> {
        self.delete_by_owner(conn, owner_id)?;
        self.insert_all(conn, owner_id, fields)?;
        self.find_by_owner(conn, owner_id)
    }

    fn find_by_owner(
        &self,
        conn: &Connection,
        owner_id: RecordId,
    ) -> RepoResult<Vec<CustomField>> {
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT
                id,
                {owner} AS owner_id,
                field_name,
                content,
                created_at,
                updated_at
             FROM {table}
             WHERE {owner} = ?1
             ORDER BY id ASC;",
            owner = K::OWNER_COLUMN,
            table = K::TABLE
        ))?;

        let mut rows = stmt.query([owner_id])?;
        let mut fields = Vec::new();
        while let Some(row) = rows.next()? {
            fields.push(parse_custom_field_row(row)?);
        }
        Ok(fields)
    }

    fn delete_by_owner(&self, conn: &Connection, owner_id: RecordId) -> RepoResult<usize> {
        let removed = conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1;",
                K::TABLE,
                K::OWNER_COLUMN
            ),
            [owner_id],
        )?;
        Ok(removed)
    }
}

fn parse_custom_field_row(row: &Row<'_>) -> rusqlite::Result<CustomField> {
    Ok(CustomField {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        field_name: row.get("field_name")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::{CompanyAttributes, OwnedAttributeSet};
    use crate::db::open_db_in_memory;
    use crate::model::custom_field::CustomFieldInput;

    fn insert_company(conn: &rusqlite::Connection, name: &str) -> i64 {
        conn.execute("INSERT INTO companies (name) VALUES (?1);", [name])
            .unwrap();
        conn.last_insert_rowid()
    }

    #[test]
    fn put_replaces_previous_set() {
        let conn = open_db_in_memory().unwrap();
        let company_id = insert_company(&conn, "Acme");
        let store = CompanyAttributes::new();

        store
            .put(
                &conn,
                company_id,
                &[
                    CustomFieldInput::new("a", "1"),
                    CustomFieldInput::new("b", "2"),
                ],
            )
            .unwrap();
        let replaced = store
            .put(&conn, company_id, &[CustomFieldInput::new("c", "3")])
            .unwrap();

        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].field_name, "c");
        assert_eq!(store.find_by_owner(&conn, company_id).unwrap(), replaced);
    }

    #[test]
    fn records_are_scoped_to_their_owner() {
        let conn = open_db_in_memory().unwrap();
        let first = insert_company(&conn, "First");
        let second = insert_company(&conn, "Second");
        let store = CompanyAttributes::new();

        store
            .put(&conn, first, &[CustomFieldInput::new("size", "10")])
            .unwrap();
        store
            .put(&conn, second, &[CustomFieldInput::new("size", "500")])
            .unwrap();

        assert_eq!(store.delete_by_owner(&conn, first).unwrap(), 1);
        assert!(store.find_by_owner(&conn, first).unwrap().is_empty());
        let remaining = store.find_by_owner(&conn, second).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].owner_id, second);
        assert_eq!(remaining[0].content, "500");
    }

    #[test]
    fn delete_by_owner_without_records_removes_nothing() {
        let conn = open_db_in_memory().unwrap();
        let company_id = insert_company(&conn, "Empty");
        let store = CompanyAttributes::new();
        assert_eq!(store.delete_by_owner(&conn, company_id).unwrap(), 0);
    }
}
