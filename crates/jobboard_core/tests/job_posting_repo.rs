use jobboard_core::db::open_db_in_memory;
use jobboard_core::{
    CompanyInput, CompanyRepository, EntityKind, JobPostingInput, JobPostingRepository,
    JobPostingUpdate, PageRequest, RepoError, SqliteCompanyRepository,
    SqliteJobPostingRepository,
};
use rusqlite::Connection;

fn seed_company(conn: &Connection, name: &str) -> i64 {
    SqliteCompanyRepository::try_new(conn)
        .unwrap()
        .create_company(&CompanyInput::new(name).with_field("hq", "Tokyo"))
        .unwrap()
        .id
}

#[test]
fn create_and_find_posting_with_custom_fields() {
    let conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&conn, "Acme");
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    let created = repo
        .create_job_posting(
            &JobPostingInput::new(company_id, "Rust Engineer")
                .with_description("storage team")
                .with_field("salary", "negotiable")
                .with_field("remote", "yes"),
        )
        .unwrap();

    assert_eq!(created.company_id, company_id);
    assert_eq!(created.custom_fields.len(), 2);
    assert!(created
        .custom_fields
        .iter()
        .all(|field| field.owner_id == created.id));

    let loaded = repo.find_job_posting_by_id(created.id).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn create_with_unknown_company_is_rejected_by_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    let err = repo
        .create_job_posting(&JobPostingInput::new(999, "Orphan").with_field("a", "b"))
        .unwrap_err();

    assert!(matches!(err, RepoError::Persistence(_)));
    assert_eq!(repo.list_job_postings(PageRequest::default()).unwrap().total, 0);
}

#[test]
fn find_unknown_posting_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    let err = repo.find_job_posting_by_id(5).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::JobPosting,
            id: 5
        }
    ));
}

#[test]
fn update_replaces_fields_and_keeps_company() {
    let conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&conn, "Acme");
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    let created = repo
        .create_job_posting(
            &JobPostingInput::new(company_id, "Draft")
                .with_field("a", "1")
                .with_field("b", "2"),
        )
        .unwrap();
    let updated = repo
        .update_job_posting(
            created.id,
            &JobPostingUpdate::new("Final")
                .with_description("published")
                .with_field("c", "3"),
        )
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.description.as_deref(), Some("published"));
    assert_eq!(updated.company_id, company_id);
    assert_eq!(updated.custom_fields.len(), 1);
    assert_eq!(updated.custom_fields[0].field_name, "c");
}

#[test]
fn update_unknown_posting_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    let err = repo
        .update_job_posting(12, &JobPostingUpdate::new("Nobody"))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn delete_removes_only_the_posting_and_its_fields() {
    let conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&conn, "Acme");
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    let doomed = repo
        .create_job_posting(&JobPostingInput::new(company_id, "Doomed").with_field("x", "1"))
        .unwrap();
    let kept = repo
        .create_job_posting(&JobPostingInput::new(company_id, "Kept").with_field("y", "2"))
        .unwrap();

    repo.delete_job_posting(doomed.id).unwrap();

    assert!(repo.find_job_posting_by_id(doomed.id).unwrap_err().is_not_found());
    assert_eq!(job_field_rows(&conn, doomed.id), 0);
    assert_eq!(repo.find_job_posting_by_id(kept.id).unwrap(), kept);

    let companies = SqliteCompanyRepository::try_new(&conn).unwrap();
    let company = companies.find_company_by_id(company_id).unwrap();
    assert_eq!(company.job_count, 1);
    assert_eq!(company.custom_fields.len(), 1);
}

#[test]
fn delete_unknown_posting_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    assert!(repo.delete_job_posting(3).unwrap_err().is_not_found());
}

#[test]
fn list_by_company_filters_and_counts_within_scope() {
    let conn = open_db_in_memory().unwrap();
    let first = seed_company(&conn, "First");
    let second = seed_company(&conn, "Second");
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    for index in 0..12 {
        repo.create_job_posting(&JobPostingInput::new(first, format!("F{index}")))
            .unwrap();
    }
    for index in 0..3 {
        repo.create_job_posting(&JobPostingInput::new(second, format!("S{index}")))
            .unwrap();
    }

    let page_two = repo
        .list_job_postings_by_company(first, PageRequest::new(2, 10))
        .unwrap();
    assert_eq!(page_two.total, 12);
    assert_eq!(page_two.items.len(), 2);
    assert!(page_two.items.iter().all(|posting| posting.company_id == first));

    let all = repo.list_job_postings(PageRequest::new(1, 100)).unwrap();
    assert_eq!(all.total, 15);
    assert_eq!(all.items.len(), 15);
    assert!(all.items.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[test]
fn list_by_company_without_postings_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&conn, "Idle");
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    let page = repo
        .list_job_postings_by_company(company_id, PageRequest::new(1, 10))
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);

    let unknown = repo
        .list_job_postings_by_company(4242, PageRequest::new(1, 10))
        .unwrap();
    assert!(unknown.items.is_empty());
    assert_eq!(unknown.total, 0);
}

#[test]
fn company_overview_contains_every_posting() {
    let conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&conn, "Overview");
    let other_id = seed_company(&conn, "Other");
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    for index in 0..15 {
        repo.create_job_posting(
            &JobPostingInput::new(company_id, format!("Role {index}")).with_field("n", "v"),
        )
        .unwrap();
    }
    repo.create_job_posting(&JobPostingInput::new(other_id, "Elsewhere"))
        .unwrap();

    let overview = repo.find_company_with_postings(company_id).unwrap();
    assert_eq!(overview.company.id, company_id);
    assert_eq!(overview.company.job_count, 15);
    assert_eq!(overview.company.custom_fields.len(), 1);
    assert_eq!(overview.job_postings.len(), 15);
    assert!(overview
        .job_postings
        .iter()
        .all(|posting| posting.company_id == company_id && posting.custom_fields.len() == 1));
}

#[test]
fn company_overview_for_unknown_company_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    let err = repo.find_company_with_postings(8).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Company,
            id: 8
        }
    ));
}

#[test]
fn failed_custom_field_insert_rolls_back_job_posting() {
    let conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&conn, "Acme");
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    let err = repo
        .create_job_posting(
            &JobPostingInput::new(company_id, "Half Written")
                .with_field("ok", "1")
                .with_field(" ", "x"),
        )
        .unwrap_err();

    assert!(matches!(err, RepoError::Persistence(_)));
    assert_eq!(repo.list_job_postings(PageRequest::default()).unwrap().total, 0);
    let job_fields: i64 = conn
        .query_row("SELECT COUNT(*) FROM job_custom_fields;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(job_fields, 0);
}

#[test]
fn failed_job_posting_update_keeps_previous_state() {
    let conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&conn, "Acme");
    let repo = SqliteJobPostingRepository::try_new(&conn).unwrap();

    let created = repo
        .create_job_posting(&JobPostingInput::new(company_id, "T").with_field("keep", "me"))
        .unwrap();
    let err = repo
        .update_job_posting(
            created.id,
            &JobPostingUpdate::new("Renamed")
                .with_field("fine", "1")
                .with_field("", "broken"),
        )
        .unwrap_err();

    assert!(matches!(err, RepoError::Persistence(_)));
    let loaded = repo.find_job_posting_by_id(created.id).unwrap();
    assert_eq!(loaded.title, "T");
    assert_eq!(loaded.custom_fields.len(), 1);
    assert_eq!(loaded.custom_fields[0].field_name, "keep");
    assert_eq!(job_field_rows(&conn, created.id), 1);
}

fn job_field_rows(conn: &Connection, job_id: i64) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM job_custom_fields WHERE job_id = ?1;",
        [job_id],
        |row| row.get(0),
    )
    .unwrap()
}
