//! CLI smoke entry point.
//!
//! Opens the database given as the first argument (in-memory when omitted)
//! and prints core wiring facts plus aggregate totals.

use jobboard_core::db::migrations::latest_version;
use jobboard_core::db::{open_db, open_db_in_memory};
use jobboard_core::{
    CompanyRepository, JobPostingRepository, PageRequest, SqliteCompanyRepository,
    SqliteJobPostingRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("jobboard_core ping={}", jobboard_core::ping());
    println!("jobboard_core version={}", jobboard_core::core_version());
    println!("jobboard_core schema_version={}", latest_version());

    match print_totals(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("jobboard_cli error={err}");
            ExitCode::FAILURE
        }
    }
}

fn print_totals(db_path: Option<String>) -> Result<(), Box<dyn Error>> {
    let conn = match db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    let companies = SqliteCompanyRepository::try_new(&conn)?.list_companies(PageRequest::default())?;
    let postings =
        SqliteJobPostingRepository::try_new(&conn)?.list_job_postings(PageRequest::default())?;
    println!("companies total={}", companies.total);
    println!("job_postings total={}", postings.total);
    Ok(())
}
