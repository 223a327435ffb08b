//! Domain model for companies, job postings and their custom fields.
//!
//! # Responsibility
//! - Define the aggregate read models returned by repositories.
//! - Define the input shapes accepted by create/update paths.
//!
//! # Invariants
//! - Ids and timestamps are assigned by the store, never by callers.
//! - `Company::job_count` is derived on every read and never persisted.

pub mod company;
pub mod custom_field;
pub mod job_posting;
pub mod validation;
