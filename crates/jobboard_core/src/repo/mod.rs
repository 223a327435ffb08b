//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Own every SQL statement of the core.
//! - Compose the generic attribute store into the company and job posting
//!   aggregates.
//!
//! # Invariants
//! - Multi-statement writes run in exactly one transaction and either commit
//!   fully or roll back fully.
//! - Missing records are reported as `RepoError::NotFound`, never as an empty
//!   aggregate.

pub mod attribute_store;
pub mod cascade;
mod common;
pub mod company_repo;
pub mod error;
pub mod job_repo;
pub mod pagination;
