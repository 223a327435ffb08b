//! Core use-case services.
//!
//! # Responsibility
//! - Validate caller input before it reaches the repositories.
//! - Expose a closed error set (`Validation`, `NotFound`, `Persistence`).
//! - Keep transport layers decoupled from storage details.

pub mod company_service;
pub mod error;
pub mod job_posting_service;
