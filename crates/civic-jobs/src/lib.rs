//! Applicant ranking for the municipal jobs portal.
//!
//! Pending applications for a posting arrive in one of two shapes (the flat
//! applicant profile or the structured Personal Data Sheet). The ranking
//! workflow normalizes both into one canonical record, scores every applicant
//! against the posting, and returns a dense, deterministic ranking.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
