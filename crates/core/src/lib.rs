//! # Oncora Core
//!
//! Core business logic for the Oncora lymphoma case registry.
//!
//! This crate contains pure data operations over de-identified case records:
//! - an append-only record store behind the [`store::CaseStore`] trait
//! - multi-clause filtering and free-text search
//! - offset/limit pagination
//! - single-pass aggregate analytics with a configurable genomic marker vocabulary
//! - ingestion of practitioner submissions
//!
//! **No API concerns**: HTTP servers, bearer sessions and wire DTOs belong in `api-rest` or
//! `api-shared`.

pub mod analytics;
pub mod config;
pub mod constants;
mod error;
pub mod filter;
pub mod hospitals;
pub mod identity;
pub mod ingest;
pub mod pagination;
pub mod record;
pub mod seed;
pub mod service;
pub mod store;

pub use analytics::{AnalyticsRequest, AnalyticsSummary, GenomicMarker, MarkerVocabulary};
pub use config::CoreConfig;
pub use error::{CaseError, CaseResult};
pub use filter::CaseFilter;
pub use hospitals::{HospitalDirectory, HospitalEntry};
pub use identity::{CallerIdentity, Credentials, DirectoryVerifier, IdentityVerifier, VerifiedDoctor};
pub use ingest::CaseSubmission;
pub use pagination::PageRequest;
pub use record::CaseRecord;
pub use service::{CasePage, CaseService};
pub use store::{CaseStore, InMemoryCaseStore};

pub use oncora_types::{AgeRange, CancerSubtype, NonEmptyText, Outcome, Region, Sex};
pub use oncora_uuid::{CaseId, IdGenerator, PatientPseudonym, RandomIdGenerator, SequentialIdGenerator};
