//! Identifier generation for case records.
//!
//! Oncora assigns two independent identifiers to every case:
//! - a [`CaseId`], the globally unique record identifier, and
//! - a [`PatientPseudonym`], a synthetic patient reference that is never derived from any
//!   human-supplied value.
//!
//! Both are backed by UUID v4 values, so collisions are as unlikely as UUID collisions. The
//! legacy `patient-<9 random base36 chars>` scheme is not reproduced.
//!
//! ## Display forms
//! - `CaseId`: hyphenated lowercase UUID, e.g. `550e8400-e29b-41d4-a716-446655440000`
//! - `PatientPseudonym`: `patient-` followed by 32 lowercase hex characters
//!
//! Identifiers are only ever minted, never read back from input. Generation goes through the
//! [`IdGenerator`] trait so services can be handed a deterministic source in tests and fixtures.

mod generator;

pub use generator::{CaseId, IdGenerator, PatientPseudonym, RandomIdGenerator, SequentialIdGenerator};
