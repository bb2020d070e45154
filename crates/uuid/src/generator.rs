//! Identifier types and generators.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

const PSEUDONYM_PREFIX: &str = "patient-";

/// Globally unique identifier of a case record.
///
/// Displayed in hyphenated lowercase form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaseId(Uuid);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Synthetic patient reference attached to a case.
///
/// Not guaranteed to identify a unique patient across cases: two submissions about the same
/// patient receive unrelated pseudonyms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatientPseudonym(Uuid);

impl fmt::Display for PatientPseudonym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PSEUDONYM_PREFIX, self.0.simple())
    }
}

/// Source of fresh identifiers for new case records.
pub trait IdGenerator: Send + Sync {
    fn next_case_id(&self) -> CaseId;

    fn next_patient_pseudonym(&self) -> PatientPseudonym;
}

/// Production generator: every identifier is an independent random UUID v4.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_case_id(&self) -> CaseId {
        CaseId(Uuid::new_v4())
    }

    fn next_patient_pseudonym(&self) -> PatientPseudonym {
        PatientPseudonym(Uuid::new_v4())
    }
}

/// Deterministic generator for tests and fixtures.
///
/// Case ids and pseudonyms draw from separate counters, so the n-th case id never equals the
/// n-th pseudonym's UUID.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    cases: AtomicU64,
    patients: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_case_id(&self) -> CaseId {
        let n = self.cases.fetch_add(1, Ordering::Relaxed) + 1;
        CaseId(Uuid::from_u128(n as u128))
    }

    fn next_patient_pseudonym(&self) -> PatientPseudonym {
        let n = self.patients.fetch_add(1, Ordering::Relaxed) + 1;
        PatientPseudonym(Uuid::from_u128((1u128 << 64) | n as u128))
    }
}
