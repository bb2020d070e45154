//! Case record domain type.

use chrono::{DateTime, NaiveDate, Utc};
use oncora_types::{AgeRange, CancerSubtype, NonEmptyText, Outcome, Region, Sex};
use oncora_uuid::{CaseId, PatientPseudonym};

/// A de-identified clinical case as held by the record store.
///
/// Records are created once by ingestion (or the demo seed) and shared read-only afterwards,
/// typically as `Arc<CaseRecord>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseRecord {
    pub id: CaseId,
    pub patient_id: PatientPseudonym,
    pub age_range: AgeRange,
    pub sex: Sex,
    pub cancer_subtype: CancerSubtype,
    pub genomic_variants: String,
    pub treatments: String,
    /// Ordered, duplicate-free symptom tags.
    pub symptoms: Vec<String>,
    pub progression_notes: String,
    pub admission_date: Option<NaiveDate>,
    /// Identifier of the authenticated submitter. Provenance only.
    pub submitted_by: NonEmptyText,
    pub submitted_at: DateTime<Utc>,
    pub region: Region,
    pub outcome: Option<Outcome>,
    pub follow_up_months: u32,
    pub resistance_flags: bool,
}

impl CaseRecord {
    /// True when the recorded outcome mentions remission (complete or partial).
    pub fn is_remission(&self) -> bool {
        self.outcome
            .is_some_and(|o| o.as_str().contains(crate::constants::REMISSION_KEYWORD))
    }
}
