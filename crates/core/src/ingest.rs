//! Ingestion: turns a raw submission into a canonical [`CaseRecord`].
//!
//! Validation happens entirely before the record is built, so a rejected submission never
//! reaches the store.

use crate::identity::CallerIdentity;
use crate::record::CaseRecord;
use crate::{CaseError, CaseResult};
use chrono::{NaiveDate, Utc};
use oncora_types::{AgeRange, CancerSubtype, Outcome, Region, Sex};
use oncora_uuid::IdGenerator;
use std::collections::HashSet;
use std::str::FromStr;

/// A case as submitted by a practitioner, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseSubmission {
    pub cancer_subtype: Option<String>,
    pub age_range: Option<String>,
    pub sex: Option<String>,
    pub outcome: Option<String>,
    /// `YYYY-MM-DD`.
    pub admission_date: Option<String>,
    pub genomic_variants: Option<String>,
    pub treatments: Option<String>,
    pub progression_notes: Option<String>,
    pub symptoms: Vec<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required<T>(field: &str, value: Option<&str>) -> CaseResult<T>
where
    T: FromStr<Err = oncora_types::CategoryError>,
{
    let raw = present(value)
        .ok_or_else(|| CaseError::Validation(format!("{field} is required")))?;
    Ok(raw.parse()?)
}

fn optional<T>(value: Option<&str>) -> CaseResult<Option<T>>
where
    T: FromStr<Err = oncora_types::CategoryError>,
{
    present(value).map(str::parse).transpose().map_err(Into::into)
}

fn admission_date(value: Option<&str>) -> CaseResult<Option<NaiveDate>> {
    present(value)
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                CaseError::Validation(format!(
                    "admissionDate must be a YYYY-MM-DD date, got '{raw}'"
                ))
            })
        })
        .transpose()
}

/// Trims and lower-cases tags, dropping blanks and later duplicates.
pub fn normalise_symptoms(symptoms: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    symptoms
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Validates `submission` and builds the record to append on behalf of `caller`.
///
/// # Errors
///
/// Returns [`CaseError::Validation`] when a required categorical field is missing or blank, when
/// any categorical value is outside its closed set, or when `admission_date` is malformed.
pub fn ingest(
    submission: &CaseSubmission,
    caller: &CallerIdentity,
    ids: &dyn IdGenerator,
) -> CaseResult<CaseRecord> {
    let cancer_subtype: CancerSubtype =
        required("cancerSubtype", submission.cancer_subtype.as_deref())?;
    let age_range: AgeRange = required("ageRange", submission.age_range.as_deref())?;
    let sex: Sex = required("sex", submission.sex.as_deref())?;
    let outcome: Option<Outcome> = optional(submission.outcome.as_deref())?;
    let admission_date = admission_date(submission.admission_date.as_deref())?;

    let narrative = |field: &Option<String>| field.as_deref().unwrap_or_default().trim().to_string();

    Ok(CaseRecord {
        id: ids.next_case_id(),
        patient_id: ids.next_patient_pseudonym(),
        age_range,
        sex,
        cancer_subtype,
        genomic_variants: narrative(&submission.genomic_variants),
        treatments: narrative(&submission.treatments),
        symptoms: normalise_symptoms(&submission.symptoms),
        progression_notes: narrative(&submission.progression_notes),
        admission_date,
        submitted_by: caller.id.clone(),
        submitted_at: Utc::now(),
        region: caller.region.unwrap_or(Region::Unknown),
        outcome,
        follow_up_months: 0,
        resistance_flags: false,
    })
}
