//! Request and response bodies for the JSON API.
//!
//! Field names are camelCase on the wire. Every response envelope carries `success`.

use chrono::SecondsFormat;
use oncora_core::{
    AnalyticsSummary, CaseFilter, CaseRecord, CaseSubmission, Credentials, HospitalEntry,
    VerifiedDoctor,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

/// A categorical input sent either as a bare string or as a `{ value, label }` select option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SelectValue {
    Plain(String),
    Labelled {
        value: String,
        #[serde(default)]
        label: Option<String>,
    },
}

impl SelectValue {
    pub fn value(&self) -> &str {
        match self {
            SelectValue::Plain(value) => value.as_str(),
            SelectValue::Labelled { value, .. } => value.as_str(),
        }
    }

    pub fn into_value(self) -> String {
        match self {
            SelectValue::Plain(value) => value,
            SelectValue::Labelled { value, .. } => value,
        }
    }
}

fn timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub version: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub success: bool,
    pub message: String,
}

impl ErrorRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HospitalDto {
    pub id: String,
    pub name: String,
    pub region: String,
    pub verified: bool,
}

impl From<&HospitalEntry> for HospitalDto {
    fn from(entry: &HospitalEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            region: entry.region.to_string(),
            verified: entry.verified,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HospitalsRes {
    pub success: bool,
    pub hospitals: Vec<HospitalDto>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyReq {
    #[serde(default)]
    pub medical_id: String,
    #[serde(default)]
    pub hospital: Option<SelectValue>,
    #[serde(default)]
    pub region: Option<SelectValue>,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<VerifyReq> for Credentials {
    fn from(req: VerifyReq) -> Self {
        Credentials {
            medical_id: req.medical_id,
            hospital_id: req.hospital.map(SelectValue::into_value).unwrap_or_default(),
            region: req.region.map(SelectValue::into_value),
            email: req.email,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDto {
    pub id: String,
    pub medical_id: String,
    pub hospital: String,
    pub hospital_name: String,
    pub region: Option<String>,
    pub email: Option<String>,
    pub verified: bool,
    pub verified_at: String,
}

impl From<&VerifiedDoctor> for DoctorDto {
    fn from(doctor: &VerifiedDoctor) -> Self {
        Self {
            id: doctor.identity.id.to_string(),
            medical_id: doctor.medical_id.clone(),
            hospital: doctor.hospital.id.clone(),
            hospital_name: doctor.hospital.name.clone(),
            region: doctor.identity.region.map(|r| r.to_string()),
            email: doctor.email.clone(),
            verified: doctor.identity.verified,
            verified_at: timestamp(doctor.verified_at),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyRes {
    pub success: bool,
    pub doctor: DoctorDto,
    pub token: String,
}

/// Query string of `GET /api/cases`.
///
/// `limit` and `offset` stay raw here so malformed numbers surface as validation errors with a
/// message, not as extractor rejections.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CaseQuery {
    pub cancer_subtype: Option<String>,
    pub region: Option<String>,
    pub age_range: Option<String>,
    pub genomic_marker: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl CaseQuery {
    pub fn filter(&self) -> CaseFilter {
        CaseFilter {
            cancer_subtype: self.cancer_subtype.clone(),
            region: self.region.clone(),
            age_range: self.age_range.clone(),
            genomic_marker: self.genomic_marker.clone(),
            search: self.search.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseDto {
    pub id: String,
    pub patient_id: String,
    pub age_range: String,
    pub sex: String,
    pub cancer_subtype: String,
    pub genomic_variants: String,
    pub treatments: String,
    pub symptoms: Vec<String>,
    pub progression_notes: String,
    pub admission_date: Option<String>,
    pub submitted_by: String,
    pub submitted_at: String,
    pub region: String,
    pub outcome: Option<String>,
    pub follow_up_months: u32,
    pub resistance_flags: bool,
}

impl From<&CaseRecord> for CaseDto {
    fn from(record: &CaseRecord) -> Self {
        Self {
            id: record.id.to_string(),
            patient_id: record.patient_id.to_string(),
            age_range: record.age_range.to_string(),
            sex: record.sex.to_string(),
            cancer_subtype: record.cancer_subtype.to_string(),
            genomic_variants: record.genomic_variants.clone(),
            treatments: record.treatments.clone(),
            symptoms: record.symptoms.clone(),
            progression_notes: record.progression_notes.clone(),
            admission_date: record
                .admission_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            submitted_by: record.submitted_by.to_string(),
            submitted_at: timestamp(record.submitted_at),
            region: record.region.to_string(),
            outcome: record.outcome.map(|o| o.to_string()),
            follow_up_months: record.follow_up_months,
            resistance_flags: record.resistance_flags,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CasesRes {
    pub success: bool,
    pub cases: Vec<CaseDto>,
    pub total: usize,
    pub has_more: bool,
}

/// Body of `POST /api/cases`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseSubmissionReq {
    pub cancer_subtype: Option<SelectValue>,
    pub age_range: Option<SelectValue>,
    pub sex: Option<SelectValue>,
    pub outcome: Option<SelectValue>,
    pub admission_date: Option<String>,
    pub genomic_variants: Option<String>,
    pub treatments: Option<String>,
    pub progression_notes: Option<String>,
    pub symptoms: Vec<SelectValue>,
}

impl From<CaseSubmissionReq> for CaseSubmission {
    fn from(req: CaseSubmissionReq) -> Self {
        CaseSubmission {
            cancer_subtype: req.cancer_subtype.map(SelectValue::into_value),
            age_range: req.age_range.map(SelectValue::into_value),
            sex: req.sex.map(SelectValue::into_value),
            outcome: req.outcome.map(SelectValue::into_value),
            admission_date: req.admission_date,
            genomic_variants: req.genomic_variants,
            treatments: req.treatments,
            progression_notes: req.progression_notes,
            symptoms: req.symptoms.into_iter().map(SelectValue::into_value).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCaseRes {
    pub success: bool,
    pub case: CaseDto,
    pub message: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    pub timeframe: Option<String>,
    pub region: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub total_cases: usize,
    pub remission_rate: u32,
    pub cancer_type_distribution: BTreeMap<String, usize>,
    pub regional_distribution: BTreeMap<String, usize>,
    pub genomic_variants: BTreeMap<String, usize>,
    pub timeframe: String,
    pub region: String,
}

impl From<&AnalyticsSummary> for AnalyticsDto {
    fn from(summary: &AnalyticsSummary) -> Self {
        Self {
            total_cases: summary.total_cases,
            remission_rate: summary.remission_rate,
            cancer_type_distribution: summary
                .cancer_type_distribution
                .iter()
                .map(|(subtype, n)| (subtype.to_string(), *n))
                .collect(),
            regional_distribution: summary
                .regional_distribution
                .iter()
                .map(|(region, n)| (region.to_string(), *n))
                .collect(),
            genomic_variants: summary.genomic_variants.clone(),
            timeframe: summary.timeframe.clone(),
            region: summary.region.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsRes {
    pub success: bool,
    pub analytics: AnalyticsDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncora_core::seed::demo_cases;
    use oncora_core::SequentialIdGenerator;

    #[test]
    fn select_value_accepts_string_or_option_object() {
        let plain: SelectValue = serde_json::from_str(r#""us-west""#).unwrap();
        let labelled: SelectValue =
            serde_json::from_str(r#"{"value":"us-west","label":"US West"}"#).unwrap();
        assert_eq!(plain.value(), "us-west");
        assert_eq!(labelled.value(), "us-west");
    }

    #[test]
    fn submission_body_maps_to_core_submission() {
        let body = r#"{
            "cancerSubtype": {"value": "burkitt-lymphoma", "label": "Burkitt Lymphoma"},
            "ageRange": "30-39",
            "sex": "male",
            "symptoms": [{"value": "fever", "label": "Fever"}, "fatigue"]
        }"#;
        let req: CaseSubmissionReq = serde_json::from_str(body).unwrap();
        let submission = CaseSubmission::from(req);

        assert_eq!(submission.cancer_subtype.as_deref(), Some("burkitt-lymphoma"));
        assert_eq!(submission.symptoms, vec!["fever", "fatigue"]);
        assert_eq!(submission.outcome, None);
    }

    #[test]
    fn case_dto_uses_camel_case_wire_names() {
        let record = demo_cases(&SequentialIdGenerator::new()).unwrap().remove(0);
        let json = serde_json::to_value(CaseDto::from(&record)).unwrap();

        assert_eq!(json["cancerSubtype"], "hodgkin-lymphoma");
        assert_eq!(json["ageRange"], "40-49");
        assert_eq!(json["admissionDate"], "2023-06-15");
        assert_eq!(json["submittedAt"], "2023-12-01T00:00:00.000Z");
        assert_eq!(json["outcome"], "complete-remission");
        assert_eq!(json["followUpMonths"], 18);
    }

    #[test]
    fn case_query_deserialises_camel_case_names() {
        let query: CaseQuery =
            serde_json::from_str(r#"{"cancerSubtype":"hodgkin-lymphoma","limit":"2"}"#).unwrap();
        let filter = query.filter();
        assert_eq!(filter.cancer_subtype.as_deref(), Some("hodgkin-lymphoma"));
        assert_eq!(query.limit.as_deref(), Some("2"));
    }
}
