//! Demo lymphoma cases loaded at startup when `seed_demo_data` is enabled.

use crate::record::CaseRecord;
use crate::store::CaseStore;
use crate::{CaseError, CaseResult};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use oncora_types::{AgeRange, CancerSubtype, NonEmptyText, Outcome, Region, Sex};
use oncora_uuid::IdGenerator;

struct DemoCase {
    age_range: AgeRange,
    sex: Sex,
    cancer_subtype: CancerSubtype,
    genomic_variants: &'static str,
    treatments: &'static str,
    symptoms: &'static [&'static str],
    progression_notes: &'static str,
    admission_date: (i32, u32, u32),
    submitted_by: &'static str,
    submitted_on: (i32, u32, u32),
    region: Region,
    outcome: Outcome,
    follow_up_months: u32,
    resistance_flags: bool,
}

const DEMO_CASES: [DemoCase; 6] = [
    DemoCase {
        age_range: AgeRange::Forties,
        sex: Sex::Female,
        cancer_subtype: CancerSubtype::HodgkinLymphoma,
        genomic_variants: "CD30+ Reed-Sternberg cells, EBV positive, normal karyotype",
        treatments: "ABVD chemotherapy (6 cycles), achieved complete remission after 4 cycles",
        symptoms: &["enlarged-lymph-nodes", "fever", "night-sweats", "weight-loss"],
        progression_notes: "Excellent response to standard ABVD. PET-CT showed complete metabolic response. No recurrence at 18-month follow-up. Patient remains in remission.",
        admission_date: (2023, 6, 15),
        submitted_by: "dr-smith-001",
        submitted_on: (2023, 12, 1),
        region: Region::UsNortheast,
        outcome: Outcome::CompleteRemission,
        follow_up_months: 18,
        resistance_flags: false,
    },
    DemoCase {
        age_range: AgeRange::Sixties,
        sex: Sex::Male,
        cancer_subtype: CancerSubtype::DiffuseLargeBCell,
        genomic_variants: "MYC rearrangement t(8;14), BCL2 positive, p53 mutation detected",
        treatments: "R-CHOP chemotherapy (8 cycles), followed by autologous stem cell transplant, rituximab maintenance",
        symptoms: &["enlarged-lymph-nodes", "weight-loss", "fatigue", "abdominal-pain", "night-sweats"],
        progression_notes: "Initial partial response to R-CHOP due to high-risk cytogenetics. Post-transplant achieved complete remission. Currently on maintenance therapy with excellent tolerance.",
        admission_date: (2023, 3, 22),
        submitted_by: "dr-johnson-002",
        submitted_on: (2023, 11, 28),
        region: Region::UsWest,
        outcome: Outcome::CompleteRemission,
        follow_up_months: 12,
        resistance_flags: true,
    },
    DemoCase {
        age_range: AgeRange::Thirties,
        sex: Sex::Male,
        cancer_subtype: CancerSubtype::BurkittLymphoma,
        genomic_variants: "MYC translocation t(8;14), high Ki-67 proliferation index >95%, p53 wild type",
        treatments: "Intensive chemotherapy CODOX-M/IVAC protocol, CNS prophylaxis with high-dose methotrexate",
        symptoms: &["enlarged-lymph-nodes", "fever", "weight-loss", "abdominal-pain", "fatigue"],
        progression_notes: "Highly aggressive presentation with rapid doubling time. Excellent response to intensive protocol. Achieved complete remission after 2 cycles. Continues in remission.",
        admission_date: (2023, 8, 10),
        submitted_by: "dr-wilson-003",
        submitted_on: (2023, 12, 5),
        region: Region::Canada,
        outcome: Outcome::CompleteRemission,
        follow_up_months: 6,
        resistance_flags: false,
    },
    DemoCase {
        age_range: AgeRange::Fifties,
        sex: Sex::Female,
        cancer_subtype: CancerSubtype::FollicularLymphoma,
        genomic_variants: "BCL2 translocation t(14;18), grade 3A histology, CREBBP mutation",
        treatments: "R-bendamustine induction (6 cycles), rituximab maintenance therapy ongoing",
        symptoms: &["enlarged-lymph-nodes", "fatigue", "night-sweats"],
        progression_notes: "Indolent course with excellent response to bendamustine-rituximab. Currently on maintenance rituximab every 3 months. Disease remains stable.",
        admission_date: (2023, 5, 18),
        submitted_by: "dr-brown-004",
        submitted_on: (2023, 11, 30),
        region: Region::Uk,
        outcome: Outcome::PartialRemission,
        follow_up_months: 8,
        resistance_flags: false,
    },
    DemoCase {
        age_range: AgeRange::Twenties,
        sex: Sex::Female,
        cancer_subtype: CancerSubtype::HodgkinLymphoma,
        genomic_variants: "CD30+ Reed-Sternberg cells, EBV negative, mixed cellularity subtype",
        treatments: "ABVD chemotherapy (4 cycles), involved field radiation therapy (30 Gy)",
        symptoms: &["enlarged-lymph-nodes", "fever", "night-sweats", "itching"],
        progression_notes: "Early stage disease with B symptoms. Combined modality treatment resulted in complete response. Excellent long-term prognosis expected.",
        admission_date: (2023, 7, 12),
        submitted_by: "dr-garcia-005",
        submitted_on: (2023, 12, 10),
        region: Region::UsSoutheast,
        outcome: Outcome::CompleteRemission,
        follow_up_months: 5,
        resistance_flags: false,
    },
    DemoCase {
        age_range: AgeRange::Seventies,
        sex: Sex::Male,
        cancer_subtype: CancerSubtype::MantleCellLymphoma,
        genomic_variants: "Cyclin D1 overexpression, t(11;14) translocation, TP53 mutation",
        treatments: "R-CHOP chemotherapy (6 cycles), ibrutinib maintenance",
        symptoms: &["enlarged-lymph-nodes", "weight-loss", "fatigue", "bone-pain"],
        progression_notes: "Aggressive variant with TP53 mutation. Good initial response to R-CHOP. Started on ibrutinib maintenance due to high-risk features. Currently stable.",
        admission_date: (2023, 4, 28),
        submitted_by: "dr-lee-006",
        submitted_on: (2023, 12, 8),
        region: Region::AsiaPacific,
        outcome: Outcome::StableDisease,
        follow_up_months: 9,
        resistance_flags: true,
    },
];

fn date(field: &'static str, (y, m, d): (i32, u32, u32)) -> CaseResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| CaseError::Internal(format!("invalid demo {field}: {y}-{m}-{d}")))
}

/// Builds the six demo cases with fresh identifiers from `ids`.
pub fn demo_cases(ids: &dyn IdGenerator) -> CaseResult<Vec<CaseRecord>> {
    DEMO_CASES
        .iter()
        .map(|demo| {
            let submitted_on = date("submission date", demo.submitted_on)?;
            let submitted_at = Utc.from_utc_datetime(&submitted_on.and_time(NaiveTime::default()));
            let submitted_by = NonEmptyText::new(demo.submitted_by)
                .map_err(|e| CaseError::Internal(format!("invalid demo submitter: {e}")))?;

            Ok(CaseRecord {
                id: ids.next_case_id(),
                patient_id: ids.next_patient_pseudonym(),
                age_range: demo.age_range,
                sex: demo.sex,
                cancer_subtype: demo.cancer_subtype,
                genomic_variants: demo.genomic_variants.to_string(),
                treatments: demo.treatments.to_string(),
                symptoms: demo.symptoms.iter().map(|s| (*s).to_string()).collect(),
                progression_notes: demo.progression_notes.to_string(),
                admission_date: Some(date("admission date", demo.admission_date)?),
                submitted_by,
                submitted_at,
                region: demo.region,
                outcome: Some(demo.outcome),
                follow_up_months: demo.follow_up_months,
                resistance_flags: demo.resistance_flags,
            })
        })
        .collect()
}

/// Appends the demo cases to `store`, returning how many were loaded.
pub fn seed_store(store: &dyn CaseStore, ids: &dyn IdGenerator) -> CaseResult<usize> {
    let cases = demo_cases(ids)?;
    let count = cases.len();
    for case in cases {
        store.append(case)?;
    }
    tracing::info!("seeded {} demo lymphoma cases", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryCaseStore;
    use oncora_uuid::{RandomIdGenerator, SequentialIdGenerator};

    #[test]
    fn demo_cases_have_expected_shape() {
        let cases = demo_cases(&SequentialIdGenerator::new()).unwrap();
        assert_eq!(cases.len(), 6);

        let hodgkin = cases
            .iter()
            .filter(|c| c.cancer_subtype == CancerSubtype::HodgkinLymphoma)
            .count();
        let remission = cases.iter().filter(|c| c.is_remission()).count();
        assert_eq!(hodgkin, 2);
        assert_eq!(remission, 5);
    }

    #[test]
    fn demo_submission_timestamps_are_midnight_utc() {
        let cases = demo_cases(&SequentialIdGenerator::new()).unwrap();
        assert_eq!(cases[0].submitted_at.to_rfc3339(), "2023-12-01T00:00:00+00:00");
    }

    #[test]
    fn seeding_twice_with_random_ids_does_not_collide() {
        let store = InMemoryCaseStore::new();
        seed_store(&store, &RandomIdGenerator).unwrap();
        seed_store(&store, &RandomIdGenerator).unwrap();
        assert_eq!(store.len().unwrap(), 12);
    }

    #[test]
    fn seeding_twice_with_same_sequence_start_is_rejected() {
        let store = InMemoryCaseStore::new();
        seed_store(&store, &SequentialIdGenerator::new()).unwrap();
        let err = seed_store(&store, &SequentialIdGenerator::new()).expect_err("clash");
        assert!(matches!(err, CaseError::DuplicateCaseId(_)));
    }
}
