//! Aggregate analytics over the whole record store.
//!
//! All statistics are accumulated in one traversal. Analytics are global: the requested
//! `timeframe` and `region` are echoed back but do not narrow the record set.

use crate::constants::{
    DEFAULT_ANALYTICS_REGION, DEFAULT_ANALYTICS_TIMEFRAME, DEFAULT_GENOMIC_MARKERS,
};
use crate::record::CaseRecord;
use crate::{CaseError, CaseResult};
use oncora_types::{CancerSubtype, Region};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// One counter in the marker vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenomicMarker {
    label: String,
    keyword: String,
}

impl GenomicMarker {
    /// Creates a marker; the keyword is lower-cased since matching is against lower-cased text.
    pub fn new(label: impl AsRef<str>, keyword: impl AsRef<str>) -> CaseResult<Self> {
        let label = label.as_ref().trim();
        let keyword = keyword.as_ref().trim().to_lowercase();
        if label.is_empty() || keyword.is_empty() {
            return Err(CaseError::Validation(
                "genomic marker label and keyword cannot be empty".into(),
            ));
        }
        Ok(Self {
            label: label.to_string(),
            keyword,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }
}

/// The closed set of marker keywords the aggregator scans for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerVocabulary {
    markers: Vec<GenomicMarker>,
}

impl MarkerVocabulary {
    /// # Errors
    ///
    /// Returns [`CaseError::Validation`] for an empty vocabulary or a repeated label.
    pub fn new(markers: Vec<GenomicMarker>) -> CaseResult<Self> {
        if markers.is_empty() {
            return Err(CaseError::Validation(
                "genomic marker vocabulary cannot be empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        for marker in &markers {
            if !seen.insert(marker.label.as_str()) {
                return Err(CaseError::Validation(format!(
                    "duplicate genomic marker label: '{}'",
                    marker.label
                )));
            }
        }
        Ok(Self { markers })
    }

    /// Parses `keyword` or `label=keyword` entries separated by commas.
    pub fn parse_list(input: &str) -> CaseResult<Self> {
        let markers = input
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once('=') {
                Some((label, keyword)) => GenomicMarker::new(label.to_lowercase(), keyword),
                None => GenomicMarker::new(entry.to_lowercase(), entry),
            })
            .collect::<CaseResult<Vec<_>>>()?;
        Self::new(markers)
    }

    pub fn markers(&self) -> &[GenomicMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for MarkerVocabulary {
    fn default() -> Self {
        Self {
            markers: DEFAULT_GENOMIC_MARKERS
                .iter()
                .map(|k| GenomicMarker {
                    label: (*k).to_string(),
                    keyword: (*k).to_string(),
                })
                .collect(),
        }
    }
}

/// Parameters accepted by the analytics operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsRequest {
    pub timeframe: String,
    pub region: String,
}

impl AnalyticsRequest {
    pub fn new(timeframe: Option<String>, region: Option<String>) -> Self {
        Self {
            timeframe: timeframe
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ANALYTICS_TIMEFRAME.to_string()),
            region: region
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ANALYTICS_REGION.to_string()),
        }
    }
}

impl Default for AnalyticsRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub total_cases: usize,
    /// Whole-number percentage in `0..=100`.
    pub remission_rate: u32,
    pub cancer_type_distribution: BTreeMap<CancerSubtype, usize>,
    pub regional_distribution: BTreeMap<Region, usize>,
    /// Marker label to number of cases mentioning it. Markers with no hits are absent.
    pub genomic_variants: BTreeMap<String, usize>,
    pub timeframe: String,
    pub region: String,
}

/// Reduces `records` to an [`AnalyticsSummary`] in a single pass.
pub fn summarise(
    records: &[Arc<CaseRecord>],
    vocabulary: &MarkerVocabulary,
    request: &AnalyticsRequest,
) -> AnalyticsSummary {
    let mut remissions = 0usize;
    let mut cancer_type_distribution = BTreeMap::new();
    let mut regional_distribution = BTreeMap::new();
    let mut genomic_variants: BTreeMap<String, usize> = BTreeMap::new();

    for record in records {
        if record.is_remission() {
            remissions += 1;
        }
        *cancer_type_distribution
            .entry(record.cancer_subtype)
            .or_insert(0) += 1;
        *regional_distribution.entry(record.region).or_insert(0) += 1;

        let variants = record.genomic_variants.to_lowercase();
        for marker in vocabulary.markers() {
            if variants.contains(marker.keyword()) {
                *genomic_variants.entry(marker.label().to_string()).or_insert(0) += 1;
            }
        }
    }

    let total_cases = records.len();
    AnalyticsSummary {
        total_cases,
        remission_rate: rounded_percentage(remissions, total_cases),
        cancer_type_distribution,
        regional_distribution,
        genomic_variants,
        timeframe: request.timeframe.clone(),
        region: request.region.clone(),
    }
}

/// `round(part / whole * 100)` with halves rounded up; `0` when `whole` is zero.
fn rounded_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = (part as u128 * 100 + whole as u128 / 2) / whole as u128;
    scaled.min(100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_cases;
    use oncora_types::Outcome;
    use oncora_uuid::SequentialIdGenerator;
    use proptest::prelude::*;

    fn seeded() -> Vec<Arc<CaseRecord>> {
        demo_cases(&SequentialIdGenerator::new())
            .unwrap()
            .into_iter()
            .map(Arc::new)
            .collect()
    }

    #[test]
    fn seeded_store_summary() {
        let summary = summarise(
            &seeded(),
            &MarkerVocabulary::default(),
            &AnalyticsRequest::default(),
        );

        assert_eq!(summary.total_cases, 6);
        assert_eq!(summary.remission_rate, 83);
        assert_eq!(
            summary.cancer_type_distribution[&CancerSubtype::HodgkinLymphoma],
            2
        );
        assert_eq!(summary.regional_distribution.len(), 6);
        assert_eq!(summary.timeframe, "6months");
        assert_eq!(summary.region, "global");
    }

    #[test]
    fn seeded_marker_counts() {
        let summary = summarise(
            &seeded(),
            &MarkerVocabulary::default(),
            &AnalyticsRequest::default(),
        );
        let expected: BTreeMap<String, usize> = [("bcl2", 2), ("cd30", 2), ("myc", 2), ("p53", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(summary.genomic_variants, expected);
    }

    #[test]
    fn empty_store_has_zero_rate() {
        let summary = summarise(&[], &MarkerVocabulary::default(), &AnalyticsRequest::default());
        assert_eq!(summary.total_cases, 0);
        assert_eq!(summary.remission_rate, 0);
        assert!(summary.cancer_type_distribution.is_empty());
        assert!(summary.genomic_variants.is_empty());
    }

    #[test]
    fn subtype_distribution_partitions_cases() {
        let records = seeded();
        let summary = summarise(
            &records,
            &MarkerVocabulary::default(),
            &AnalyticsRequest::default(),
        );
        let subtype_sum: usize = summary.cancer_type_distribution.values().sum();
        let region_sum: usize = summary.regional_distribution.values().sum();
        assert_eq!(subtype_sum, summary.total_cases);
        assert_eq!(region_sum, summary.total_cases);
    }

    #[test]
    fn missing_outcome_never_counts_as_remission() {
        let mut records = demo_cases(&SequentialIdGenerator::new()).unwrap();
        for record in &mut records {
            record.outcome = None;
        }
        let records: Vec<_> = records.into_iter().map(Arc::new).collect();
        let summary = summarise(
            &records,
            &MarkerVocabulary::default(),
            &AnalyticsRequest::default(),
        );
        assert_eq!(summary.remission_rate, 0);
    }

    #[test]
    fn custom_vocabulary_replaces_defaults() {
        let vocab = MarkerVocabulary::parse_list("ebv,tp53=tp53").unwrap();
        let summary = summarise(&seeded(), &vocab, &AnalyticsRequest::default());
        let keys: Vec<&str> = summary.genomic_variants.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ebv", "tp53"]);
        assert_eq!(summary.genomic_variants["ebv"], 2);
        assert_eq!(summary.genomic_variants["tp53"], 1);
    }

    #[test]
    fn request_parameters_are_echoed_not_applied() {
        let request = AnalyticsRequest::new(Some("1year".into()), Some("us-west".into()));
        let summary = summarise(&seeded(), &MarkerVocabulary::default(), &request);
        assert_eq!(summary.total_cases, 6);
        assert_eq!(summary.timeframe, "1year");
        assert_eq!(summary.region, "us-west");
    }

    #[test]
    fn vocabulary_rejects_duplicates_and_empty() {
        assert!(MarkerVocabulary::parse_list("myc,MYC").is_err());
        assert!(MarkerVocabulary::parse_list(" , ").is_err());
        assert!(MarkerVocabulary::parse_list("label=").is_err());
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(rounded_percentage(5, 6), 83);
        assert_eq!(rounded_percentage(1, 8), 13);
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(4, 4), 100);
    }

    fn outcome() -> impl Strategy<Value = Option<Outcome>> {
        prop::option::of(prop::sample::select(Outcome::ALL.to_vec()))
    }

    fn with_outcomes(outcomes: &[(Option<Outcome>, usize)]) -> Vec<Arc<CaseRecord>> {
        let templates = demo_cases(&SequentialIdGenerator::new()).unwrap();
        outcomes
            .iter()
            .enumerate()
            .map(|(i, (outcome, subtype))| {
                let mut record = templates[i % templates.len()].clone();
                record.outcome = *outcome;
                record.cancer_subtype = CancerSubtype::ALL[*subtype];
                Arc::new(record)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn percentage_stays_within_bounds(whole in 0usize..10_000, numerator in 0usize..10_000) {
            let part = if whole == 0 { 0 } else { numerator % (whole + 1) };
            let pct = rounded_percentage(part, whole);
            prop_assert!(pct <= 100);
            if whole > 0 && part == whole {
                prop_assert_eq!(pct, 100);
            }
            if part == 0 {
                prop_assert_eq!(pct, 0);
            }
        }

        #[test]
        fn remission_rate_bounded_for_any_outcome_mix(
            outcomes in prop::collection::vec((outcome(), 0usize..CancerSubtype::ALL.len()), 0..40),
        ) {
            let records = with_outcomes(&outcomes);
            let summary = summarise(
                &records,
                &MarkerVocabulary::default(),
                &AnalyticsRequest::default(),
            );

            prop_assert_eq!(summary.total_cases, outcomes.len());
            prop_assert!(summary.remission_rate <= 100);

            let remissions = records.iter().filter(|r| r.is_remission()).count();
            if remissions == 0 {
                prop_assert_eq!(summary.remission_rate, 0);
            }
            if !records.is_empty() && remissions == records.len() {
                prop_assert_eq!(summary.remission_rate, 100);
            }

            let subtype_sum: usize = summary.cancer_type_distribution.values().sum();
            prop_assert_eq!(subtype_sum, summary.total_cases);
        }
    }
}
