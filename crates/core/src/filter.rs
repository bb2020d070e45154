//! Filter engine: composes independent clauses into one pass over a store snapshot.
//!
//! | clause | rule |
//! |---|---|
//! | `cancer_subtype` | exact, case-sensitive equality with the canonical subtype string |
//! | `region` | exact equality |
//! | `age_range` | exact equality |
//! | `genomic_marker` | case-insensitive substring of `genomic_variants` |
//! | `search` | case-insensitive substring of any of subtype, variants, treatments, notes |
//!
//! Clauses are ANDed. `None` means "no constraint"; `Some("")` is a real constraint, so an empty
//! exact clause matches nothing while an empty substring clause matches everything. Values that
//! name no known category simply match nothing.

use crate::record::CaseRecord;
use std::sync::Arc;

/// Optional filter clauses as supplied by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseFilter {
    pub cancer_subtype: Option<String>,
    pub region: Option<String>,
    pub age_range: Option<String>,
    pub genomic_marker: Option<String>,
    pub search: Option<String>,
}

impl CaseFilter {
    pub fn is_unconstrained(&self) -> bool {
        self.cancer_subtype.is_none()
            && self.region.is_none()
            && self.age_range.is_none()
            && self.genomic_marker.is_none()
            && self.search.is_none()
    }

    /// Lower-cases the text clauses once so matching does not repeat it per record.
    pub fn compile(&self) -> CompiledFilter<'_> {
        CompiledFilter {
            cancer_subtype: self.cancer_subtype.as_deref(),
            region: self.region.as_deref(),
            age_range: self.age_range.as_deref(),
            genomic_marker: self.genomic_marker.as_deref().map(str::to_lowercase),
            search: self.search.as_deref().map(str::to_lowercase),
        }
    }

    /// Returns the records matching every clause, in their original order.
    pub fn apply(&self, records: &[Arc<CaseRecord>]) -> Vec<Arc<CaseRecord>> {
        if self.is_unconstrained() {
            return records.to_vec();
        }
        let compiled = self.compile();
        records
            .iter()
            .filter(|record| compiled.matches(record))
            .cloned()
            .collect()
    }
}

/// A [`CaseFilter`] with its text clauses pre-lowered.
#[derive(Debug)]
pub struct CompiledFilter<'a> {
    cancer_subtype: Option<&'a str>,
    region: Option<&'a str>,
    age_range: Option<&'a str>,
    genomic_marker: Option<String>,
    search: Option<String>,
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

impl CompiledFilter<'_> {
    pub fn matches(&self, record: &CaseRecord) -> bool {
        if let Some(subtype) = self.cancer_subtype {
            if record.cancer_subtype.as_str() != subtype {
                return false;
            }
        }
        if let Some(region) = self.region {
            if record.region.as_str() != region {
                return false;
            }
        }
        if let Some(age_range) = self.age_range {
            if record.age_range.as_str() != age_range {
                return false;
            }
        }
        if let Some(marker) = self.genomic_marker.as_deref() {
            if !contains_ci(&record.genomic_variants, marker) {
                return false;
            }
        }
        if let Some(term) = self.search.as_deref() {
            let hit = contains_ci(record.cancer_subtype.as_str(), term)
                || contains_ci(&record.genomic_variants, term)
                || contains_ci(&record.treatments, term)
                || contains_ci(&record.progression_notes, term);
            if !hit {
                return false;
            }
        }
        true
    }
}
