//! Case service and related types.
//!
//! This module provides the facade the transports call: querying, ingesting and summarising
//! cases against an injected [`CaseStore`].

use crate::analytics::{self, AnalyticsRequest, AnalyticsSummary};
use crate::config::CoreConfig;
use crate::filter::CaseFilter;
use crate::identity::CallerIdentity;
use crate::ingest::{self, CaseSubmission};
use crate::pagination::PageRequest;
use crate::record::CaseRecord;
use crate::store::CaseStore;
use crate::CaseResult;
use oncora_uuid::IdGenerator;
use std::sync::Arc;

/// One window of a filtered case query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CasePage {
    pub cases: Vec<Arc<CaseRecord>>,
    /// Number of matches before windowing.
    pub total: usize,
    pub has_more: bool,
}

/// Pure case operations - no API concerns
#[derive(Clone)]
pub struct CaseService {
    store: Arc<dyn CaseStore>,
    ids: Arc<dyn IdGenerator>,
    cfg: Arc<CoreConfig>,
}

impl CaseService {
    /// Creates a new instance of CaseService.
    pub fn new(store: Arc<dyn CaseStore>, ids: Arc<dyn IdGenerator>, cfg: Arc<CoreConfig>) -> Self {
        Self { store, ids, cfg }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn store(&self) -> &dyn CaseStore {
        self.store.as_ref()
    }

    /// Filters the store and returns the requested window.
    ///
    /// An empty result is not an error. The caller identity is accepted for provenance and
    /// authorisation hooks; it does not narrow the results.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CaseError::Internal`] if the store cannot be read.
    pub fn query_cases(
        &self,
        caller: &CallerIdentity,
        filter: &CaseFilter,
        page: PageRequest,
    ) -> CaseResult<CasePage> {
        let snapshot = self.store.snapshot()?;
        let matches = filter.apply(&snapshot);
        let window = page.window(&matches);

        tracing::debug!(
            caller = %caller.id,
            total = window.total,
            returned = window.items.len(),
            "case query"
        );

        Ok(CasePage {
            cases: window.items,
            total: window.total,
            has_more: window.has_more,
        })
    }

    /// Validates `submission`, assigns identifiers and appends the new case.
    ///
    /// # Errors
    ///
    /// Returns a `CaseError` if:
    /// - the submission fails validation (the store is left unchanged),
    /// - the generated id collides with a stored case,
    /// - the store lock is poisoned.
    pub fn create_case(
        &self,
        submission: &CaseSubmission,
        caller: &CallerIdentity,
    ) -> CaseResult<Arc<CaseRecord>> {
        let record = ingest::ingest(submission, caller, self.ids.as_ref())?;
        let stored = self.store.append(record)?;

        tracing::info!(
            case = %stored.id,
            subtype = %stored.cancer_subtype,
            region = %stored.region,
            submitted_by = %stored.submitted_by,
            "case created"
        );
        Ok(stored)
    }

    /// Summarises the whole store.
    ///
    /// Two calls with no `create_case` between them return identical summaries.
    pub fn analytics(&self, request: &AnalyticsRequest) -> CaseResult<AnalyticsSummary> {
        let snapshot = self.store.snapshot()?;
        let summary = analytics::summarise(&snapshot, self.cfg.marker_vocabulary(), request);

        tracing::debug!(
            total = summary.total_cases,
            timeframe = %summary.timeframe,
            region = %summary.region,
            "analytics computed"
        );
        Ok(summary)
    }
}
