//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core services. Request
//! handling never reads process environment variables.
//!
//! The `*_from_env_value` helpers take the raw (optional) environment string so the parsing rules
//! can be tested without mutating the process environment.

use crate::analytics::MarkerVocabulary;
use crate::constants::{DEFAULT_MAX_PAGE_LIMIT, DEFAULT_PAGE_LIMIT, DEFAULT_SESSION_TTL_HOURS};
use crate::{CaseError, CaseResult};
use chrono::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    marker_vocabulary: MarkerVocabulary,
    default_page_limit: usize,
    max_page_limit: usize,
    seed_demo_data: bool,
    session_ttl: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Validation`] if:
    /// - `max_page_limit` is zero,
    /// - `default_page_limit` exceeds `max_page_limit`,
    /// - `session_ttl` is not positive.
    pub fn new(
        marker_vocabulary: MarkerVocabulary,
        default_page_limit: usize,
        max_page_limit: usize,
        seed_demo_data: bool,
        session_ttl: Duration,
    ) -> CaseResult<Self> {
        if max_page_limit == 0 {
            return Err(CaseError::Validation(
                "max page limit must be greater than zero".into(),
            ));
        }
        if default_page_limit > max_page_limit {
            return Err(CaseError::Validation(format!(
                "default page limit {} exceeds max page limit {}",
                default_page_limit, max_page_limit
            )));
        }
        if session_ttl <= Duration::zero() {
            return Err(CaseError::Validation(
                "session TTL must be positive".into(),
            ));
        }

        Ok(Self {
            marker_vocabulary,
            default_page_limit,
            max_page_limit,
            seed_demo_data,
            session_ttl,
        })
    }

    pub fn marker_vocabulary(&self) -> &MarkerVocabulary {
        &self.marker_vocabulary
    }

    pub fn default_page_limit(&self) -> usize {
        self.default_page_limit
    }

    pub fn max_page_limit(&self) -> usize {
        self.max_page_limit
    }

    pub fn seed_demo_data(&self) -> bool {
        self.seed_demo_data
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            marker_vocabulary: MarkerVocabulary::default(),
            default_page_limit: DEFAULT_PAGE_LIMIT,
            max_page_limit: DEFAULT_MAX_PAGE_LIMIT,
            seed_demo_data: true,
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the genomic marker vocabulary from an optional string value.
///
/// Accepts a comma-separated list where each entry is either `keyword` or `label=keyword`.
/// `None` or blank input yields the default vocabulary.
pub fn genomic_markers_from_env_value(value: Option<String>) -> CaseResult<MarkerVocabulary> {
    match non_blank(value) {
        Some(v) => MarkerVocabulary::parse_list(&v),
        None => Ok(MarkerVocabulary::default()),
    }
}

/// Parse a page limit from an optional string value, falling back to `default`.
pub fn page_limit_from_env_value(
    name: &str,
    value: Option<String>,
    default: usize,
) -> CaseResult<usize> {
    match non_blank(value) {
        Some(v) => v.parse::<usize>().map_err(|_| {
            CaseError::Validation(format!("{} must be a non-negative integer, got '{}'", name, v))
        }),
        None => Ok(default),
    }
}

/// Parse a boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`), falling back to `default`.
pub fn flag_from_env_value(name: &str, value: Option<String>, default: bool) -> CaseResult<bool> {
    let Some(v) = non_blank(value) else {
        return Ok(default);
    };
    match v.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(CaseError::Validation(format!(
            "{} must be a boolean, got '{}'",
            name, v
        ))),
    }
}

/// Parse the bearer session TTL in whole hours.
pub fn session_ttl_from_env_value(value: Option<String>) -> CaseResult<Duration> {
    match non_blank(value) {
        Some(v) => match v.parse::<i64>() {
            Ok(hours) if hours > 0 => Ok(Duration::hours(hours)),
            _ => Err(CaseError::Validation(format!(
                "session TTL must be a positive number of hours, got '{}'",
                v
            ))),
        },
        None => Ok(Duration::hours(DEFAULT_SESSION_TTL_HOURS)),
    }
}
