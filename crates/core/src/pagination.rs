//! Offset/limit windowing of filtered results.

use crate::config::CoreConfig;
use crate::{CaseError, CaseResult};

/// A validated offset/limit pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    offset: usize,
    limit: usize,
}

impl PageRequest {
    /// Builds a page request, rejecting a `limit` above the configured maximum.
    pub fn new(offset: usize, limit: usize, cfg: &CoreConfig) -> CaseResult<Self> {
        if limit > cfg.max_page_limit() {
            return Err(CaseError::Validation(format!(
                "limit must not exceed {}, got {}",
                cfg.max_page_limit(),
                limit
            )));
        }
        Ok(Self { offset, limit })
    }

    /// Parses raw query-string values.
    ///
    /// Absent values take the defaults (offset 0, the configured default limit). Present values
    /// must be plain non-negative integers: `"-1"`, `"ten"` and `"1.5"` are rejected rather than
    /// coerced.
    pub fn parse(offset: Option<&str>, limit: Option<&str>, cfg: &CoreConfig) -> CaseResult<Self> {
        let offset = match offset {
            Some(raw) => parse_non_negative("offset", raw)?,
            None => 0,
        };
        let limit = match limit {
            Some(raw) => parse_non_negative("limit", raw)?,
            None => cfg.default_page_limit(),
        };
        Self::new(offset, limit, cfg)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Slices `items` to `[offset, offset + limit)` clipped to bounds.
    pub fn window<T: Clone>(&self, items: &[T]) -> Page<T> {
        let total = items.len();
        let end_requested = self.offset.saturating_add(self.limit);
        let start = self.offset.min(total);
        let end = end_requested.min(total);

        Page {
            items: items[start..end].to_vec(),
            total,
            has_more: end_requested < total,
        }
    }
}

fn parse_non_negative(name: &str, raw: &str) -> CaseResult<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CaseError::Validation(format!(
            "{} must be a non-negative integer, got '{}'",
            name, raw
        )));
    }
    trimmed
        .parse::<usize>()
        .map_err(|_| CaseError::Validation(format!("{} is out of range: '{}'", name, raw)))
}

/// One window of a result set plus the size of the whole set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the sequence before windowing.
    pub total: usize,
    pub has_more: bool,
}
