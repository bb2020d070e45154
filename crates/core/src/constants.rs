//! Constants used throughout the Oncora core crate.

/// Window size used when a query does not supply `limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Largest `limit` a query may request unless configured otherwise.
pub const DEFAULT_MAX_PAGE_LIMIT: usize = 500;

/// Genomic marker keywords scanned by the aggregator unless configured otherwise.
pub const DEFAULT_GENOMIC_MARKERS: [&str; 4] = ["myc", "bcl2", "p53", "cd30"];

/// Outcome substring counted towards the remission rate.
pub const REMISSION_KEYWORD: &str = "remission";

/// Timeframe echoed by analytics when the caller does not supply one.
pub const DEFAULT_ANALYTICS_TIMEFRAME: &str = "6months";

/// Region scope echoed by analytics when the caller does not supply one.
pub const DEFAULT_ANALYTICS_REGION: &str = "global";

/// Bearer session lifetime when not configured.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Minimum accepted length of a practitioner's medical id during verification.
pub const MIN_MEDICAL_ID_LEN: usize = 6;
