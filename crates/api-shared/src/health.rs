use crate::dto::HealthRes;

/// Simple health service behind `GET /api/health`
///
/// This service provides a standardised way to check the health status of the Oncora registry.
pub struct HealthService;

impl HealthService {
    /// Check health of the registry
    ///
    /// # Returns
    /// A `HealthRes` stamped with the current UTC time and the crate version.
    pub fn check_health() -> HealthRes {
        HealthRes {
            success: true,
            message: "Oncora registry API is running".into(),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_success_with_timestamp() {
        let res = HealthService::check_health();
        assert!(res.success);
        assert!(res.timestamp.ends_with('Z'));
        assert_eq!(res.version, env!("CARGO_PKG_VERSION"));
    }
}
