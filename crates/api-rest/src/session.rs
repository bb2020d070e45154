//! In-memory bearer sessions issued after practitioner verification.

use chrono::{DateTime, Duration, Utc};
use oncora_core::{CallerIdentity, CaseError, CaseResult};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Clone, Debug)]
struct Session {
    caller: CallerIdentity,
    expires_at: DateTime<Utc>,
}

/// Opaque token to caller mapping with a fixed lifetime per token.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

fn poisoned<T>(_: T) -> CaseError {
    CaseError::Internal("session registry lock poisoned".into())
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a fresh random token for `caller`.
    pub fn issue(&self, caller: CallerIdentity) -> CaseResult<String> {
        self.issue_at(caller, Utc::now())
    }

    fn issue_at(&self, caller: CallerIdentity, now: DateTime<Utc>) -> CaseResult<String> {
        let token = uuid::Uuid::new_v4().to_string();
        let session = Session {
            caller,
            expires_at: now + self.ttl,
        };
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(token.clone(), session);
        Ok(token)
    }

    /// Looks up a live session. `Ok(None)` means the token is unknown or expired.
    pub fn resolve(&self, token: &str) -> CaseResult<Option<CallerIdentity>> {
        self.resolve_at(token, Utc::now())
    }

    fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> CaseResult<Option<CallerIdentity>> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        Ok(sessions
            .get(token)
            .filter(|s| s.expires_at > now)
            .map(|s| s.caller.clone()))
    }

    pub fn len(&self) -> CaseResult<usize> {
        Ok(self.sessions.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> CaseResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncora_core::{NonEmptyText, Region};

    fn caller() -> CallerIdentity {
        CallerIdentity {
            id: NonEmptyText::new("dr-MD123456-1").unwrap(),
            region: Some(Region::Uk),
            verified: true,
        }
    }

    #[test]
    fn issued_token_resolves_to_caller() {
        let registry = SessionRegistry::new(Duration::hours(1));
        let token = registry.issue(caller()).unwrap();
        assert_eq!(registry.resolve(&token).unwrap(), Some(caller()));
        assert_eq!(registry.resolve("not-a-token").unwrap(), None);
    }

    #[test]
    fn tokens_expire_after_ttl() {
        let registry = SessionRegistry::new(Duration::hours(1));
        let issued = Utc::now();
        let token = registry.issue_at(caller(), issued).unwrap();

        let before = issued + Duration::minutes(59);
        let after = issued + Duration::hours(1);
        assert!(registry.resolve_at(&token, before).unwrap().is_some());
        assert!(registry.resolve_at(&token, after).unwrap().is_none());
    }

    #[test]
    fn issuing_drops_expired_sessions() {
        let registry = SessionRegistry::new(Duration::hours(1));
        let start = Utc::now();
        registry.issue_at(caller(), start).unwrap();
        registry
            .issue_at(caller(), start + Duration::hours(2))
            .unwrap();
        assert_eq!(registry.len().unwrap(), 1);
    }
}
