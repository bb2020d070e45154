//! Bearer token extraction from an `Authorization` header value.

/// Why a request could not be authenticated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No usable `Authorization: Bearer` header was sent.
    #[error("Access token required")]
    MissingToken,
    /// A token was sent but names no live session.
    #[error("Invalid or expired token")]
    InvalidToken,
}

const BEARER_PREFIX: &str = "Bearer ";

/// Returns the token from an `Authorization` header value.
///
/// A header with another scheme, or with an empty token, counts as missing.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token_after_scheme() {
        assert_eq!(bearer_token(Some("Bearer abc-123")), Ok("abc-123"));
    }

    #[test]
    fn missing_or_foreign_scheme_is_missing_token() {
        assert_eq!(bearer_token(None), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("Basic Zm9vOmJhcg==")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("Bearer   ")), Err(AuthError::MissingToken));
    }
}
