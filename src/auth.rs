//! Session token issuance and verification.
//!
//! Provides:
//! - `Claims`: the signed payload identifying an authenticated user
//! - `issue_token` / `verify_token`: the token service proper
//! - `authenticate_request`: Authorization header handling for callers
//! - `AuthUser`: extractor for routes that require authentication
//!
//! Tokens are HS256 JWTs signed with the shared `JWT_SECRET`. Validity is
//! exactly: the signature verifies, and `exp` is strictly in the future.
//! Expiry is compared against the verifier's local clock with no leeway, so
//! clock skew between issuer and verifier is a known limitation. Rotating
//! the secret invalidates every outstanding token with no grace period.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{BEARER_PREFIX, TOKEN_TTL_SECS};
use crate::error::AppError;
use crate::state::AppState;

/// Claims carried in every issued session token.
///
/// Field names are part of the wire format and match the original token
/// payload, so existing clients keep working.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the authenticated user
    pub user_id: String,
    /// Username at issuance time
    pub username: String,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Token verification failures, surfaced as 401 by any route that wires
/// authentication in.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header required")]
    MissingCredentials,

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,
}

/// Issue a session token for an already-authenticated user.
///
/// The token expires 24 hours after issuance. Callers must pass non-empty
/// identifiers and are responsible for having authenticated the user first;
/// this function performs no authorization checks of its own.
pub fn issue_token(secret: &str, user_id: &str, username: &str) -> Result<String, AppError> {
    issue_token_at(secret, user_id, username, SystemTime::now())
}

/// Issue a token with an explicit issuance instant.
///
/// Split out from [`issue_token`] so expiry behavior is testable without a
/// real 24-hour wait.
fn issue_token_at(
    secret: &str,
    user_id: &str,
    username: &str,
    issued_at: SystemTime,
) -> Result<String, AppError> {
    let now = issued_at
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::Internal("System clock is before the Unix epoch".to_string()))?
        .as_secs() as i64;

    let claims = Claims {
        user_id: user_id.to_string(),
        username: username.to_string(),
        exp: now + TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to encode token: {e}")))
}

/// Verify a token and return its claims.
///
/// Errors:
/// - [`AuthError::Expired`] when `exp` has passed
/// - [`AuthError::InvalidSignature`] on signature mismatch (tampered token
///   or wrong secret)
/// - [`AuthError::Malformed`] when the token cannot be parsed as a claims
///   structure
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // No clock-skew allowance
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    // The decoder accepts a token whose exp equals the current second;
    // validity requires exp strictly in the future
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    if claims.exp <= now {
        return Err(AuthError::Expired);
    }

    Ok(claims)
}

/// Authenticate a request from its Authorization header value.
///
/// Fails with [`AuthError::MissingCredentials`] when the header is absent or
/// does not carry a bearer token, otherwise delegates to [`verify_token`].
pub fn authenticate_request(
    auth_header: Option<&str>,
    secret: &str,
) -> Result<Claims, AuthError> {
    let token = auth_header
        .and_then(|h| h.strip_prefix(BEARER_PREFIX))
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingCredentials)?;

    verify_token(secret, token)
}

/// Extractor for routes that require an authenticated user.
///
/// No current route declares this; it is the integration point for any
/// future protected endpoint:
///
/// ```ignore
/// async fn me(AuthUser(claims): AuthUser) -> Json<Claims> { Json(claims) }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let claims = authenticate_request(header, &state.config.jwt_secret)?;
        Ok(Self(claims))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const SECRET: &str = "test-secret-not-for-production";

    #[test]
    fn issue_and_verify_round_trip() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;

        let token = issue_token(SECRET, "user-42", "ada").unwrap();
        let claims = verify_token(SECRET, &token).unwrap();

        assert_eq!(claims.user_id, "user-42");
        assert_eq!(claims.username, "ada");
        // exp is 24 hours ahead of issuance, allowing for test runtime
        assert!(claims.exp >= before + TOKEN_TTL_SECS);
        assert!(claims.exp <= before + TOKEN_TTL_SECS + 5);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let token = issue_token(SECRET, "user-42", "ada").unwrap();

        // Flip the last character of the signature segment
        let mut tampered: String = token[..token.len() - 1].to_string();
        let last = token.chars().last().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(
            verify_token(SECRET, &tampered),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token("secret-a", "user-42", "ada").unwrap();
        assert_eq!(
            verify_token("secret-b", &token),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        // Issued more than a full token lifetime ago
        let issued_at =
            SystemTime::now() - Duration::from_secs(TOKEN_TTL_SECS as u64 + 60);
        let token = issue_token_at(SECRET, "user-42", "ada", issued_at).unwrap();

        assert_eq!(verify_token(SECRET, &token), Err(AuthError::Expired));
    }

    #[test]
    fn token_expiring_exactly_now_is_rejected() {
        // exp lands on the current second; strictly-in-the-future means
        // this is already expired
        let issued_at = SystemTime::now() - Duration::from_secs(TOKEN_TTL_SECS as u64);
        let token = issue_token_at(SECRET, "user-42", "ada", issued_at).unwrap();

        assert_eq!(verify_token(SECRET, &token), Err(AuthError::Expired));
    }

    #[test]
    fn garbage_token_is_malformed() {
        assert_eq!(
            verify_token(SECRET, "not-a-token"),
            Err(AuthError::Malformed)
        );
        assert_eq!(verify_token(SECRET, ""), Err(AuthError::Malformed));
    }

    #[test]
    fn missing_authorization_header() {
        assert_eq!(
            authenticate_request(None, SECRET),
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            authenticate_request(Some("Basic dXNlcjpwYXNz"), SECRET),
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            authenticate_request(Some("Bearer "), SECRET),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn bearer_token_matches_direct_verification() {
        let token = issue_token(SECRET, "user-42", "ada").unwrap();
        let header = format!("Bearer {token}");

        let via_header = authenticate_request(Some(&header), SECRET).unwrap();
        let direct = verify_token(SECRET, &token).unwrap();

        assert_eq!(via_header.user_id, direct.user_id);
        assert_eq!(via_header.username, direct.username);
        assert_eq!(via_header.exp, direct.exp);
    }
}
