//! The authentication engine: Basic verification, login and bearer checks.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::auth::{SigningSecret, TokenIssuer, TokenVerifier};
use crate::basic::parse_basic_header;
use crate::db::CredentialStore;
use crate::error::AuthError;
use crate::models::{IssuedToken, TokenClaims, User};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Stateless request/response mappings over a user store and a signing key.
///
/// Built once at startup and shared by every worker.
pub struct AuthEngine {
    store: Arc<dyn CredentialStore>,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl AuthEngine {
    pub fn new(store: Arc<dyn CredentialStore>, secret: &SigningSecret) -> Self {
        Self {
            store,
            issuer: TokenIssuer::new(secret),
            verifier: TokenVerifier::new(secret),
        }
    }

    /// Check an `Authorization: Basic ...` value against the store.
    ///
    /// Returns the authenticated username.
    pub fn verify_basic(&self, auth_header: Option<&str>) -> Result<String, AuthError> {
        let creds = parse_basic_header(auth_header).inspect_err(|err| {
            debug!(reason = ?err, "basic auth header rejected");
        })?;

        match self
            .store
            .find_by_credentials(&creds.username, &creds.password)
        {
            Some(user) => {
                debug!(user_id = user.id, "basic auth succeeded");
                Ok(user.username)
            }
            None => {
                warn!(username = %creds.username, "basic auth: invalid credentials");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Verify a username/password pair and issue a token for it.
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let user = self
            .store
            .find_by_credentials(username, password)
            .ok_or_else(|| {
                warn!(%username, "login: invalid credentials");
                AuthError::InvalidCredentials
            })?;

        let (token, claims) = self.issuer.issue(&user).map_err(|err| {
            error!(user_id = user.id, error = %err, "failed to sign token");
            AuthError::IssueFailed
        })?;

        info!(user_id = user.id, expires_at = claims.expires_at, "token issued");
        Ok(IssuedToken {
            token,
            user: user.public(),
            claims,
        })
    }

    /// Check an `Authorization: Bearer ...` value and recover its claims.
    ///
    /// The token failure kind is logged here and kept inside
    /// [`AuthError::InvalidToken`], but it renders as one generic message.
    pub fn verify_bearer(&self, auth_header: Option<&str>) -> Result<TokenClaims, AuthError> {
        let token = auth_header
            .and_then(|h| h.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthError::MissingToken)?;

        self.verifier.verify(token).map_err(|err| {
            debug!(reason = %err, "bearer token rejected");
            AuthError::from(err)
        })
    }

    /// Current user record for verified claims.
    pub fn profile(&self, claims: &TokenClaims) -> Result<User, AuthError> {
        self.store.find_by_id(claims.user_id).ok_or_else(|| {
            warn!(user_id = claims.user_id, "token refers to unknown user");
            AuthError::UserNotFound
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryUserStore;
    use crate::error::TokenError;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use chrono::{Duration, Utc};

    fn secret() -> SigningSecret {
        SigningSecret::new("engine-test-secret").unwrap()
    }

    fn engine() -> AuthEngine {
        AuthEngine::new(Arc::new(InMemoryUserStore::seeded()), &secret())
    }

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn verify_basic_accepts_registered_user() {
        let header = basic("testuser:testpass");
        assert_eq!(engine().verify_basic(Some(&header)).unwrap(), "testuser");
    }

    #[test]
    fn verify_basic_rejects_wrong_password() {
        let header = basic("testuser:wrongpass");
        assert_eq!(
            engine().verify_basic(Some(&header)),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn verify_basic_propagates_parse_failures() {
        let engine = engine();
        assert_eq!(engine.verify_basic(None), Err(AuthError::MissingAuth));
        assert_eq!(
            engine.verify_basic(Some("Basic !!!")),
            Err(AuthError::MalformedEncoding)
        );
        assert_eq!(
            engine.verify_basic(Some(&basic("testuser"))),
            Err(AuthError::MalformedCredentials)
        );
    }

    #[test]
    fn login_then_bearer_for_every_user() {
        let engine = engine();
        for (id, username, password) in [(1, "testuser", "testpass"), (2, "admin", "admin123")] {
            let issued = engine.login(username, password).unwrap();
            assert_eq!(issued.user.id, id);
            assert_eq!(issued.user.username, username);

            let header = format!("Bearer {}", issued.token);
            let claims = engine.verify_bearer(Some(&header)).unwrap();
            assert_eq!(claims.user_id, id);
            assert_eq!(claims.username, username);
            assert_eq!(claims, issued.claims);
        }
    }

    #[test]
    fn login_with_wrong_password_issues_nothing() {
        assert!(matches!(
            engine().login("admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn verify_bearer_requires_prefix() {
        let engine = engine();
        let issued = engine.login("admin", "admin123").unwrap();

        assert_eq!(engine.verify_bearer(None), Err(AuthError::MissingToken));
        assert_eq!(
            engine.verify_bearer(Some(&issued.token)),
            Err(AuthError::MissingToken)
        );
        assert_eq!(
            engine.verify_bearer(Some(&format!("bearer {}", issued.token))),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn verify_bearer_keeps_failure_kind() {
        let engine = engine();
        assert_eq!(
            engine.verify_bearer(Some("Bearer not-a-token")),
            Err(AuthError::InvalidToken(TokenError::Malformed))
        );

        let user = User::new(1, "testuser", "testpass");
        let (stale, _) = TokenIssuer::new(&secret())
            .issue_at(&user, Utc::now() - Duration::hours(3))
            .unwrap();
        assert_eq!(
            engine.verify_bearer(Some(&format!("Bearer {stale}"))),
            Err(AuthError::InvalidToken(TokenError::Expired))
        );

        let foreign = SigningSecret::new("someone-else").unwrap();
        let (forged, _) = TokenIssuer::new(&foreign).issue(&user).unwrap();
        assert_eq!(
            engine.verify_bearer(Some(&format!("Bearer {forged}"))),
            Err(AuthError::InvalidToken(TokenError::BadSignature))
        );
    }

    #[test]
    fn profile_uses_claims_user_id() {
        let engine = engine();
        let issued = engine.login("testuser", "testpass").unwrap();
        let user = engine.profile(&issued.claims).unwrap();
        assert_eq!(user.username, "testuser");
    }

    #[test]
    fn profile_of_vanished_user() {
        // Token signed by this engine's key for a user the store does not hold.
        let engine = engine();
        let ghost = User::new(99, "ghost", "boo");
        let (_, claims) = TokenIssuer::new(&secret()).issue(&ghost).unwrap();
        assert_eq!(engine.profile(&claims), Err(AuthError::UserNotFound));
    }
}
