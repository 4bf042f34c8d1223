use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::{ConfigError, TokenError};
use crate::models::{TokenClaims, User};

/// Lifetime of every issued token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Symmetric key shared by the issuer and the verifier. Never empty.
#[derive(Clone)]
pub struct SigningSecret(String);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(Self(secret))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(**redacted**)")
    }
}

/// Signs HS256 compact tokens (`header.claims.signature`).
pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(
        &self,
        user: &User,
    ) -> Result<(String, TokenClaims), jsonwebtoken::errors::Error> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<(String, TokenClaims), jsonwebtoken::errors::Error> {
        let issued_at = now.timestamp();
        let claims = TokenClaims {
            user_id: user.id,
            username: user.username.clone(),
            issued_at,
            expires_at: issued_at + TOKEN_TTL_SECS,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.key)?;
        Ok((token, claims))
    }
}

/// Checks signature and expiry of tokens made by [`TokenIssuer`].
///
/// Claims are trusted as of issuance; no user lookup happens here.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        if token.split('.').count() != 3 {
            return Err(TokenError::Malformed);
        }

        // jsonwebtoken compares HMAC signatures in constant time.
        decode::<TokenClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }
}
