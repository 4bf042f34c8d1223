//! Error types for the authentication engine.
//!
//! All errors use `thiserror`. [`AuthError`] is what the engine hands back to
//! the HTTP layer; it also knows how to render itself as a response.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use actix_web_httpauth::headers::www_authenticate::basic::Basic;
use actix_web_httpauth::headers::www_authenticate::WwwAuthenticate;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Realm advertised in `WWW-Authenticate` challenges.
pub const BASIC_REALM: &str = "My API";

/// Why a token failed verification.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Not three dot-separated segments, or a segment failed to decode
    #[error("malformed token")]
    Malformed,

    /// Signature does not match header and claims
    #[error("bad signature")]
    BadSignature,

    /// Current time is past `exp`
    #[error("token expired")]
    Expired,
}

/// Authentication failures, recovered at the engine boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization: Basic ...` header
    #[error("Authentication required")]
    MissingAuth,

    /// Basic payload is not Base64 or not UTF-8
    #[error("Invalid authorization header")]
    MalformedEncoding,

    /// Decoded Basic payload has no `:`
    #[error("Invalid authorization header")]
    MalformedCredentials,

    /// Username/password did not match any user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No `Authorization: Bearer ...` header
    #[error("Token required")]
    MissingToken,

    /// Token verification failed. The subkind is kept for logs only.
    #[error("Invalid or expired token")]
    InvalidToken(TokenError),

    /// Signing a fresh token failed
    #[error("Failed to issue token")]
    IssueFailed,

    /// Token was valid but its user no longer exists
    #[error("User not found")]
    UserNotFound,
}

impl AuthError {
    /// Failures of the Basic scheme carry a challenge header.
    fn is_basic_challenge(&self) -> bool {
        matches!(
            self,
            AuthError::MissingAuth | AuthError::MalformedEncoding | AuthError::MalformedCredentials
        )
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::InvalidToken(err)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::IssueFailed => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if self.is_basic_challenge() {
            builder.insert_header(WwwAuthenticate(Basic::with_realm(BASIC_REALM)));
        }
        builder.json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Startup configuration errors. These are fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("signing secret is missing or empty")]
    MissingSecret,

    #[error("invalid port: {0}")]
    InvalidPort(String),
}
