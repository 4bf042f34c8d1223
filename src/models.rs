use serde::{Deserialize, Serialize};

/// A registered account. Passwords are kept in plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(id: i64, username: &str, password: &str) -> Self {
        Self {
            id,
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// The part of a [`User`] that may leave the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
}

/// A username/password pair pulled out of a `Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Identity snapshot carried inside a signed token.
///
/// Field names on the wire follow the usual compact-token conventions
/// (`iat`/`exp` as Unix seconds) so any standard verifier can read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub username: String,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub user: PublicUser,
    pub claims: TokenClaims,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct BasicAuthResponse {
    pub authenticated: bool,
    pub user: String,
    pub message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedResponse {
    pub authenticated: bool,
    pub user: TokenClaims,
    pub message: &'static str,
    pub secret_data: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: &'static str,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: format!("{}@example.com", user.username),
            created_at: "2025-01-01",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
