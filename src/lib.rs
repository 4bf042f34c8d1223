//! HTTP Basic and bearer-token authentication.
//!
//! [`engine::AuthEngine`] verifies Basic credentials, issues signed one-hour
//! tokens on login and verifies them on later requests. The actix-web layer in
//! [`user_handlers`] renders its results as HTTP responses.

pub mod auth;
pub mod basic;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod extract;
pub mod models;
pub mod user_handlers;

pub use auth::{SigningSecret, TokenIssuer, TokenVerifier, TOKEN_TTL_SECS};
pub use config::AppConfig;
pub use db::{CredentialStore, InMemoryUserStore};
pub use engine::AuthEngine;
pub use error::{AuthError, ConfigError, TokenError};
