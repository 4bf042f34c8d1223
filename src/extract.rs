use std::borrow::Cow;
use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::error::ErrorInternalServerError;
use actix_web::http::header;
use actix_web::{web, Error, FromRequest, HttpRequest};

use crate::engine::AuthEngine;
use crate::models::TokenClaims;

/// Raw `Authorization` value, if present.
///
/// Non-UTF-8 bytes are replaced rather than dropped, so a header with a known
/// scheme but a garbled payload still fails at the decode step.
pub fn authorization_header(req: &HttpRequest) -> Option<Cow<'_, str>> {
    req.headers()
        .get(header::AUTHORIZATION)
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
}

/// Claims of a verified bearer token.
///
/// Handlers that take this argument only run for requests carrying a valid
/// `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct BearerIdentity(pub TokenClaims);

impl FromRequest for BearerIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(verify_request(req))
    }
}

fn verify_request(req: &HttpRequest) -> Result<BearerIdentity, Error> {
    let engine = req
        .app_data::<web::Data<AuthEngine>>()
        .ok_or_else(|| ErrorInternalServerError("authentication engine not configured"))?;

    let claims = engine.verify_bearer(authorization_header(req).as_deref())?;
    Ok(BearerIdentity(claims))
}
