use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use tracing::debug;

use crate::engine::AuthEngine;
use crate::error::AuthError;
use crate::extract::{authorization_header, BearerIdentity};
use crate::models::{
    BasicAuthResponse, ErrorResponse, LoginRequest, LoginResponse, ProfileResponse,
    ProtectedResponse, TokenClaims,
};

/// Register every route plus the JSON body error format.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse {
            error: err.to_string(),
        };
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(json_config)
        .service(health)
        .service(basic_auth)
        .service(login)
        .service(protected)
        .service(user_protected)
        .service(profile);
}

/// Simple health check
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

#[get("/basic-auth")]
pub async fn basic_auth(
    req: HttpRequest,
    engine: web::Data<AuthEngine>,
) -> Result<HttpResponse, AuthError> {
    debug!(
        peer = ?req.peer_addr(),
        user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-"),
        "basic auth request"
    );

    let username = engine.verify_basic(authorization_header(&req).as_deref())?;
    Ok(HttpResponse::Ok().json(BasicAuthResponse {
        authenticated: true,
        user: username,
        message: "Basic authentication succeeded",
    }))
}

#[post("/login")]
pub async fn login(
    data: web::Json<LoginRequest>,
    engine: web::Data<AuthEngine>,
) -> Result<HttpResponse, AuthError> {
    match engine.login(&data.username, &data.password) {
        Ok(issued) => Ok(HttpResponse::Ok().json(LoginResponse {
            token: issued.token,
            user: issued.user,
            message: "Login successful",
        })),
        Err(AuthError::InvalidCredentials) => {
            Ok(HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Invalid username or password".to_string(),
            }))
        }
        Err(err) => Err(err),
    }
}

fn protected_response(claims: TokenClaims) -> HttpResponse {
    HttpResponse::Ok().json(ProtectedResponse {
        authenticated: true,
        user: claims,
        message: "Bearer authentication succeeded",
        secret_data: "TOP SECRET DATA",
    })
}

#[get("/protected")]
pub async fn protected(BearerIdentity(claims): BearerIdentity) -> HttpResponse {
    protected_response(claims)
}

#[get("/user/protected")]
pub async fn user_protected(BearerIdentity(claims): BearerIdentity) -> HttpResponse {
    protected_response(claims)
}

#[get("/user/profile")]
pub async fn profile(
    BearerIdentity(claims): BearerIdentity,
    engine: web::Data<AuthEngine>,
) -> Result<HttpResponse, AuthError> {
    let user = engine.profile(&claims)?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(&user)))
}
