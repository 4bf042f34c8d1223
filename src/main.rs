use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use auth_gate::user_handlers;
use auth_gate::{AppConfig, AuthEngine, InMemoryUserStore};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let config = AppConfig::from_env().map_err(|err| {
        error!(error = %err, "invalid configuration");
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    let addr = config.bind_addr();

    let store = InMemoryUserStore::seeded();
    if store.is_empty() {
        warn!("credential store is empty; every login will be rejected");
    } else {
        info!(users = store.len(), "credential store loaded");
    }

    let engine = web::Data::new(AuthEngine::new(Arc::new(store), &config.secret));

    info!("Listening on: {}", addr);
    info!("- Basic Auth: GET  /basic-auth");
    info!("- Login:      POST /login");
    info!("- Profile:    GET  /user/profile");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(engine.clone())
            .configure(user_handlers::configure)
    })
    .bind(addr)?
    .run()
    .await
}
