//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring (in-memory or Postgres)
//! - `facade.rs`: the material actions and their authorization
//! - `envelope.rs`: the single-key response envelope
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request parameter parsing

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use materials_auth::Hs256JwtValidator;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod envelope;
pub mod facade;
pub mod routes;
pub mod services;

pub use envelope::Envelope;
pub use facade::MaterialFacade;
pub use services::{AppServices, ServicesError, build_services};

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &ApiConfig) -> Result<Router, ServicesError> {
    let services = build_services(config).await?;
    Ok(build_router(&services, &config.jwt_secret))
}

/// Router over already-wired services.
pub fn build_router(services: &AppServices, jwt_secret: &str) -> Router {
    let jwt = Arc::new(Hs256JwtValidator::new(jwt_secret.as_bytes().to_vec()));
    let auth_state = middleware::AuthState { jwt };
    let facade = Arc::new(services.facade());

    // Protected routes: bearer token required.
    let protected = routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            ))
            .layer(Extension(facade)),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
