use axum::{Router, routing::get};

pub mod materials;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/materials", materials::router())
}
