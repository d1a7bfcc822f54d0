//! `/materials` routes. Every route answers GET and POST with an
//! [`Envelope`]; the optional JSON body carries the action parameters.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Extension, Path},
    routing::get,
};

use crate::app::envelope::Envelope;
use crate::app::facade::MaterialFacade;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_materials).post(list_materials))
        .route("/filter", get(filter_materials).post(filter_materials))
        .route("/create", get(create_material).post(create_material))
        .route("/available_types", get(available_types).post(available_types))
        .route("/suppliers", get(list_suppliers).post(list_suppliers))
        .route("/:id", get(get_material).post(get_material))
        .route("/:id/update", get(update_material).post(update_material))
        .route("/:id/delete", get(delete_material).post(delete_material))
}

pub async fn list_materials(
    Extension(facade): Extension<Arc<MaterialFacade>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Envelope {
    facade.list_materials(&principal).await
}

pub async fn filter_materials(
    Extension(facade): Extension<Arc<MaterialFacade>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Bytes,
) -> Envelope {
    facade.filter_materials(&principal, &body).await
}

pub async fn get_material(
    Extension(facade): Extension<Arc<MaterialFacade>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Envelope {
    facade.get_material(&principal, &id).await
}

pub async fn create_material(
    Extension(facade): Extension<Arc<MaterialFacade>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Bytes,
) -> Envelope {
    facade.create_material(&principal, &body).await
}

pub async fn update_material(
    Extension(facade): Extension<Arc<MaterialFacade>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> Envelope {
    facade.update_material(&principal, &id, &body).await
}

pub async fn delete_material(
    Extension(facade): Extension<Arc<MaterialFacade>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Envelope {
    facade.delete_material(&principal, &id).await
}

pub async fn available_types(
    Extension(facade): Extension<Arc<MaterialFacade>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Envelope {
    facade.available_types(&principal).await
}

pub async fn list_suppliers(
    Extension(facade): Extension<Arc<MaterialFacade>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Envelope {
    facade.list_suppliers(&principal).await
}
