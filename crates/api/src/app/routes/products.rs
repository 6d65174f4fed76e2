use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use storefront_core::ProductId;
use storefront_infra::{NewProduct, ProductChanges};

use crate::app::errors;
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::context::RequestIdentity;

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    _identity: RequestIdentity,
) -> Response {
    Json(services.products.list()).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    _identity: RequestIdentity,
    Path(id): Path<String>,
) -> Response {
    let id: ProductId = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match services.products.get(id) {
        Ok(product) => Json(product).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewProduct>,
) -> Response {
    match services.products.create(body) {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "product created");
            (StatusCode::CREATED, Json(product)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<ProductChanges>,
) -> Response {
    let id: ProductId = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match services.products.update(id, body) {
        Ok(product) => Json(product).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: ProductId = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match services.products.delete(id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
