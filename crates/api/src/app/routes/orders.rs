use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use storefront_core::{DomainError, OrderId, OrderItemId};
use storefront_infra::{NewOrder, OrderStatus};

use crate::app::dto::PlaceOrderRequest;
use crate::app::errors;
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::context::RequestIdentity;

/// Place an order for the signed-in caller. Every item must name a known product.
pub async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    identity: RequestIdentity,
    Json(body): Json<PlaceOrderRequest>,
) -> Response {
    if let Some(missing) = body
        .items
        .iter()
        .find(|item| services.products.get(item.product_id).is_err())
    {
        return errors::domain_error_to_response(DomainError::validation(format!(
            "unknown product {}",
            missing.product_id
        )));
    }

    let new = NewOrder {
        user_id: identity.user_id(),
        items: body.items,
    };

    match services.orders.place(new) {
        Ok(order) => {
            tracing::info!(order_id = %order.id, user_id = %order.user_id, "order placed");
            (StatusCode::CREATED, Json(order)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_own_orders(
    Extension(services): Extension<Arc<AppServices>>,
    identity: RequestIdentity,
) -> Response {
    Json(services.orders.list_for_user(identity.user_id())).into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: OrderId = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match services.orders.get(id) {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_order_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: OrderId = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match services.orders.items(id) {
        Ok(items) => Json(items).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn set_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, status)): Path<(String, String)>,
) -> Response {
    let id: OrderId = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };
    let status: OrderStatus = match status.parse() {
        Ok(status) => status,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.orders.set_status(id, status) {
        Ok(order) => {
            tracing::info!(order_id = %order.id, status = ?order.status, "order status changed");
            Json(order).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: OrderId = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match services.orders.delete(id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_order_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: OrderItemId = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match services.orders.delete_item(id) {
        Ok(item) => {
            tracing::info!(order_id = %item.order_id, item_id = %item.id, "order item removed");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
