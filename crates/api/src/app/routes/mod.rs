use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::middleware::RouteGroup;

pub mod common;
pub mod orders;
pub mod products;
pub mod session;
pub mod system;
pub mod users;

/// Every route of the service, grouped by gate chain.
///
/// Groups may share a path as long as they do not share a method on it.
pub fn route_groups() -> Vec<RouteGroup> {
    vec![
        RouteGroup::new("public", public()),
        RouteGroup::new("home", Router::new().route("/", get(system::home))).authenticated(),
        RouteGroup::new("members", members()).authenticated(),
        RouteGroup::new("admin", admin()).authenticated().admin_only(),
    ]
}

fn public() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/user/register", post(session::register))
        .route("/api/user/register", post(session::register))
        .route("/user/login", post(session::sign_in))
        .route("/api/user/signin", post(session::sign_in))
        .route("/user/logout", get(session::sign_out))
}

/// Any signed-in caller.
fn members() -> Router {
    Router::new()
        .route("/api/users", get(users::list_users))
        .route("/api/users/:id", get(users::get_user))
        .route("/api/products", get(products::list_products))
        .route("/api/products/:id", get(products::get_product))
        .route("/api/order", post(orders::place_order).get(orders::list_own_orders))
}

fn admin() -> Router {
    Router::new()
        .route("/api/users/:id", put(users::update_user).delete(users::delete_user))
        .route("/api/products", post(products::create_product))
        .route(
            "/api/products/:id",
            put(products::update_product).delete(products::delete_product),
        )
        .route("/api/order/:order_id", get(orders::get_order).delete(orders::delete_order))
        .route("/api/order/:order_id/order_items", get(orders::get_order_items))
        .route(
            "/api/order/order_status/:order_id/:status",
            put(orders::set_order_status),
        )
        .route(
            "/api/order/order_items/:order_item_id",
            delete(orders::delete_order_item),
        )
}
