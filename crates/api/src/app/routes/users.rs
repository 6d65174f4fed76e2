use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use storefront_core::UserId;

use crate::app::dto::{UpdateUserRequest, UpdateUserResponse, UserView};
use crate::app::errors;
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::context::RequestIdentity;

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    _identity: RequestIdentity,
) -> Response {
    match services.auth.users().list_all() {
        Ok(users) => Json(users.iter().map(UserView::from).collect::<Vec<_>>()).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    _identity: RequestIdentity,
    Path(id): Path<String>,
) -> Response {
    let id: UserId = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match services.auth.users().find_by_id(id) {
        Ok(user) => Json(UserView::from(&user)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Admin edit; a new password is re-hashed before it is stored.
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Response {
    let id: UserId = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    let auth = services.auth.clone();
    let outcome =
        tokio::task::spawn_blocking(move || auth.update_account(id, body.name, body.email, body.password)).await;

    match outcome {
        Ok(Ok((user, password_changed))) => {
            tracing::info!(user_id = %user.id, password_changed, "user updated");
            Json(UpdateUserResponse::new(&user, password_changed)).into_response()
        }
        Ok(Err(e)) => errors::auth_error_to_response(e),
        Err(join) => {
            tracing::error!(error = %join, "user update task failed");
            errors::internal_error()
        }
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    identity: RequestIdentity,
    Path(id): Path<String>,
) -> Response {
    let id: UserId = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match services.auth.users().delete(id) {
        Ok(user) => {
            tracing::info!(user_id = %user.id, by = %identity.user_id(), "user deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
