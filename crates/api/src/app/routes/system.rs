use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::context::RequestIdentity;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Landing route; anonymous callers are welcome.
pub async fn home(identity: Option<RequestIdentity>) -> impl IntoResponse {
    let body = match identity {
        Some(identity) => json!({
            "authenticated": true,
            "user_id": identity.user_id(),
            "role": identity.role(),
        }),
        None => json!({ "authenticated": false }),
    };
    Json(body)
}
