//! Consistent error responses.
//!
//! The JSON API answers `{"error": code, "message": msg}`. Gate rejections use
//! fixed bodies so a client never learns why its token was refused.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use storefront_auth::AuthError;
use storefront_core::DomainError;

/// Body for every refused sign-in, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn unauthorized() -> Response {
    json_error(StatusCode::UNAUTHORIZED, "unauthorized", "authentication required")
}

pub fn forbidden() -> Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", "insufficient role")
}

pub fn internal_error() -> Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn auth_error_to_response(err: AuthError) -> Response {
    match err {
        AuthError::CredentialNotFound | AuthError::PasswordMismatch | AuthError::Token(_) => unauthorized(),
        AuthError::InsufficientRole => forbidden(),
        AuthError::Domain(e) => domain_error_to_response(e),
        AuthError::HashingFailure(_) | AuthError::Signing(_) | AuthError::InvalidSecret(_) => {
            tracing::error!(error = %err, "credential operation failed");
            internal_error()
        }
    }
}

/// Plain-text variant used by the form endpoints.
pub fn text_error(status: StatusCode, message: &'static str) -> Response {
    (status, message).into_response()
}

#[cfg(test)]
mod tests {
    use storefront_auth::TokenError;

    use super::*;

    #[test]
    fn every_token_failure_is_the_same_401() {
        for kind in [
            TokenError::Malformed,
            TokenError::BadSignature,
            TokenError::Expired,
            TokenError::InvalidClaims,
        ] {
            let res = auth_error_to_response(AuthError::Token(kind));
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn role_failures_are_forbidden() {
        assert_eq!(auth_error_to_response(AuthError::InsufficientRole).status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn hashing_failure_is_internal() {
        let res = auth_error_to_response(AuthError::HashingFailure("boom".to_string()));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn domain_errors_map_to_http_statuses() {
        assert_eq!(domain_error_to_response(DomainError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(domain_error_to_response(DomainError::conflict("x")).status(), StatusCode::CONFLICT);
        assert_eq!(domain_error_to_response(DomainError::validation("x")).status(), StatusCode::BAD_REQUEST);
    }
}
