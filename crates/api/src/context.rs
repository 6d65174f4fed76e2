use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Response,
};

use storefront_auth::{IdentityClaims, Role};
use storefront_core::UserId;

use crate::app::errors;

/// Verified identity for a request.
///
/// Inserted into the request extensions by the authentication gate and only
/// there; it lives as long as the request does.
///
/// As an extractor it is strict: handlers taking `RequestIdentity` answer 401
/// when the gate let an anonymous request through. Handlers that tolerate
/// anonymous callers take `Option<RequestIdentity>` instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    user_id: UserId,
    role: Role,
}

impl RequestIdentity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl From<&IdentityClaims> for RequestIdentity {
    fn from(claims: &IdentityClaims) -> Self {
        Self::new(claims.sub, claims.role)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestIdentity>()
            .copied()
            .ok_or_else(errors::unauthorized)
    }
}
