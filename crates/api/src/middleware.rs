//! Request gates and the route-group wiring that composes them.
//!
//! Two independent stages:
//! - [`authenticate`] is tolerant: no cookie means the request continues
//!   anonymously, a bad token ends it with 401.
//! - [`require_admin`] is strict: anything but an admin identity ends the
//!   request with 403.
//!
//! Route groups declare their gate chain through [`RouteGroup`]; a chain that
//! checks the role before establishing identity is rejected when the app is
//! built, not when a request arrives.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{Next, from_fn, from_fn_with_state},
    response::Response,
};
use thiserror::Error;

use storefront_auth::{Role, TokenService, require_role};

use crate::app::errors;
use crate::context::RequestIdentity;
use crate::session::SessionCarrier;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
    pub session: SessionCarrier,
}

/// Authentication gate.
pub async fn authenticate(State(state): State<AuthState>, mut req: Request, next: Next) -> Response {
    let Some(token) = state.session.extract(req.headers()) else {
        return next.run(req).await;
    };

    match state.tokens.validate(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(RequestIdentity::from(&claims));
            next.run(req).await
        }
        Err(reason) => {
            tracing::warn!(%reason, path = %req.uri().path(), "session token rejected");
            errors::unauthorized()
        }
    }
}

/// Authorization gate: admin only.
pub async fn require_admin(req: Request, next: Next) -> Response {
    let identity = req.extensions().get::<RequestIdentity>().copied();

    if let Err(e) = require_role(identity.map(|i| i.role()), Role::Admin) {
        tracing::info!(
            user_id = identity.map(|i| i.user_id().get()),
            path = %req.uri().path(),
            "{e}"
        );
        return errors::forbidden();
    }

    next.run(req).await
}

/// A gate stage, listed in execution order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Gate {
    Authenticate,
    RequireAdmin,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WiringError {
    #[error("route group '{0}': admin gate must follow an authentication gate")]
    AuthorizationWithoutAuthentication(&'static str),

    #[error("route group '{0}': authentication gate listed more than once")]
    DuplicateAuthentication(&'static str),
}

/// A set of routes sharing one gate chain.
pub struct RouteGroup {
    name: &'static str,
    router: Router,
    gates: Vec<Gate>,
}

impl RouteGroup {
    pub fn new(name: &'static str, router: Router) -> Self {
        Self {
            name,
            router,
            gates: Vec::new(),
        }
    }

    pub fn gate(mut self, gate: Gate) -> Self {
        self.gates.push(gate);
        self
    }

    pub fn authenticated(self) -> Self {
        self.gate(Gate::Authenticate)
    }

    pub fn admin_only(self) -> Self {
        self.gate(Gate::RequireAdmin)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Check the chain: identity is established once, before any role check.
    pub fn validate(&self) -> Result<(), WiringError> {
        let mut authenticated = false;
        for gate in &self.gates {
            match gate {
                Gate::Authenticate if authenticated => {
                    return Err(WiringError::DuplicateAuthentication(self.name));
                }
                Gate::Authenticate => authenticated = true,
                Gate::RequireAdmin if !authenticated => {
                    return Err(WiringError::AuthorizationWithoutAuthentication(self.name));
                }
                Gate::RequireAdmin => {}
            }
        }
        Ok(())
    }

    /// Validate the chain and wrap the routes in it.
    pub fn build(self, auth: &AuthState) -> Result<Router, WiringError> {
        self.validate()?;

        // The last layer applied runs first, so wrap in reverse order.
        let mut router = self.router;
        for gate in self.gates.iter().rev() {
            router = match gate {
                Gate::Authenticate => router.layer(from_fn_with_state(auth.clone(), authenticate)),
                Gate::RequireAdmin => router.layer(from_fn(require_admin)),
            };
        }

        tracing::debug!(group = self.name, gates = ?self.gates, "route group wired");
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request as HttpRequest, StatusCode, header},
        routing::get,
    };
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    use storefront_auth::SigningSecret;
    use storefront_core::UserId;

    use super::*;

    const TEST_SECRET: &str = "middleware-test-secret-key-32-bytes!";

    fn auth_state() -> AuthState {
        let tokens = Arc::new(TokenService::new(&SigningSecret::new(TEST_SECRET).unwrap()));
        let session = SessionCarrier::new(false, tokens.ttl());
        AuthState { tokens, session }
    }

    async fn whoami(identity: Option<RequestIdentity>) -> String {
        match identity {
            Some(i) => format!("{}:{}", i.user_id(), i.role()),
            None => "anonymous".to_string(),
        }
    }

    fn probe() -> Router {
        Router::new().route("/probe", get(whoami))
    }

    fn request(cookie: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/probe");
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn cookie_for(state: &AuthState, id: u64, role: Role) -> String {
        let token = state.tokens.issue(UserId::new(id), role).unwrap();
        format!("jwt={token}")
    }

    async fn send(router: Router, cookie: Option<&str>) -> (StatusCode, String) {
        let res = router.oneshot(request(cookie)).await.unwrap();
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn missing_cookie_passes_through_anonymously() {
        let state = auth_state();
        let app = RouteGroup::new("probe", probe()).authenticated().build(&state).unwrap();

        assert_eq!(send(app, None).await, (StatusCode::OK, "anonymous".to_string()));
    }

    #[tokio::test]
    async fn valid_cookie_populates_identity() {
        let state = auth_state();
        let cookie = cookie_for(&state, 5, Role::Customer);
        let app = RouteGroup::new("probe", probe()).authenticated().build(&state).unwrap();

        assert_eq!(send(app, Some(&cookie)).await, (StatusCode::OK, "5:customer".to_string()));
    }

    #[tokio::test]
    async fn invalid_cookie_aborts_before_the_handler() {
        let state = auth_state();
        let app = RouteGroup::new("probe", probe()).authenticated().build(&state).unwrap();

        let (status, body) = send(app, Some("jwt=garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!body.contains("anonymous"));
    }

    #[tokio::test]
    async fn expired_cookie_is_unauthorized() {
        let state = auth_state();
        let stale = state
            .tokens
            .issue_at(UserId::new(1), Role::Admin, Utc::now() - Duration::hours(25))
            .unwrap();
        let app = RouteGroup::new("probe", probe()).authenticated().build(&state).unwrap();

        let (status, _) = send(app, Some(&format!("jwt={stale}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_gate_blocks_customers_and_anonymous() {
        let state = auth_state();
        let customer = cookie_for(&state, 2, Role::Customer);
        let admin_app = || {
            RouteGroup::new("admin", probe())
                .authenticated()
                .admin_only()
                .build(&state)
                .unwrap()
        };

        assert_eq!(send(admin_app(), Some(&customer)).await.0, StatusCode::FORBIDDEN);
        assert_eq!(send(admin_app(), None).await.0, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_gate_admits_admins() {
        let state = auth_state();
        let admin = cookie_for(&state, 1, Role::Admin);
        let app = RouteGroup::new("admin", probe())
            .authenticated()
            .admin_only()
            .build(&state)
            .unwrap();

        assert_eq!(send(app, Some(&admin)).await, (StatusCode::OK, "1:admin".to_string()));
    }

    #[test]
    fn admin_gate_without_authentication_is_a_wiring_error() {
        let state = auth_state();
        let err = RouteGroup::new("broken", probe()).admin_only().build(&state).unwrap_err();
        assert_eq!(err, WiringError::AuthorizationWithoutAuthentication("broken"));

        let reversed = RouteGroup::new("reversed", probe())
            .admin_only()
            .authenticated()
            .validate()
            .unwrap_err();
        assert_eq!(reversed, WiringError::AuthorizationWithoutAuthentication("reversed"));
    }

    #[test]
    fn authenticating_twice_is_a_wiring_error() {
        let err = RouteGroup::new("twice", probe())
            .authenticated()
            .authenticated()
            .validate()
            .unwrap_err();
        assert_eq!(err, WiringError::DuplicateAuthentication("twice"));
    }
}
