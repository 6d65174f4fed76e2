//! Form endpoints for the session lifecycle: register, sign in, sign out.
//!
//! These answer in plain text and redirects rather than JSON, since they are
//! posted from HTML forms.

use std::sync::Arc;

use axum::{
    extract::{Extension, Form, rejection::FormRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use storefront_auth::{NewAccount, Role, SignedIn};

use crate::app::dto::{RegisterForm, SignInForm};
use crate::app::errors::{self, INVALID_CREDENTIALS};
use crate::app::services::AppServices;

const INVALID_FORM: &str = "Invalid form data";

fn redirect(location: &'static str) -> [(header::HeaderName, &'static str); 1] {
    [(header::LOCATION, location)]
}

pub async fn sign_in(
    Extension(services): Extension<Arc<AppServices>>,
    jar: CookieJar,
    form: Result<Form<SignInForm>, FormRejection>,
) -> Response {
    let Ok(Form(form)) = form else {
        return errors::text_error(StatusCode::BAD_REQUEST, INVALID_FORM);
    };

    // bcrypt blocks; run it on the blocking pool.
    let auth = services.auth.clone();
    let outcome = tokio::task::spawn_blocking(move || auth.sign_in(&form.email, &form.password)).await;

    match outcome {
        Ok(Ok(SignedIn { token, .. })) => {
            let jar = services.session.attach(jar, token);
            (StatusCode::FOUND, jar, redirect("/")).into_response()
        }
        Ok(Err(e)) if e.is_credential_failure() => {
            tracing::info!(reason = %e, "sign-in refused");
            errors::text_error(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS)
        }
        Ok(Err(e)) => errors::auth_error_to_response(e),
        Err(join) => {
            tracing::error!(error = %join, "sign-in task failed");
            errors::internal_error()
        }
    }
}

pub async fn sign_out(Extension(services): Extension<Arc<AppServices>>, jar: CookieJar) -> Response {
    let jar = services.session.clear(jar);
    (StatusCode::FOUND, jar, redirect("/")).into_response()
}

/// Create a customer account. Admin accounts are only ever seeded.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> Response {
    let Ok(Form(form)) = form else {
        return errors::text_error(StatusCode::BAD_REQUEST, INVALID_FORM);
    };

    let account = NewAccount {
        name: form.name,
        email: form.email,
        password: form.password,
        role: Role::Customer,
    };

    let auth = services.auth.clone();
    match tokio::task::spawn_blocking(move || auth.register(account)).await {
        Ok(Ok(_)) => (StatusCode::FOUND, redirect("/user/login")).into_response(),
        Ok(Err(e)) => errors::auth_error_to_response(e),
        Err(join) => {
            tracing::error!(error = %join, "registration task failed");
            errors::internal_error()
        }
    }
}
