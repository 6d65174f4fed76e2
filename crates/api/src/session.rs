//! Session transport: the token rides in an HTTP-only cookie.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "jwt";

/// Binds session tokens to the cookie transport.
///
/// The cookie's max-age is the token lifetime, so the browser drops the
/// cookie at the same moment the token stops validating.
#[derive(Debug, Clone)]
pub struct SessionCarrier {
    secure: bool,
    max_age: time::Duration,
}

impl SessionCarrier {
    pub fn new(secure: bool, token_ttl: chrono::Duration) -> Self {
        Self {
            secure,
            max_age: time::Duration::seconds(token_ttl.num_seconds()),
        }
    }

    /// Set the session cookie (sign-in).
    pub fn attach(&self, jar: CookieJar, token: String) -> CookieJar {
        jar.add(self.cookie(token, self.max_age))
    }

    /// Overwrite the session cookie with an empty, already-expired value (sign-out).
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.cookie(String::new(), time::Duration::ZERO))
    }

    /// Read the carried token, if any. An empty cookie counts as no token.
    pub fn extract(&self, headers: &HeaderMap) -> Option<String> {
        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty())
    }

    fn cookie(&self, value: String, max_age: time::Duration) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(max_age)
            .build()
    }
}
