use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::UserId;

use crate::Role;

/// Identity claims embedded in a session token.
///
/// Minted once at sign-in and never mutated; the signature over the encoded
/// form is what makes them trustworthy. Timestamps travel as whole seconds
/// under the registered JWT names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject: the authenticated user's id.
    pub sub: UserId,

    pub role: Role,

    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl IdentityClaims {
    pub fn new(sub: UserId, role: Role, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub,
            role,
            issued_at: now,
            expires_at: now + ttl,
        }
    }
}

/// A token is expired from its `exp` second onwards.
pub fn is_expired(exp_secs: i64, now: DateTime<Utc>) -> bool {
    now.timestamp() >= exp_secs
}
