//! Session token issuance and validation (HS256 JWT).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
    errors::ErrorKind,
};
use serde_json::{Map, Value};

use storefront_core::UserId;

use crate::claims;
use crate::{AuthError, IdentityClaims, Role, SigningSecret, TokenError};

/// Session lifetime: tokens (and the cookie carrying them) live for 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Issues and validates signed identity tokens.
///
/// Validation runs in a fixed order (structure, signature, expiry, claims) so
/// the reported [`TokenError`] always names the first check that failed.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_ttl(secret, Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
    }

    pub fn with_ttl(secret: &SigningSecret, ttl: Duration) -> Self {
        // Expiry and claim shape are checked by hand after the signature, so
        // the library only verifies structure, algorithm and MAC.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Token lifetime; the session cookie's max-age is derived from it.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, sub: UserId, role: Role) -> Result<String, AuthError> {
        self.issue_at(sub, role, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, sub: UserId, role: Role, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = IdentityClaims::new(sub, role, now, self.ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    pub fn validate(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token against the clock value `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaims, TokenError> {
        decode_header(token).map_err(|_| TokenError::Malformed)?;

        let payload = decode::<Map<String, Value>>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
                    TokenError::BadSignature
                }
                // The header already parsed, so a JSON failure here is the payload.
                ErrorKind::Json(_) => TokenError::InvalidClaims,
                _ => TokenError::Malformed,
            })?
            .claims;

        let exp = payload
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or(TokenError::InvalidClaims)?;
        if claims::is_expired(exp, now) {
            return Err(TokenError::Expired);
        }

        serde_json::from_value::<IdentityClaims>(Value::Object(payload))
            .map_err(|_| TokenError::InvalidClaims)
    }
}

impl core::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
