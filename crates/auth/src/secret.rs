use std::sync::Arc;

use crate::AuthError;

/// Minimum accepted HMAC key length, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Process-wide HMAC signing secret.
///
/// Loaded once at startup and shared read-only afterwards; cloning only bumps
/// a reference count. The bytes never appear in `Debug` output.
#[derive(Clone)]
pub struct SigningSecret(Arc<[u8]>);

impl SigningSecret {
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self, AuthError> {
        let bytes = bytes.as_ref();
        if bytes.len() < MIN_SECRET_LEN {
            return Err(AuthError::InvalidSecret(format!(
                "expected at least {MIN_SECRET_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(Arc::from(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
