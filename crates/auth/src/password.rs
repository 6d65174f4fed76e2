//! Password hashing (bcrypt).

use crate::AuthError;

/// bcrypt's recommended work factor.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// bcrypt only reads this many bytes of input; longer passwords are refused
/// rather than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Plaintext hashed once at construction; verifying against its hash burns the
/// same bcrypt work as a real check when the account does not exist.
const DECOY_PLAINTEXT: &str = "storefront-decoy-credential";

/// One-way adaptive password hasher with a fixed cost factor.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    decoy_hash: String,
}

impl PasswordHasher {
    /// Build a hasher for `cost`.
    ///
    /// Hashes a decoy value up front, so an unusable cost (or a broken
    /// primitive) surfaces here at startup instead of on the first sign-up.
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        let decoy_hash = bcrypt::hash(DECOY_PLAINTEXT, cost)
            .map_err(|e| AuthError::HashingFailure(e.to_string()))?;
        Ok(Self { cost, decoy_hash })
    }

    /// Hash a plaintext password with a fresh salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::HashingFailure(format!(
                "password exceeds {MAX_PASSWORD_BYTES} bytes"
            )));
        }
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AuthError::HashingFailure(e.to_string())
        })
    }

    /// Check `candidate` against `stored_hash`.
    ///
    /// Any failure, including a stored hash bcrypt cannot parse, is `false`.
    /// A candidate over [`MAX_PASSWORD_BYTES`] never matches.
    pub fn verify(&self, stored_hash: &str, candidate: &str) -> bool {
        if candidate.len() > MAX_PASSWORD_BYTES {
            self.verify_decoy(candidate);
            return false;
        }
        match bcrypt::verify(candidate, stored_hash) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is unreadable");
                false
            }
        }
    }

    /// Run a verification whose result is discarded.
    pub fn verify_decoy(&self, candidate: &str) {
        let _ = bcrypt::verify(candidate, &self.decoy_hash);
    }
}

impl core::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PasswordHasher").field("cost", &self.cost).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Lowest cost bcrypt accepts; keeps the suite fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hasher = PasswordHasher::new(TEST_COST).unwrap();
        let hash = hasher.hash("secret").unwrap();

        assert!(hash.starts_with("$2b$04$"));
        assert!(hasher.verify(&hash, "secret"));
        assert!(!hasher.verify(&hash, "wrong"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::new(TEST_COST).unwrap();
        let a = hasher.hash("Password1").unwrap();
        let b = hasher.hash("Password1").unwrap();

        assert_ne!(a, b);
        assert!(hasher.verify(&a, "Password1"));
        assert!(hasher.verify(&b, "Password1"));
    }

    #[test]
    fn malformed_stored_hash_is_a_plain_mismatch() {
        let hasher = PasswordHasher::new(TEST_COST).unwrap();
        assert!(!hasher.verify("not-a-valid-hash", "password"));
        assert!(!hasher.verify("", "password"));
    }

    #[test]
    fn unusable_cost_fails_at_construction() {
        let err = PasswordHasher::new(3).unwrap_err();
        assert!(matches!(err, AuthError::HashingFailure(_)));
    }

    #[test]
    fn passwords_sharing_a_72_byte_prefix_are_not_interchangeable() {
        let hasher = PasswordHasher::new(TEST_COST).unwrap();
        let prefix = "x".repeat(MAX_PASSWORD_BYTES);
        let long_a = format!("{prefix}A");
        let long_b = format!("{prefix}B");

        assert!(matches!(hasher.hash(&long_a), Err(AuthError::HashingFailure(_))));

        let hash = hasher.hash(&prefix).unwrap();
        assert!(hasher.verify(&hash, &prefix));
        assert!(!hasher.verify(&hash, &long_a));
        assert!(!hasher.verify(&hash, &long_b));
    }

    #[test]
    fn unicode_passwords_hash() {
        let hasher = PasswordHasher::new(TEST_COST).unwrap();
        let hash = hasher.hash("pässwörd-日本").unwrap();
        assert!(hasher.verify(&hash, "pässwörd-日本"));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 24,
            ..ProptestConfig::default()
        })]

        /// Property: a hash accepts its own plaintext and rejects any other.
        #[test]
        fn hash_accepts_only_its_plaintext(
            password in "[ -~]{1,72}",
            other in "[ -~]{1,90}",
        ) {
            let hasher = PasswordHasher::new(TEST_COST).unwrap();
            let hash = hasher.hash(&password).unwrap();

            prop_assert!(hasher.verify(&hash, &password));
            if other != password {
                prop_assert!(!hasher.verify(&hash, &other));
            }
        }
    }
}
