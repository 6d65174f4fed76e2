//! Credential flows: sign-in, account creation and password changes.
//!
//! Every path that stores a credential goes through [`PasswordHasher::hash`]
//! and stops on failure; nothing is written with an empty or partial hash.

use std::sync::Arc;

use storefront_core::{DomainError, UserId};

use crate::password::MAX_PASSWORD_BYTES;
use crate::{
    AuthError, NewUser, PasswordHasher, Role, TokenService, UserChanges, UserRecord,
    UserRepository,
};

/// Plaintext input for a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: UserRecord,
    pub token: String,
}

#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher, tokens: Arc<TokenService>) -> Self {
        Self { users, hasher, tokens }
    }

    pub fn users(&self) -> &Arc<dyn UserRepository> {
        &self.users
    }

    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    /// Verify an email/password pair and mint a session token.
    ///
    /// Callers must not reveal which of `CredentialNotFound` and
    /// `PasswordMismatch` occurred.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, AuthError> {
        let user = match self.users.find_by_email(email.trim()) {
            Ok(user) => user,
            Err(DomainError::NotFound) => {
                self.hasher.verify_decoy(password);
                return Err(AuthError::CredentialNotFound);
            }
            Err(e) => return Err(e.into()),
        };

        if !self.hasher.verify(&user.password_hash, password) {
            return Err(AuthError::PasswordMismatch);
        }

        let token = self.tokens.issue(user.id, user.role)?;
        tracing::info!(user_id = %user.id, role = %user.role, "signed in");

        Ok(SignedIn { user, token })
    }

    /// Create an account, hashing the password first.
    pub fn register(&self, account: NewAccount) -> Result<UserRecord, AuthError> {
        let email = account.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("a valid email is required").into());
        }
        check_password(&account.password)?;

        let password_hash = self.hasher.hash(&account.password)?;
        let user = self.users.create(NewUser {
            name: account.name.trim().to_string(),
            email,
            password_hash,
            role: account.role,
        })?;

        tracing::info!(user_id = %user.id, role = %user.role, "account created");
        Ok(user)
    }

    /// Apply profile changes; a new password is re-hashed before storing.
    pub fn update_account(
        &self,
        id: UserId,
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<(UserRecord, bool), AuthError> {
        let password_hash = match password.filter(|p| !p.is_empty()) {
            Some(p) => {
                check_password(&p)?;
                Some(self.hasher.hash(&p)?)
            }
            None => None,
        };
        let password_changed = password_hash.is_some();

        let changes = UserChanges {
            name: name.filter(|n| !n.is_empty()),
            email: email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()),
            password_hash,
        };

        let user = self.users.update(id, changes)?;
        Ok((user, password_changed))
    }
}

impl core::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Authenticator")
            .field("hasher", &self.hasher)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

fn check_password(password: &str) -> Result<(), DomainError> {
    if password.is_empty() {
        return Err(DomainError::validation("password must not be empty"));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(DomainError::validation(format!(
            "password must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }
    Ok(())
}
