//! Service wiring: user store, credential flows, catalog and order stores.

use std::sync::Arc;

use anyhow::Context as _;

use storefront_auth::{
    AuthError, Authenticator, NewAccount, PasswordHasher, Role, SigningSecret, TokenService,
    UserRepository,
};
use storefront_core::DomainError;
use storefront_infra::{InMemoryOrderStore, InMemoryProductStore, InMemoryUserRepository};

use crate::config::{ApiConfig, SeedAdmin};
use crate::middleware::AuthState;
use crate::session::SessionCarrier;

pub struct AppServices {
    pub auth: Authenticator,
    pub session: SessionCarrier,
    pub products: InMemoryProductStore,
    pub orders: InMemoryOrderStore,
}

impl AppServices {
    /// Wire everything over fresh in-memory stores.
    pub fn in_memory(secret: &SigningSecret, bcrypt_cost: u32, cookie_secure: bool) -> Result<Self, AuthError> {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(TokenService::new(secret));
        let hasher = PasswordHasher::new(bcrypt_cost)?;
        let session = SessionCarrier::new(cookie_secure, tokens.ttl());

        Ok(Self {
            auth: Authenticator::new(users, hasher, tokens),
            session,
            products: InMemoryProductStore::new(),
            orders: InMemoryOrderStore::new(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let services = Self::in_memory(&config.jwt_secret, config.bcrypt_cost, config.cookie_secure)
            .context("failed to initialise password hashing")?;

        if let Some(seed) = &config.seed_admin {
            services.seed_admin(seed)?;
        }
        Ok(services)
    }

    /// Create the bootstrap admin account; an existing account with that email is left alone.
    pub fn seed_admin(&self, seed: &SeedAdmin) -> anyhow::Result<()> {
        let account = NewAccount {
            name: "admin".to_string(),
            email: seed.email.clone(),
            password: seed.password.clone(),
            role: Role::Admin,
        };

        match self.auth.register(account) {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "seeded admin account");
                Ok(())
            }
            Err(AuthError::Domain(DomainError::Conflict(_))) => {
                tracing::debug!("admin account already present");
                Ok(())
            }
            Err(e) => Err(anyhow::Error::new(e).context("failed to seed admin account")),
        }
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState {
            tokens: self.auth.tokens().clone(),
            session: self.session.clone(),
        }
    }
}
