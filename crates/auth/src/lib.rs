//! `storefront-auth`: credential verification and claims boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the API crate
//! carries tokens over cookies and the infra crate provides the user store.

pub mod authenticator;
pub mod authorize;
pub mod claims;
pub mod error;
pub mod password;
pub mod roles;
pub mod secret;
pub mod token;
pub mod user;

pub use authenticator::{Authenticator, NewAccount, SignedIn};
pub use authorize::require_role;
pub use claims::IdentityClaims;
pub use error::{AuthError, TokenError};
pub use password::{DEFAULT_COST, MAX_PASSWORD_BYTES, PasswordHasher};
pub use roles::Role;
pub use secret::SigningSecret;
pub use token::{DEFAULT_TOKEN_TTL_SECS, TokenService};
pub use user::{NewUser, UserChanges, UserRecord, UserRepository};
