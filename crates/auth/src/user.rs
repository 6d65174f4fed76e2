//! User record contract.
//!
//! The auth boundary consumes user records through [`UserRepository`]; the
//! concrete store lives in infra. Sign-in only needs `find_by_email` and the
//! stored hash, the rest backs account management.

use std::sync::Arc;

use storefront_core::{DomainResult, UserId};

use crate::Role;

/// A stored user account.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    /// Identity reference used at sign-in; unique per store.
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl core::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Insert payload; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// User-record store contract.
///
/// Lookups of missing records fail with `DomainError::NotFound`; a duplicate
/// email on create/update fails with `DomainError::Conflict`.
pub trait UserRepository: Send + Sync {
    fn find_by_email(&self, email: &str) -> DomainResult<UserRecord>;
    fn find_by_id(&self, id: UserId) -> DomainResult<UserRecord>;
    fn create(&self, user: NewUser) -> DomainResult<UserRecord>;
    fn update(&self, id: UserId, changes: UserChanges) -> DomainResult<UserRecord>;
    fn delete(&self, id: UserId) -> DomainResult<UserRecord>;
    fn list_all(&self) -> DomainResult<Vec<UserRecord>>;
}

impl<R> UserRepository for Arc<R>
where
    R: UserRepository + ?Sized,
{
    fn find_by_email(&self, email: &str) -> DomainResult<UserRecord> {
        (**self).find_by_email(email)
    }

    fn find_by_id(&self, id: UserId) -> DomainResult<UserRecord> {
        (**self).find_by_id(id)
    }

    fn create(&self, user: NewUser) -> DomainResult<UserRecord> {
        (**self).create(user)
    }

    fn update(&self, id: UserId, changes: UserChanges) -> DomainResult<UserRecord> {
        (**self).update(id, changes)
    }

    fn delete(&self, id: UserId) -> DomainResult<UserRecord> {
        (**self).delete(id)
    }

    fn list_all(&self) -> DomainResult<Vec<UserRecord>> {
        (**self).list_all()
    }
}
