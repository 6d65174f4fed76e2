use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use storefront_auth::{NewUser, UserChanges, UserRecord, UserRepository};
use storefront_core::{DomainError, DomainResult, UserId};

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    users: BTreeMap<UserId, UserRecord>,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }
}

/// In-memory user store.
///
/// Intended for tests/dev. Emails are unique case-insensitively and ids are
/// assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Inner>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_email(&self, email: &str) -> DomainResult<UserRecord> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    fn find_by_id(&self, id: UserId) -> DomainResult<UserRecord> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.users.get(&id).cloned().ok_or(DomainError::NotFound)
    }

    fn create(&self, user: NewUser) -> DomainResult<UserRecord> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.email_taken(&user.email, None) {
            return Err(DomainError::conflict("email already registered"));
        }

        inner.next_id += 1;
        let record = UserRecord {
            id: UserId::new(inner.next_id),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
        };
        inner.users.insert(record.id, record.clone());

        tracing::debug!(user_id = %record.id, "user stored");
        Ok(record)
    }

    fn update(&self, id: UserId, changes: UserChanges) -> DomainResult<UserRecord> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(email) = &changes.email {
            if inner.email_taken(email, Some(id)) {
                return Err(DomainError::conflict("email already registered"));
            }
        }

        let user = inner.users.get_mut(&id).ok_or(DomainError::NotFound)?;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        Ok(user.clone())
    }

    fn delete(&self, id: UserId) -> DomainResult<UserRecord> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.users.remove(&id).ok_or(DomainError::NotFound)
    }

    fn list_all(&self) -> DomainResult<Vec<UserRecord>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.users.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use storefront_auth::Role;

    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: Role::Customer,
        }
    }

    #[test]
    fn assigns_sequential_ids_and_finds_by_email() {
        let repo = InMemoryUserRepository::new();
        let a = repo.create(new_user("a@b.com")).unwrap();
        let b = repo.create(new_user("c@d.com")).unwrap();

        assert_eq!(a.id, UserId::new(1));
        assert_eq!(b.id, UserId::new(2));
        assert_eq!(repo.find_by_email("A@B.com").unwrap().id, a.id);
    }

    #[test]
    fn unknown_email_is_not_found() {
        let repo = InMemoryUserRepository::new();
        assert_eq!(repo.find_by_email("x@y.com"), Err(DomainError::NotFound));
    }

    #[test]
    fn duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("a@b.com")).unwrap();
        let other = repo.create(new_user("c@d.com")).unwrap();

        assert!(matches!(repo.create(new_user("a@b.com")), Err(DomainError::Conflict(_))));

        let changes = UserChanges {
            email: Some("a@b.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(repo.update(other.id, changes), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn update_touches_only_given_fields() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("a@b.com")).unwrap();

        let changes = UserChanges {
            name: Some("Grace".to_string()),
            ..Default::default()
        };
        let updated = repo.update(user.id, changes).unwrap();

        assert_eq!(updated.name, "Grace");
        assert_eq!(updated.email, "a@b.com");
        assert_eq!(updated.password_hash, user.password_hash);
    }

    #[test]
    fn delete_removes_the_record() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("a@b.com")).unwrap();

        assert_eq!(repo.delete(user.id).unwrap().id, user.id);
        assert_eq!(repo.find_by_id(user.id), Err(DomainError::NotFound));
        assert!(repo.list_all().unwrap().is_empty());
    }
}
