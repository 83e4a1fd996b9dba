use super::{StoreError, UserStore};
use crate::models::{CreateUserRequest, UpdateUserRequest, User, UserSummary};
use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct Inner {
    users: Vec<User>,
    next_id: i64,
}

/// [`UserStore`] kept in process memory behind a `RwLock`
///
/// Every mutation holds the write lock for its whole check-then-write
/// sequence, so concurrent creates cannot both claim the same email.
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    /// Empty store; the first ID handed out is 1
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Store holding the two demo users; the next ID is 3
    pub fn seeded() -> Self {
        let now = Utc::now();
        Self::with_users(vec![
            User {
                id: 1,
                name: "Nguyen Van Thao".to_string(),
                email: "thao@example.com".to_string(),
                age: 25,
                created_at: now,
            },
            User {
                id: 2,
                name: "Tran Thi Mai".to_string(),
                email: "mai@example.com".to_string(),
                age: 30,
                created_at: now,
            },
        ])
    }

    /// Store holding `users`; IDs continue after the largest one present
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(Inner { users, next_id }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn position(&self, id: i64) -> Result<usize, StoreError> {
        self.users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Is `email` used by any user other than `except`?
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

impl UserStore for InMemoryUserStore {
    fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read()?.users.clone())
    }

    fn get(&self, id: i64) -> Result<User, StoreError> {
        let inner = self.read()?;
        let index = inner.position(id)?;
        Ok(inner.users[index].clone())
    }

    fn create(&self, input: CreateUserRequest) -> Result<User, StoreError> {
        let mut inner = self.write()?;
        if inner.email_taken(&input.email, None) {
            return Err(StoreError::EmailTaken(input.email));
        }

        let user = User {
            id: inner.next_id,
            name: input.name,
            email: input.email,
            age: input.age,
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.users.push(user.clone());

        tracing::debug!(id = user.id, "user created");
        Ok(user)
    }

    fn update(&self, id: i64, changes: UpdateUserRequest) -> Result<User, StoreError> {
        let mut inner = self.write()?;
        let index = inner.position(id)?;

        if let Some(email) = changes.email() {
            if inner.email_taken(email, Some(id)) {
                return Err(StoreError::EmailTaken(email.to_string()));
            }
        }

        let user = &mut inner.users[index];
        if let Some(name) = changes.name() {
            user.name = name.to_string();
        }
        if let Some(email) = changes.email() {
            user.email = email.to_string();
        }
        if let Some(age) = changes.age() {
            user.age = age;
        }
        Ok(user.clone())
    }

    fn delete(&self, id: i64) -> Result<User, StoreError> {
        let mut inner = self.write()?;
        let index = inner.position(id)?;
        Ok(inner.users.remove(index))
    }

    fn search_by_name(&self, query: &str) -> Result<Vec<User>, StoreError> {
        let needle = query.to_lowercase();
        Ok(self
            .read()?
            .users
            .iter()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn summary(&self) -> Result<UserSummary, StoreError> {
        let inner = self.read()?;
        let total_users = inner.users.len();
        let average_age = if total_users == 0 {
            0.0
        } else {
            inner.users.iter().map(|u| u.age as f64).sum::<f64>() / total_users as f64
        };
        Ok(UserSummary {
            total_users,
            average_age,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn new_user(name: &str, email: &str, age: i64) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    fn changes(name: Option<&str>, email: Option<&str>, age: Option<i64>) -> UpdateUserRequest {
        UpdateUserRequest {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            age,
        }
    }

    #[test]
    fn test_seeded_store_continues_at_three() {
        let store = InMemoryUserStore::seeded();
        let ids: Vec<i64> = store.list().unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let user = store.create(new_user("A", "a@x.com", 20)).unwrap();
        assert_eq!(user.id, 3);
    }

    #[test]
    fn test_ids_increase_and_are_not_reused() {
        let store = InMemoryUserStore::new();
        let first = store.create(new_user("A", "a@x.com", 20)).unwrap();
        let second = store.create(new_user("B", "b@x.com", 21)).unwrap();
        assert!(second.id > first.id);

        store.delete(second.id).unwrap();
        let third = store.create(new_user("C", "c@x.com", 22)).unwrap();
        assert_eq!(third.id, second.id + 1);
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let store = InMemoryUserStore::seeded();
        let err = store.create(new_user("Other", "mai@example.com", 40)).unwrap_err();
        assert_eq!(err, StoreError::EmailTaken("mai@example.com".to_string()));
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_update_is_partial_and_atomic() {
        let store = InMemoryUserStore::seeded();

        let user = store.update(1, changes(None, None, Some(0))).unwrap();
        assert_eq!(user.age, 25);
        assert_eq!(user.name, "Nguyen Van Thao");

        let user = store.update(1, changes(Some("Thao"), Some(""), Some(26))).unwrap();
        assert_eq!((user.name.as_str(), user.email.as_str(), user.age), ("Thao", "thao@example.com", 26));

        let err = store
            .update(1, changes(Some("Renamed"), Some("mai@example.com"), Some(50)))
            .unwrap_err();
        assert_eq!(err, StoreError::EmailTaken("mai@example.com".to_string()));
        assert_eq!(store.get(1).unwrap().name, "Thao");
        assert_eq!(store.get(1).unwrap().age, 26);

        // Keeping one's own email is not a conflict
        let user = store.update(2, changes(None, Some("mai@example.com"), None)).unwrap();
        assert_eq!(user.email, "mai@example.com");
    }

    #[test]
    fn test_delete_preserves_order() {
        let store = InMemoryUserStore::seeded();
        store.create(new_user("C", "c@x.com", 40)).unwrap();

        let removed = store.delete(2).unwrap();
        assert_eq!(removed.email, "mai@example.com");
        let ids: Vec<i64> = store.list().unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(store.get(2).unwrap_err(), StoreError::NotFound(2));
        assert_eq!(store.delete(2).unwrap_err(), StoreError::NotFound(2));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let store = InMemoryUserStore::seeded();
        let found = store.search_by_name("mai").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Tran Thi Mai");

        assert_eq!(store.search_by_name("VAN").unwrap().len(), 1);
        assert!(store.search_by_name("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_summary() {
        let store = InMemoryUserStore::new();
        assert_eq!(
            store.summary().unwrap(),
            UserSummary {
                total_users: 0,
                average_age: 0.0
            }
        );

        let store = InMemoryUserStore::seeded();
        assert_eq!(store.summary().unwrap().average_age, 27.5);
    }

    #[test]
    fn test_concurrent_creates_with_same_email() {
        let store = Arc::new(InMemoryUserStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.create(new_user(&format!("U{}", i), "same@x.com", 20)))
            })
            .collect();

        let created = handles
            .into_iter()
            .filter_map(|h| h.join().ok())
            .filter(|r| r.is_ok())
            .count();
        assert_eq!(created, 1);
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
