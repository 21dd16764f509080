use crate::models::User;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory user list. Nothing is persisted.
#[derive(Debug, Default)]
pub struct UserStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    last_id: i64,
}

impl Inner {
    /// Timestamp ids, bumped past the previous id when the clock has not moved on.
    fn next_id(&mut self, now_ms: i64) -> i64 {
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: Option<&str>, email: Option<&str>) -> User {
        self.insert_at(chrono::Utc::now().timestamp_millis(), name, email)
    }

    fn insert_at(&self, now_ms: i64, name: Option<&str>, email: Option<&str>) -> User {
        let mut inner = self.lock();
        let user = User::new(inner.next_id(now_ms), name, email);
        inner.users.push(user.clone());
        user
    }

    /// All users in insertion order.
    pub fn list(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.lock().users.iter().find(|u| u.id == id).cloned()
    }

    /// Removes and returns the user with `id`.
    pub fn remove(&self, id: i64) -> Option<User> {
        let mut inner = self.lock();
        let idx = inner.users.iter().position(|u| u.id == id)?;
        Some(inner.users.remove(idx))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The list stays consistent even if a holder panicked; no invariant spans the lock.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEFAULT_EMAIL, DEFAULT_NAME};

    #[test]
    fn test_insert_assigns_timestamp_id() {
        let store = UserStore::new();
        let user = store.insert_at(1_700_000_000_000, Some("Ada"), None);

        assert_eq!(user.id, 1_700_000_000_000);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, DEFAULT_EMAIL);
        assert_eq!(store.list(), vec![user.clone()]);
    }

    #[test]
    fn test_ids_stay_unique_within_one_millisecond() {
        let store = UserStore::new();
        let a = store.insert_at(1_000, None, None);
        let b = store.insert_at(1_000, None, None);
        let c = store.insert_at(999, None, None);

        assert_eq!(a.id, 1_000);
        assert_eq!(b.id, 1_001);
        assert_eq!(c.id, 1_002);
    }

    #[test]
    fn test_remove_takes_only_the_match() {
        let store = UserStore::new();
        let a = store.insert_at(10, Some("A"), None);
        let b = store.insert_at(20, Some("B"), None);

        let removed = store.remove(a.id).unwrap();
        assert_eq!(removed, a);
        assert_eq!(store.list(), vec![b.clone()]);
        assert!(store.get(a.id).is_none());
        assert!(store.remove(a.id).is_none());
    }

    #[test]
    fn test_get_unknown_is_none() {
        let store = UserStore::new();
        assert!(store.list().is_empty());
        assert!(store.get(42).is_none());
        assert_eq!(store.insert(None, None).name, DEFAULT_NAME);
    }
}
