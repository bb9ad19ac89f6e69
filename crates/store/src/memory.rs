//! In-memory credential store for tests and local development.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::{NewUser, StoreError, UserRecord, UserStore};

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    users: BTreeMap<i64, UserRecord>,
    next_id: i64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        inner.next_id += 1;
        let record = UserRecord {
            id: inner.next_id,
            email: user.email,
            hashed_password: user.hashed_password,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            created_at: Utc::now(),
        };
        inner.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<UserRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .users
            .values()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn set_active(&self, id: i64, is_active: bool) -> Result<Option<UserRecord>, StoreError> {
        let mut inner = self.inner.lock().await;
        Ok(inner.users.get_mut(&id).map(|user| {
            user.is_active = is_active;
            user.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            hashed_password: "digest".to_string(),
            is_active: false,
            is_superuser: false,
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryUserStore::new();
        let a = store.create(new_user("a@test.com")).await.unwrap();
        let b = store.create(new_user("b@test.com")).await.unwrap();
        assert!(b.id > a.id);
        assert!(!a.is_active);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryUserStore::new();
        store.create(new_user("dup@test.com")).await.unwrap();
        let err = store.create(new_user("dup@test.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.list(0, 100).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn set_active_flips_the_flag_and_misses_return_none() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("c@test.com")).await.unwrap();

        let updated = store.set_active(user.id, true).await.unwrap().unwrap();
        assert!(updated.is_active);
        assert!(store.set_active(999, true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_pages_in_id_order() {
        let store = MemoryUserStore::new();
        for i in 0..5 {
            store.create(new_user(&format!("u{i}@test.com"))).await.unwrap();
        }
        let page = store.list(1, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].email, "u1@test.com");
    }
}
