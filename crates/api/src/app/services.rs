//! Service wiring shared by every request handler.

use std::sync::Arc;

use chrono::Utc;

use ledgerbridge_auth::{TokenService, hash_password};
use ledgerbridge_engine::LedgerEngine;
use ledgerbridge_store::{NewUser, StoreError, UserStore};

/// Process-scoped handles: one engine connection, one credential store, one
/// token signer. Constructed once at startup and shared by reference.
pub struct AppServices {
    pub engine: Arc<dyn LedgerEngine>,
    pub users: Arc<dyn UserStore>,
    pub tokens: TokenService,
}

impl AppServices {
    pub fn new(
        engine: Arc<dyn LedgerEngine>,
        users: Arc<dyn UserStore>,
        tokens: TokenService,
    ) -> Self {
        Self {
            engine,
            users,
            tokens,
        }
    }

    /// Current time source for token issuance; a seam for tests.
    pub fn now(&self) -> chrono::DateTime<Utc> {
        Utc::now()
    }
}

/// Ensure the configured administrator exists, pre-activated with superuser
/// capability. Idempotent: an existing row (including one racing in from
/// another replica) is left untouched.
pub async fn ensure_bootstrap_admin(
    users: &dyn UserStore,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    if users.find_by_email(email).await?.is_some() {
        return Ok(());
    }

    tracing::info!(email, "creating bootstrap superuser");
    let hashed_password = hash_password(password)?;
    match users
        .create(NewUser {
            email: email.to_string(),
            hashed_password,
            is_active: true,
            is_superuser: true,
        })
        .await
    {
        Ok(_) | Err(StoreError::DuplicateEmail) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use ledgerbridge_auth::verify_password;
    use ledgerbridge_store::MemoryUserStore;

    use super::*;

    #[tokio::test]
    async fn bootstrap_admin_is_created_once() {
        let store = MemoryUserStore::new();

        ensure_bootstrap_admin(&store, "admin@test.com", "secret")
            .await
            .unwrap();
        ensure_bootstrap_admin(&store, "admin@test.com", "other-password")
            .await
            .unwrap();

        let users = store.list(0, 10).await.unwrap();
        assert_eq!(users.len(), 1);

        let admin = &users[0];
        assert!(admin.is_active);
        assert!(admin.is_superuser);
        // Second call was a no-op: the original password still verifies.
        assert!(verify_password("secret", &admin.hashed_password));
    }
}
