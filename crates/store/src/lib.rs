//! `ledgerbridge-store`: the credential store at its interface boundary.
//!
//! Plain CRUD on user records keyed by id and unique email; no core logic
//! lives here. Postgres backs production; the in-memory twin backs tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
    /// False until an administrator activates the account; the bootstrap
    /// superuser activates itself.
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new user row; id and created_at are store-assigned.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("credential store error: {0}")]
    Database(String),
}

/// Credential-store contract.
///
/// Implementations use short-lived, per-call sessions; nothing here holds a
/// lock across requests. Users are never hard-deleted.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, StoreError>;

    /// Page through users in id order.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<UserRecord>, StoreError>;

    /// Flip activation; `None` when the id does not exist.
    async fn set_active(&self, id: i64, is_active: bool) -> Result<Option<UserRecord>, StoreError>;
}
