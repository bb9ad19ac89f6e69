//! `ledgerbridge-engine`: the ledger engine at its interface boundary.
//!
//! The engine itself is a remote, authoritative service; this crate holds the
//! operation contract ([`LedgerEngine`]), the binary client that speaks it
//! ([`TcpEngineClient`]), and an in-memory implementation used by tests and
//! local development ([`MemoryEngine`]).

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use ledgerbridge_core::{Account, AccountBalance, AccountFilter, QueryFilter, Transfer};

pub mod client;
pub mod error;
pub mod memory;
pub mod protocol;

pub use client::TcpEngineClient;
pub use error::EngineError;
pub use memory::MemoryEngine;

/// One failed record of a submitted batch.
///
/// The engine reports failures only: a record absent from the result list
/// succeeded. `index` is the zero-based position in the submitted batch, and
/// entries arrive in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResult {
    pub index: u32,
    /// Numeric code from the engine's published result tables.
    pub result: u32,
}

/// Operation contract for the remote ledger engine.
///
/// Implementations must be safe for concurrent use from many in-flight
/// requests; the bridge shares one handle per process. Batches are submitted
/// verbatim, never reordered or split, because linked-record chains are
/// resolved by the engine.
#[async_trait]
pub trait LedgerEngine: Send + Sync {
    async fn create_accounts(
        &self,
        accounts: Vec<Account>,
    ) -> Result<Vec<CreateResult>, EngineError>;

    async fn create_transfers(
        &self,
        transfers: Vec<Transfer>,
    ) -> Result<Vec<CreateResult>, EngineError>;

    /// Point lookup: missing ids are silently omitted from the result.
    async fn lookup_accounts(&self, ids: Vec<u128>) -> Result<Vec<Account>, EngineError>;

    async fn lookup_transfers(&self, ids: Vec<u128>) -> Result<Vec<Transfer>, EngineError>;

    async fn get_account_balances(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<AccountBalance>, EngineError>;

    async fn get_account_transfers(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<Transfer>, EngineError>;

    async fn query_accounts(&self, filter: QueryFilter) -> Result<Vec<Account>, EngineError>;

    async fn query_transfers(&self, filter: QueryFilter) -> Result<Vec<Transfer>, EngineError>;
}

#[async_trait]
impl<E> LedgerEngine for Arc<E>
where
    E: LedgerEngine + ?Sized,
{
    async fn create_accounts(
        &self,
        accounts: Vec<Account>,
    ) -> Result<Vec<CreateResult>, EngineError> {
        (**self).create_accounts(accounts).await
    }

    async fn create_transfers(
        &self,
        transfers: Vec<Transfer>,
    ) -> Result<Vec<CreateResult>, EngineError> {
        (**self).create_transfers(transfers).await
    }

    async fn lookup_accounts(&self, ids: Vec<u128>) -> Result<Vec<Account>, EngineError> {
        (**self).lookup_accounts(ids).await
    }

    async fn lookup_transfers(&self, ids: Vec<u128>) -> Result<Vec<Transfer>, EngineError> {
        (**self).lookup_transfers(ids).await
    }

    async fn get_account_balances(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<AccountBalance>, EngineError> {
        (**self).get_account_balances(filter).await
    }

    async fn get_account_transfers(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<Transfer>, EngineError> {
        (**self).get_account_transfers(filter).await
    }

    async fn query_accounts(&self, filter: QueryFilter) -> Result<Vec<Account>, EngineError> {
        (**self).query_accounts(filter).await
    }

    async fn query_transfers(&self, filter: QueryFilter) -> Result<Vec<Transfer>, EngineError> {
        (**self).query_transfers(filter).await
    }
}
