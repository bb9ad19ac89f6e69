//! Multiplexing TCP client for the remote engine.
//!
//! One long-lived connection per process, constructed at startup and shared
//! by handle. Callers tag each request with a correlation id; a background
//! reader task routes response frames to the matching waiter, so concurrent
//! requests interleave freely on the single connection.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;

use ledgerbridge_core::{Account, AccountBalance, AccountFilter, QueryFilter, Transfer};

use crate::error::EngineError;
use crate::protocol::{self, RequestBody, RequestFrame, ResponseBody, ResponseFrame};
use crate::{CreateResult, LedgerEngine};

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<ResponseBody>>>>;

/// Client half of the engine's binary protocol.
///
/// Safe for concurrent use. A request that outlives its deadline resolves to
/// [`EngineError::Timeout`]; a request in flight when the connection dies
/// resolves to [`EngineError::ConnectionClosed`]. Neither is retried here:
/// ids are caller-assigned and creation is idempotent on duplicates, so
/// resubmission policy belongs to the caller.
pub struct TcpEngineClient {
    writer: Mutex<OwnedWriteHalf>,
    pending: PendingMap,
    next_id: AtomicU64,
    timeout: Duration,
    reader_task: JoinHandle<()>,
}

impl TcpEngineClient {
    pub async fn connect(addr: &str, timeout: Duration) -> Result<Self, EngineError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        let (read_half, write_half) = stream.into_split();

        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let reader_task = tokio::spawn(read_loop(read_half, Arc::clone(&pending)));

        tracing::info!(addr, "connected to ledger engine");
        Ok(Self {
            writer: Mutex::new(write_half),
            pending,
            next_id: AtomicU64::new(1),
            timeout,
            reader_task,
        })
    }

    async fn call(&self, body: RequestBody) -> Result<ResponseBody, EngineError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        let frame = RequestFrame { id, body };
        {
            let mut writer = self.writer.lock().await;
            if let Err(err) = protocol::write_frame(&mut *writer, &frame).await {
                self.pending.lock().await.remove(&id);
                return Err(err);
            }
        }

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(response)) => Ok(response),
            // Sender dropped: the reader task observed a dead connection.
            Ok(Err(_)) => Err(EngineError::ConnectionClosed),
            Err(_) => {
                self.pending.lock().await.remove(&id);
                Err(EngineError::Timeout)
            }
        }
    }
}

impl Drop for TcpEngineClient {
    fn drop(&mut self) {
        self.reader_task.abort();
    }
}

async fn read_loop(mut reader: OwnedReadHalf, pending: PendingMap) {
    loop {
        match protocol::read_frame::<_, ResponseFrame>(&mut reader).await {
            Ok(frame) => {
                match pending.lock().await.remove(&frame.id) {
                    Some(tx) => {
                        // A receiver dropped by a timed-out caller is fine.
                        let _ = tx.send(frame.body);
                    }
                    None => {
                        tracing::warn!(id = frame.id, "engine response for unknown request id");
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "engine connection lost");
                // Dropping the senders wakes every in-flight caller with
                // ConnectionClosed.
                pending.lock().await.clear();
                return;
            }
        }
    }
}

fn unexpected(operation: &'static str) -> EngineError {
    EngineError::Protocol(format!("unexpected response variant for {operation}"))
}

#[async_trait]
impl LedgerEngine for TcpEngineClient {
    async fn create_accounts(
        &self,
        accounts: Vec<Account>,
    ) -> Result<Vec<CreateResult>, EngineError> {
        match self.call(RequestBody::CreateAccounts(accounts)).await? {
            ResponseBody::CreateResults(results) => Ok(results),
            _ => Err(unexpected("create_accounts")),
        }
    }

    async fn create_transfers(
        &self,
        transfers: Vec<Transfer>,
    ) -> Result<Vec<CreateResult>, EngineError> {
        match self.call(RequestBody::CreateTransfers(transfers)).await? {
            ResponseBody::CreateResults(results) => Ok(results),
            _ => Err(unexpected("create_transfers")),
        }
    }

    async fn lookup_accounts(&self, ids: Vec<u128>) -> Result<Vec<Account>, EngineError> {
        match self.call(RequestBody::LookupAccounts(ids)).await? {
            ResponseBody::Accounts(accounts) => Ok(accounts),
            _ => Err(unexpected("lookup_accounts")),
        }
    }

    async fn lookup_transfers(&self, ids: Vec<u128>) -> Result<Vec<Transfer>, EngineError> {
        match self.call(RequestBody::LookupTransfers(ids)).await? {
            ResponseBody::Transfers(transfers) => Ok(transfers),
            _ => Err(unexpected("lookup_transfers")),
        }
    }

    async fn get_account_balances(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<AccountBalance>, EngineError> {
        match self.call(RequestBody::GetAccountBalances(filter)).await? {
            ResponseBody::Balances(balances) => Ok(balances),
            _ => Err(unexpected("get_account_balances")),
        }
    }

    async fn get_account_transfers(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<Transfer>, EngineError> {
        match self.call(RequestBody::GetAccountTransfers(filter)).await? {
            ResponseBody::Transfers(transfers) => Ok(transfers),
            _ => Err(unexpected("get_account_transfers")),
        }
    }

    async fn query_accounts(&self, filter: QueryFilter) -> Result<Vec<Account>, EngineError> {
        match self.call(RequestBody::QueryAccounts(filter)).await? {
            ResponseBody::Accounts(accounts) => Ok(accounts),
            _ => Err(unexpected("query_accounts")),
        }
    }

    async fn query_transfers(&self, filter: QueryFilter) -> Result<Vec<Transfer>, EngineError> {
        match self.call(RequestBody::QueryTransfers(filter)).await? {
            ResponseBody::Transfers(transfers) => Ok(transfers),
            _ => Err(unexpected("query_transfers")),
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;

    use ledgerbridge_core::account_flags;

    use super::*;
    use crate::MemoryEngine;

    /// Serve the engine protocol for a single connection, backed by a
    /// `MemoryEngine`.
    async fn serve_one(listener: TcpListener) {
        let engine = MemoryEngine::new();
        let (stream, _) = listener.accept().await.unwrap();
        let (mut reader, writer) = stream.into_split();
        let writer = Arc::new(Mutex::new(writer));

        while let Ok(frame) = protocol::read_frame::<_, RequestFrame>(&mut reader).await {
            let engine = engine.clone();
            let writer = Arc::clone(&writer);
            tokio::spawn(async move {
                let body = match frame.body {
                    RequestBody::CreateAccounts(a) => {
                        ResponseBody::CreateResults(engine.create_accounts(a).await.unwrap())
                    }
                    RequestBody::CreateTransfers(t) => {
                        ResponseBody::CreateResults(engine.create_transfers(t).await.unwrap())
                    }
                    RequestBody::LookupAccounts(ids) => {
                        ResponseBody::Accounts(engine.lookup_accounts(ids).await.unwrap())
                    }
                    RequestBody::LookupTransfers(ids) => {
                        ResponseBody::Transfers(engine.lookup_transfers(ids).await.unwrap())
                    }
                    RequestBody::GetAccountBalances(f) => {
                        ResponseBody::Balances(engine.get_account_balances(f).await.unwrap())
                    }
                    RequestBody::GetAccountTransfers(f) => {
                        ResponseBody::Transfers(engine.get_account_transfers(f).await.unwrap())
                    }
                    RequestBody::QueryAccounts(f) => {
                        ResponseBody::Accounts(engine.query_accounts(f).await.unwrap())
                    }
                    RequestBody::QueryTransfers(f) => {
                        ResponseBody::Transfers(engine.query_transfers(f).await.unwrap())
                    }
                };
                let response = ResponseFrame { id: frame.id, body };
                let mut writer = writer.lock().await;
                protocol::write_frame(&mut *writer, &response).await.unwrap();
            });
        }
    }

    fn account(id: u128) -> Account {
        Account {
            id,
            ledger: 1,
            code: 718,
            flags: account_flags::HISTORY,
            ..Account::default()
        }
    }

    #[tokio::test]
    async fn round_trips_batches_over_one_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        tokio::spawn(serve_one(listener));

        let client = TcpEngineClient::connect(&addr, Duration::from_secs(1))
            .await
            .unwrap();

        let results = client
            .create_accounts(vec![account(1), account(2)])
            .await
            .unwrap();
        assert!(results.is_empty());

        // Concurrent in-flight requests share the connection.
        let (a, b) = tokio::join!(
            client.lookup_accounts(vec![1, 99]),
            client.lookup_accounts(vec![2])
        );
        assert_eq!(a.unwrap().len(), 1);
        assert_eq!(b.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unanswered_request_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        // Accept and hold the connection without ever replying.
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            std::mem::forget(stream);
        });

        let client = TcpEngineClient::connect(&addr, Duration::from_millis(50))
            .await
            .unwrap();

        let err = client.lookup_accounts(vec![1]).await.unwrap_err();
        assert!(matches!(err, EngineError::Timeout));
    }

    #[tokio::test]
    async fn dropped_connection_fails_in_flight_requests() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            // Close immediately after the request lands.
            tokio::time::sleep(Duration::from_millis(20)).await;
            drop(stream);
        });

        let client = TcpEngineClient::connect(&addr, Duration::from_secs(5))
            .await
            .unwrap();

        let err = client.lookup_accounts(vec![1]).await.unwrap_err();
        assert!(matches!(err, EngineError::ConnectionClosed));
    }
}
