//! Binary wire protocol for the engine connection.
//!
//! Frames are a little-endian `u32` length prefix followed by a bincode
//! body. Every request carries a correlation id and responses may come back
//! in any order; the client matches them up, which is what lets one
//! connection serve many in-flight requests.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use ledgerbridge_core::{Account, AccountBalance, AccountFilter, QueryFilter, Transfer};

use crate::CreateResult;
use crate::error::EngineError;

/// Upper bound on a frame body; anything larger is a protocol violation.
pub const MAX_FRAME_LEN: u32 = 16 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RequestBody {
    CreateAccounts(Vec<Account>),
    CreateTransfers(Vec<Transfer>),
    LookupAccounts(Vec<u128>),
    LookupTransfers(Vec<u128>),
    GetAccountBalances(AccountFilter),
    GetAccountTransfers(AccountFilter),
    QueryAccounts(QueryFilter),
    QueryTransfers(QueryFilter),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResponseBody {
    CreateResults(Vec<CreateResult>),
    Accounts(Vec<Account>),
    Transfers(Vec<Transfer>),
    Balances(Vec<AccountBalance>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestFrame {
    pub id: u64,
    pub body: RequestBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFrame {
    pub id: u64,
    pub body: ResponseBody,
}

pub async fn write_frame<W, T>(writer: &mut W, frame: &T) -> Result<(), EngineError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let body = bincode::serialize(frame).map_err(|e| EngineError::Protocol(e.to_string()))?;
    let len = u32::try_from(body.len())
        .ok()
        .filter(|len| *len <= MAX_FRAME_LEN)
        .ok_or_else(|| EngineError::Protocol(format!("frame of {} bytes too large", body.len())))?;

    writer.write_all(&len.to_le_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn read_frame<R, T>(reader: &mut R) -> Result<T, EngineError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes).await?;
    let len = u32::from_le_bytes(len_bytes);
    if len > MAX_FRAME_LEN {
        return Err(EngineError::Protocol(format!(
            "frame of {len} bytes exceeds limit"
        )));
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;
    bincode::deserialize(&body).map_err(|e| EngineError::Protocol(e.to_string()))
}
