//! Request/response DTOs and the uniform response envelope.
//!
//! Inbound wide fields ride [`WireUint`] and are resolved here into the
//! canonical records; outbound wide fields always render as decimal strings
//! while narrow fields stay native numbers. The untagged union never leaves
//! this module.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use ledgerbridge_core::{
    Account, AccountBalance, AccountFilter, DEFAULT_FILTER_LIMIT, DomainError, QueryFilter,
    Transfer, WireUint, to_wire_string,
};
use ledgerbridge_store::UserRecord;

// -------------------------
// Response envelope
// -------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Error,
    PartialError,
}

/// Uniform response wrapper.
///
/// `code` is the logical status and may diverge from the transport status:
/// domain outcomes (duplicate registration, partial batch failure, admin
/// target not found) ride a 200 transport with the logical code here, while
/// auth/validation/infra failures align both.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: ResponseStatus,
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
    pub errors: Option<Vec<JsonValue>>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::Success,
            code: 200,
            message: message.into(),
            data,
            errors: None,
        }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            code,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    pub fn error_with(code: u16, message: impl Into<String>, errors: Vec<JsonValue>) -> Self {
        Self {
            status: ResponseStatus::Error,
            code,
            message: message.into(),
            data: None,
            errors: Some(errors),
        }
    }

    pub fn partial_error(message: impl Into<String>, errors: Vec<JsonValue>) -> Self {
        Self {
            status: ResponseStatus::PartialError,
            code: 400,
            message: message.into(),
            data: None,
            errors: Some(errors),
        }
    }
}

// -------------------------
// Auth / user DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListUsersParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_user_page")]
    pub limit: i64,
}

fn default_user_page() -> i64 {
    100
}

// -------------------------
// Ledger record DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AccountCreateRequest {
    pub id: WireUint,
    #[serde(default)]
    pub debits_pending: WireUint,
    #[serde(default)]
    pub debits_posted: WireUint,
    #[serde(default)]
    pub credits_pending: WireUint,
    #[serde(default)]
    pub credits_posted: WireUint,
    #[serde(default)]
    pub user_data_128: WireUint,
    #[serde(default)]
    pub user_data_64: WireUint,
    #[serde(default)]
    pub user_data_32: u32,
    pub ledger: u32,
    pub code: u16,
    #[serde(default)]
    pub flags: u16,
    #[serde(default)]
    pub timestamp: WireUint,
}

impl AccountCreateRequest {
    pub fn normalize(&self) -> Result<Account, DomainError> {
        Ok(Account {
            id: self.id.as_u128("id")?,
            debits_pending: self.debits_pending.as_u128("debits_pending")?,
            debits_posted: self.debits_posted.as_u128("debits_posted")?,
            credits_pending: self.credits_pending.as_u128("credits_pending")?,
            credits_posted: self.credits_posted.as_u128("credits_posted")?,
            user_data_128: self.user_data_128.as_u128("user_data_128")?,
            user_data_64: self.user_data_64.as_u64("user_data_64")?,
            user_data_32: self.user_data_32,
            ledger: self.ledger,
            code: self.code,
            flags: self.flags,
            timestamp: self.timestamp.as_u64("timestamp")?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub debits_pending: String,
    pub debits_posted: String,
    pub credits_pending: String,
    pub credits_posted: String,
    pub user_data_128: String,
    pub user_data_64: String,
    pub user_data_32: u32,
    pub ledger: u32,
    pub code: u16,
    pub flags: u16,
    pub timestamp: String,
}

impl From<Account> for AccountResponse {
    fn from(acc: Account) -> Self {
        Self {
            id: to_wire_string(acc.id),
            debits_pending: to_wire_string(acc.debits_pending),
            debits_posted: to_wire_string(acc.debits_posted),
            credits_pending: to_wire_string(acc.credits_pending),
            credits_posted: to_wire_string(acc.credits_posted),
            user_data_128: to_wire_string(acc.user_data_128),
            user_data_64: to_wire_string(acc.user_data_64),
            user_data_32: acc.user_data_32,
            ledger: acc.ledger,
            code: acc.code,
            flags: acc.flags,
            timestamp: to_wire_string(acc.timestamp),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransferCreateRequest {
    pub id: WireUint,
    pub debit_account_id: WireUint,
    pub credit_account_id: WireUint,
    pub amount: WireUint,
    #[serde(default)]
    pub pending_id: WireUint,
    #[serde(default)]
    pub user_data_128: WireUint,
    #[serde(default)]
    pub user_data_64: WireUint,
    #[serde(default)]
    pub user_data_32: u32,
    #[serde(default)]
    pub timeout: u32,
    pub ledger: u32,
    pub code: u16,
    #[serde(default)]
    pub flags: u16,
    #[serde(default)]
    pub timestamp: WireUint,
}

impl TransferCreateRequest {
    pub fn normalize(&self) -> Result<Transfer, DomainError> {
        Ok(Transfer {
            id: self.id.as_u128("id")?,
            debit_account_id: self.debit_account_id.as_u128("debit_account_id")?,
            credit_account_id: self.credit_account_id.as_u128("credit_account_id")?,
            amount: self.amount.as_u64("amount")?,
            pending_id: self.pending_id.as_u128("pending_id")?,
            user_data_128: self.user_data_128.as_u128("user_data_128")?,
            user_data_64: self.user_data_64.as_u64("user_data_64")?,
            user_data_32: self.user_data_32,
            timeout: self.timeout,
            ledger: self.ledger,
            code: self.code,
            flags: self.flags,
            timestamp: self.timestamp.as_u64("timestamp")?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub id: String,
    pub debit_account_id: String,
    pub credit_account_id: String,
    pub amount: String,
    pub pending_id: String,
    pub user_data_128: String,
    pub user_data_64: String,
    pub user_data_32: u32,
    pub timeout: u32,
    pub ledger: u32,
    pub code: u16,
    pub flags: u16,
    pub timestamp: String,
}

impl From<Transfer> for TransferResponse {
    fn from(t: Transfer) -> Self {
        Self {
            id: to_wire_string(t.id),
            debit_account_id: to_wire_string(t.debit_account_id),
            credit_account_id: to_wire_string(t.credit_account_id),
            amount: to_wire_string(t.amount),
            pending_id: to_wire_string(t.pending_id),
            user_data_128: to_wire_string(t.user_data_128),
            user_data_64: to_wire_string(t.user_data_64),
            user_data_32: t.user_data_32,
            timeout: t.timeout,
            ledger: t.ledger,
            code: t.code,
            flags: t.flags,
            timestamp: to_wire_string(t.timestamp),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub debits_pending: String,
    pub debits_posted: String,
    pub credits_pending: String,
    pub credits_posted: String,
    pub timestamp: String,
}

impl From<AccountBalance> for BalanceResponse {
    fn from(b: AccountBalance) -> Self {
        Self {
            debits_pending: to_wire_string(b.debits_pending),
            debits_posted: to_wire_string(b.debits_posted),
            credits_pending: to_wire_string(b.credits_pending),
            credits_posted: to_wire_string(b.credits_posted),
            timestamp: to_wire_string(b.timestamp),
        }
    }
}

// -------------------------
// Filter DTOs
// -------------------------

fn default_limit() -> u32 {
    DEFAULT_FILTER_LIMIT
}

/// Account-scoped filter. `timestamp_max` is literal: leaving it at zero
/// bounds results at timestamp zero, so callers must pass the present time
/// to see recent records.
#[derive(Debug, Deserialize)]
pub struct AccountFilterRequest {
    pub account_id: WireUint,
    #[serde(default)]
    pub user_data_128: WireUint,
    #[serde(default)]
    pub user_data_64: WireUint,
    #[serde(default)]
    pub user_data_32: u32,
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub timestamp_min: u64,
    #[serde(default)]
    pub timestamp_max: u64,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub flags: u32,
}

impl AccountFilterRequest {
    pub fn normalize(&self) -> Result<AccountFilter, DomainError> {
        Ok(AccountFilter {
            account_id: self.account_id.as_u128("account_id")?,
            user_data_128: self.user_data_128.as_u128("user_data_128")?,
            user_data_64: self.user_data_64.as_u64("user_data_64")?,
            user_data_32: self.user_data_32,
            code: self.code,
            timestamp_min: self.timestamp_min,
            timestamp_max: self.timestamp_max,
            limit: self.limit,
            flags: self.flags,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct QueryFilterRequest {
    #[serde(default)]
    pub ledger: u32,
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub user_data_128: WireUint,
    #[serde(default)]
    pub user_data_64: WireUint,
    #[serde(default)]
    pub user_data_32: u32,
    #[serde(default)]
    pub timestamp_min: u64,
    #[serde(default)]
    pub timestamp_max: u64,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub flags: u32,
}

impl QueryFilterRequest {
    pub fn normalize(&self) -> Result<QueryFilter, DomainError> {
        Ok(QueryFilter {
            ledger: self.ledger,
            code: self.code,
            user_data_128: self.user_data_128.as_u128("user_data_128")?,
            user_data_64: self.user_data_64.as_u64("user_data_64")?,
            user_data_32: self.user_data_32,
            timestamp_min: self.timestamp_min,
            timestamp_max: self.timestamp_max,
            limit: self.limit,
            flags: self.flags,
        })
    }
}
