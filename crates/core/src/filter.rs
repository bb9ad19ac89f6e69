use serde::{Deserialize, Serialize};

/// Applied when a caller leaves `limit` unspecified. The bridge never raises
/// this ceiling on its own.
pub const DEFAULT_FILTER_LIMIT: u32 = 10;

/// Flag bits for [`AccountFilter`].
pub mod filter_flags {
    /// Match transfers where the account is on the debit side.
    pub const DEBITS: u32 = 1 << 0;
    /// Match transfers where the account is on the credit side.
    pub const CREDITS: u32 = 1 << 1;
    /// Return results newest-first.
    pub const REVERSED: u32 = 1 << 2;
}

/// Account-scoped filter for balance history and transfer history.
///
/// The engine filters literally on the fields given: a `timestamp_max` of
/// zero is a real upper bound of zero, NOT "unbounded", so a default-valued
/// filter matches nothing. Callers that want recent records must pass the
/// present time explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFilter {
    pub account_id: u128,
    pub user_data_128: u128,
    pub user_data_64: u64,
    pub user_data_32: u32,
    pub code: u16,
    pub timestamp_min: u64,
    pub timestamp_max: u64,
    pub limit: u32,
    pub flags: u32,
}

impl Default for AccountFilter {
    fn default() -> Self {
        Self {
            account_id: 0,
            user_data_128: 0,
            user_data_64: 0,
            user_data_32: 0,
            code: 0,
            timestamp_min: 0,
            timestamp_max: 0,
            limit: DEFAULT_FILTER_LIMIT,
            flags: 0,
        }
    }
}

/// Flag bits for [`QueryFilter`].
pub mod query_filter_flags {
    /// Return results newest-first.
    pub const REVERSED: u32 = 1 << 0;
}

/// Anchor-free filter for the generic account/transfer queries.
///
/// Same literal timestamp semantics as [`AccountFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub ledger: u32,
    pub code: u16,
    pub user_data_128: u128,
    pub user_data_64: u64,
    pub user_data_32: u32,
    pub timestamp_min: u64,
    pub timestamp_max: u64,
    pub limit: u32,
    pub flags: u32,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            ledger: 0,
            code: 0,
            user_data_128: 0,
            user_data_64: 0,
            user_data_32: 0,
            timestamp_min: 0,
            timestamp_max: 0,
            limit: DEFAULT_FILTER_LIMIT,
            flags: 0,
        }
    }
}
