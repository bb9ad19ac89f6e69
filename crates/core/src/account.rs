use serde::{Deserialize, Serialize};

/// Account flag bits.
///
/// Bit 4 (`IMPORTED`) hands timestamp assignment to the caller for
/// backfilling historical data; every other record gets its timestamp from
/// the engine.
pub mod account_flags {
    pub const LINKED: u16 = 1 << 0;
    pub const CREDITS_MUST_NOT_EXCEED_DEBITS: u16 = 1 << 1;
    pub const DEBITS_MUST_NOT_EXCEED_CREDITS: u16 = 1 << 2;
    pub const HISTORY: u16 = 1 << 3;
    pub const IMPORTED: u16 = 1 << 4;
}

/// Canonical account record, as the engine stores it.
///
/// All four balance fields must be zero at creation time; afterwards they are
/// mutated exclusively by transfers referencing the account. Everything else
/// is immutable once created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: u128,
    pub debits_pending: u128,
    pub debits_posted: u128,
    pub credits_pending: u128,
    pub credits_posted: u128,
    /// Opaque secondary identifiers; the engine attaches no meaning.
    pub user_data_128: u128,
    pub user_data_64: u64,
    pub user_data_32: u32,
    pub ledger: u32,
    /// Chart-of-accounts classification.
    pub code: u16,
    pub flags: u16,
    /// Engine-assigned unless the imported flag is set.
    pub timestamp: u64,
}

impl Account {
    pub fn has_flag(&self, bit: u16) -> bool {
        self.flags & bit != 0
    }
}

/// Point-in-time balance snapshot for a history-tracked account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub debits_pending: u128,
    pub debits_posted: u128,
    pub credits_pending: u128,
    pub credits_posted: u128,
    pub timestamp: u64,
}
