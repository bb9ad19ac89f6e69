use serde::{Deserialize, Serialize};

/// Transfer flag bits.
pub mod transfer_flags {
    pub const LINKED: u16 = 1 << 0;
    /// Reserve balance now; a later post or void settles it.
    pub const PENDING: u16 = 1 << 1;
    pub const POST_PENDING: u16 = 1 << 2;
    pub const VOID_PENDING: u16 = 1 << 3;
    pub const IMPORTED: u16 = 1 << 4;
}

/// Canonical transfer record.
///
/// Transfers are append-only facts: they never mutate after creation, they
/// mutate the two accounts they reference. Post/void transfers reference the
/// earlier pending transfer through `pending_id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: u128,
    pub debit_account_id: u128,
    pub credit_account_id: u128,
    pub amount: u64,
    pub pending_id: u128,
    pub user_data_128: u128,
    pub user_data_64: u64,
    pub user_data_32: u32,
    /// Seconds before a pending transfer expires; meaningful only with the
    /// pending flag.
    pub timeout: u32,
    pub ledger: u32,
    pub code: u16,
    pub flags: u16,
    pub timestamp: u64,
}

impl Transfer {
    pub fn has_flag(&self, bit: u16) -> bool {
        self.flags & bit != 0
    }
}
