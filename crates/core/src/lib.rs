//! `ledgerbridge-core`: pure wire/domain types for the ledger bridge.
//!
//! This crate is intentionally free of I/O: the boundary numeric union and
//! its normalization into fixed-width integers, the canonical account and
//! transfer records, filter shapes, and the engine result-code tables.

pub mod account;
pub mod error;
pub mod filter;
pub mod result_code;
pub mod transfer;
pub mod wire;

pub use account::{Account, AccountBalance, account_flags};
pub use error::{DomainError, DomainResult};
pub use filter::{AccountFilter, DEFAULT_FILTER_LIMIT, QueryFilter, filter_flags, query_filter_flags};
pub use transfer::{Transfer, transfer_flags};
pub use wire::{WireUint, to_wire_string};
