//! In-memory engine for tests and local development.
//!
//! Implements the same interface contract as the remote engine: per-record
//! result codes in submission order, linked chains failing together, balance
//! mutation with optional limits, history snapshots, and the literal filter
//! semantics (a zero `timestamp_max` bounds at zero).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ledgerbridge_core::result_code::{create_account_code, create_transfer_code};
use ledgerbridge_core::{
    Account, AccountBalance, AccountFilter, QueryFilter, Transfer, account_flags, filter_flags,
    query_filter_flags, transfer_flags,
};

use crate::error::EngineError;
use crate::{CreateResult, LedgerEngine};

/// Shared-handle in-memory engine. Cloning shares the underlying state.
#[derive(Clone, Default)]
pub struct MemoryEngine {
    state: Arc<Mutex<State>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Settlement {
    Posted,
    Voided,
}

#[derive(Clone)]
struct HistoryEntry {
    account_id: u128,
    /// The transfer that produced this snapshot; filters match against it.
    cause: Transfer,
    balance: AccountBalance,
}

#[derive(Clone, Default)]
struct State {
    accounts: BTreeMap<u128, Account>,
    transfers: BTreeMap<u128, Transfer>,
    settled: HashMap<u128, Settlement>,
    history: Vec<HistoryEntry>,
    clock: u64,
}

impl State {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn record_history(&mut self, account: &Account, cause: &Transfer) {
        if !account.has_flag(account_flags::HISTORY) {
            return;
        }
        self.history.push(HistoryEntry {
            account_id: account.id,
            cause: *cause,
            balance: AccountBalance {
                debits_pending: account.debits_pending,
                debits_posted: account.debits_posted,
                credits_pending: account.credits_pending,
                credits_posted: account.credits_posted,
                timestamp: cause.timestamp,
            },
        });
    }
}

/// Walk a batch chain by chain. A chain is a run of linked records plus the
/// record that closes it; if any record in a chain fails, the whole chain is
/// rolled back and every would-have-succeeded member reports `linked_failed`.
/// A chain left open at the end of the batch reports `chain_open`.
fn run_batch<R: Copy>(
    state: &mut State,
    records: &[R],
    is_linked: impl Fn(&R) -> bool,
    mut apply: impl FnMut(&mut State, &R) -> u32,
    linked_failed: u32,
    chain_open: u32,
) -> Vec<CreateResult> {
    let mut results = Vec::new();
    let mut start = 0;

    while start < records.len() {
        let mut end = start;
        while end < records.len() && is_linked(&records[end]) {
            end += 1;
        }
        if end == records.len() {
            for index in start..records.len() {
                results.push(CreateResult {
                    index: index as u32,
                    result: chain_open,
                });
            }
            break;
        }

        let chain = &records[start..=end];
        let mut trial = state.clone();
        let codes: Vec<u32> = chain.iter().map(|r| apply(&mut trial, r)).collect();

        if codes.iter().all(|&c| c == 0) {
            *state = trial;
        } else {
            for (offset, &code) in codes.iter().enumerate() {
                results.push(CreateResult {
                    index: (start + offset) as u32,
                    result: if code == 0 { linked_failed } else { code },
                });
            }
        }
        start = end + 1;
    }

    results
}

fn apply_account(state: &mut State, acc: &Account) -> u32 {
    use create_account_code as code;

    if acc.id == 0 {
        return code::ID_MUST_NOT_BE_ZERO;
    }
    if acc.id == u128::MAX {
        return code::ID_MUST_NOT_BE_INT_MAX;
    }

    let imported = acc.has_flag(account_flags::IMPORTED);
    if imported {
        if acc.timestamp == 0 {
            return code::IMPORTED_EVENT_TIMESTAMP_OUT_OF_RANGE;
        }
    } else if acc.timestamp != 0 {
        return code::TIMESTAMP_MUST_BE_ZERO;
    }

    if acc.has_flag(account_flags::CREDITS_MUST_NOT_EXCEED_DEBITS)
        && acc.has_flag(account_flags::DEBITS_MUST_NOT_EXCEED_CREDITS)
    {
        return code::FLAGS_ARE_MUTUALLY_EXCLUSIVE;
    }

    if acc.debits_pending != 0 {
        return code::DEBITS_PENDING_MUST_BE_ZERO;
    }
    if acc.debits_posted != 0 {
        return code::DEBITS_POSTED_MUST_BE_ZERO;
    }
    if acc.credits_pending != 0 {
        return code::CREDITS_PENDING_MUST_BE_ZERO;
    }
    if acc.credits_posted != 0 {
        return code::CREDITS_POSTED_MUST_BE_ZERO;
    }
    if acc.ledger == 0 {
        return code::LEDGER_MUST_NOT_BE_ZERO;
    }
    if acc.code == 0 {
        return code::CODE_MUST_NOT_BE_ZERO;
    }

    if let Some(existing) = state.accounts.get(&acc.id) {
        return if existing.flags != acc.flags {
            code::EXISTS_WITH_DIFFERENT_FLAGS
        } else if existing.user_data_128 != acc.user_data_128 {
            code::EXISTS_WITH_DIFFERENT_USER_DATA_128
        } else if existing.user_data_64 != acc.user_data_64 {
            code::EXISTS_WITH_DIFFERENT_USER_DATA_64
        } else if existing.user_data_32 != acc.user_data_32 {
            code::EXISTS_WITH_DIFFERENT_USER_DATA_32
        } else if existing.ledger != acc.ledger {
            code::EXISTS_WITH_DIFFERENT_LEDGER
        } else if existing.code != acc.code {
            code::EXISTS_WITH_DIFFERENT_CODE
        } else {
            code::EXISTS
        };
    }

    let timestamp = if imported {
        if acc.timestamp <= state.clock {
            return code::IMPORTED_EVENT_TIMESTAMP_MUST_NOT_REGRESS;
        }
        state.clock = acc.timestamp;
        acc.timestamp
    } else {
        state.tick()
    };

    let mut stored = *acc;
    stored.timestamp = timestamp;
    state.accounts.insert(stored.id, stored);
    code::OK
}

fn apply_transfer(state: &mut State, t: &Transfer) -> u32 {
    use create_transfer_code as code;
    use transfer_flags as tf;

    if t.id == 0 {
        return code::ID_MUST_NOT_BE_ZERO;
    }
    if t.id == u128::MAX {
        return code::ID_MUST_NOT_BE_INT_MAX;
    }

    let pending = t.has_flag(tf::PENDING);
    let post = t.has_flag(tf::POST_PENDING);
    let void = t.has_flag(tf::VOID_PENDING);
    if (pending && (post || void)) || (post && void) {
        return code::FLAGS_ARE_MUTUALLY_EXCLUSIVE;
    }

    let imported = t.has_flag(tf::IMPORTED);
    if imported {
        if t.timestamp == 0 {
            return code::IMPORTED_EVENT_TIMESTAMP_OUT_OF_RANGE;
        }
    } else if t.timestamp != 0 {
        return code::TIMESTAMP_MUST_BE_ZERO;
    }

    if t.debit_account_id == 0 {
        return code::DEBIT_ACCOUNT_ID_MUST_NOT_BE_ZERO;
    }
    if t.debit_account_id == u128::MAX {
        return code::DEBIT_ACCOUNT_ID_MUST_NOT_BE_INT_MAX;
    }
    if t.credit_account_id == 0 {
        return code::CREDIT_ACCOUNT_ID_MUST_NOT_BE_ZERO;
    }
    if t.credit_account_id == u128::MAX {
        return code::CREDIT_ACCOUNT_ID_MUST_NOT_BE_INT_MAX;
    }
    if t.debit_account_id == t.credit_account_id {
        return code::ACCOUNTS_MUST_BE_DIFFERENT;
    }

    if post || void {
        if t.pending_id == 0 {
            return code::PENDING_ID_MUST_NOT_BE_ZERO;
        }
        if t.pending_id == u128::MAX {
            return code::PENDING_ID_MUST_NOT_BE_INT_MAX;
        }
        if t.pending_id == t.id {
            return code::PENDING_ID_MUST_BE_DIFFERENT;
        }
    } else if t.pending_id != 0 {
        return code::PENDING_ID_MUST_BE_ZERO;
    }

    if !pending && t.timeout != 0 {
        return code::TIMEOUT_RESERVED_FOR_PENDING_TRANSFER;
    }
    if t.amount == 0 {
        return code::AMOUNT_MUST_NOT_BE_ZERO;
    }
    if t.ledger == 0 {
        return code::LEDGER_MUST_NOT_BE_ZERO;
    }
    if t.code == 0 {
        return code::CODE_MUST_NOT_BE_ZERO;
    }

    if let Some(existing) = state.transfers.get(&t.id) {
        return if existing.flags != t.flags {
            code::EXISTS_WITH_DIFFERENT_FLAGS
        } else if existing.debit_account_id != t.debit_account_id {
            code::EXISTS_WITH_DIFFERENT_DEBIT_ACCOUNT_ID
        } else if existing.credit_account_id != t.credit_account_id {
            code::EXISTS_WITH_DIFFERENT_CREDIT_ACCOUNT_ID
        } else if existing.amount != t.amount {
            code::EXISTS_WITH_DIFFERENT_AMOUNT
        } else if existing.pending_id != t.pending_id {
            code::EXISTS_WITH_DIFFERENT_PENDING_ID
        } else if existing.user_data_128 != t.user_data_128 {
            code::EXISTS_WITH_DIFFERENT_USER_DATA_128
        } else if existing.user_data_64 != t.user_data_64 {
            code::EXISTS_WITH_DIFFERENT_USER_DATA_64
        } else if existing.user_data_32 != t.user_data_32 {
            code::EXISTS_WITH_DIFFERENT_USER_DATA_32
        } else if existing.timeout != t.timeout {
            code::EXISTS_WITH_DIFFERENT_TIMEOUT
        } else if existing.code != t.code {
            code::EXISTS_WITH_DIFFERENT_CODE
        } else {
            code::EXISTS
        };
    }

    let Some(mut debit) = state.accounts.get(&t.debit_account_id).copied() else {
        return code::DEBIT_ACCOUNT_NOT_FOUND;
    };
    let Some(mut credit) = state.accounts.get(&t.credit_account_id).copied() else {
        return code::CREDIT_ACCOUNT_NOT_FOUND;
    };
    if debit.ledger != credit.ledger {
        return code::ACCOUNTS_MUST_HAVE_THE_SAME_LEDGER;
    }
    if t.ledger != debit.ledger {
        return code::TRANSFER_MUST_HAVE_THE_SAME_LEDGER_AS_ACCOUNTS;
    }

    let amount = u128::from(t.amount);

    let pending_original = if post || void {
        let Some(p) = state.transfers.get(&t.pending_id).copied() else {
            return code::PENDING_TRANSFER_NOT_FOUND;
        };
        if !p.has_flag(tf::PENDING) {
            return code::PENDING_TRANSFER_NOT_PENDING;
        }
        if p.debit_account_id != t.debit_account_id {
            return code::PENDING_TRANSFER_HAS_DIFFERENT_DEBIT_ACCOUNT_ID;
        }
        if p.credit_account_id != t.credit_account_id {
            return code::PENDING_TRANSFER_HAS_DIFFERENT_CREDIT_ACCOUNT_ID;
        }
        if p.ledger != t.ledger {
            return code::PENDING_TRANSFER_HAS_DIFFERENT_LEDGER;
        }
        if p.code != t.code {
            return code::PENDING_TRANSFER_HAS_DIFFERENT_CODE;
        }
        match state.settled.get(&t.pending_id) {
            Some(Settlement::Posted) => return code::PENDING_TRANSFER_ALREADY_POSTED,
            Some(Settlement::Voided) => return code::PENDING_TRANSFER_ALREADY_VOIDED,
            None => {}
        }
        if post && t.amount > p.amount {
            return code::EXCEEDS_PENDING_TRANSFER_AMOUNT;
        }
        if void && t.amount != p.amount {
            return code::PENDING_TRANSFER_HAS_DIFFERENT_AMOUNT;
        }
        Some(p)
    } else {
        None
    };

    // Balance limits apply where the batch adds new exposure; settling a
    // reservation does not.
    if !post && !void {
        let debit_exposure = debit
            .debits_pending
            .saturating_add(debit.debits_posted)
            .saturating_add(amount);
        if debit.has_flag(account_flags::DEBITS_MUST_NOT_EXCEED_CREDITS)
            && debit_exposure > debit.credits_posted
        {
            return code::EXCEEDS_CREDITS;
        }
        let credit_exposure = credit
            .credits_pending
            .saturating_add(credit.credits_posted)
            .saturating_add(amount);
        if credit.has_flag(account_flags::CREDITS_MUST_NOT_EXCEED_DEBITS)
            && credit_exposure > credit.debits_posted
        {
            return code::EXCEEDS_DEBITS;
        }
    }

    let timestamp = if imported {
        if t.timestamp <= state.clock {
            return code::IMPORTED_EVENT_TIMESTAMP_MUST_NOT_REGRESS;
        }
        state.clock = t.timestamp;
        t.timestamp
    } else {
        state.tick()
    };

    if pending {
        let Some(dp) = debit.debits_pending.checked_add(amount) else {
            return code::OVERFLOWS_DEBITS_PENDING;
        };
        let Some(cp) = credit.credits_pending.checked_add(amount) else {
            return code::OVERFLOWS_CREDITS_PENDING;
        };
        debit.debits_pending = dp;
        credit.credits_pending = cp;
    } else if let Some(p) = pending_original {
        let reserved = u128::from(p.amount);
        debit.debits_pending = debit.debits_pending.saturating_sub(reserved);
        credit.credits_pending = credit.credits_pending.saturating_sub(reserved);
        if post {
            let Some(dp) = debit.debits_posted.checked_add(amount) else {
                return code::OVERFLOWS_DEBITS_POSTED;
            };
            let Some(cp) = credit.credits_posted.checked_add(amount) else {
                return code::OVERFLOWS_CREDITS_POSTED;
            };
            debit.debits_posted = dp;
            credit.credits_posted = cp;
            state.settled.insert(t.pending_id, Settlement::Posted);
        } else {
            state.settled.insert(t.pending_id, Settlement::Voided);
        }
    } else {
        let Some(dp) = debit.debits_posted.checked_add(amount) else {
            return code::OVERFLOWS_DEBITS_POSTED;
        };
        let Some(cp) = credit.credits_posted.checked_add(amount) else {
            return code::OVERFLOWS_CREDITS_POSTED;
        };
        debit.debits_posted = dp;
        credit.credits_posted = cp;
    }

    state.accounts.insert(debit.id, debit);
    state.accounts.insert(credit.id, credit);

    let mut stored = *t;
    stored.timestamp = timestamp;
    state.transfers.insert(stored.id, stored);

    state.record_history(&debit, &stored);
    state.record_history(&credit, &stored);
    code::OK
}

/// Side and field matching for account-scoped filters. Zero-valued
/// user_data/code fields are "don't care"; timestamps are matched literally.
fn account_filter_matches(t: &Transfer, f: &AccountFilter) -> bool {
    let side_mask = f.flags & (filter_flags::DEBITS | filter_flags::CREDITS);
    let debit_ok = t.debit_account_id == f.account_id
        && (side_mask == 0 || f.flags & filter_flags::DEBITS != 0);
    let credit_ok = t.credit_account_id == f.account_id
        && (side_mask == 0 || f.flags & filter_flags::CREDITS != 0);

    (debit_ok || credit_ok)
        && (f.user_data_128 == 0 || t.user_data_128 == f.user_data_128)
        && (f.user_data_64 == 0 || t.user_data_64 == f.user_data_64)
        && (f.user_data_32 == 0 || t.user_data_32 == f.user_data_32)
        && (f.code == 0 || t.code == f.code)
        && t.timestamp >= f.timestamp_min
        && t.timestamp <= f.timestamp_max
}

fn bounded<T>(mut items: Vec<T>, limit: u32, reversed: bool) -> Vec<T> {
    if reversed {
        items.reverse();
    }
    items.truncate(limit as usize);
    items
}

#[async_trait]
impl LedgerEngine for MemoryEngine {
    async fn create_accounts(
        &self,
        accounts: Vec<Account>,
    ) -> Result<Vec<CreateResult>, EngineError> {
        let mut state = self.state.lock().await;
        Ok(run_batch(
            &mut state,
            &accounts,
            |a| a.has_flag(account_flags::LINKED),
            apply_account,
            create_account_code::LINKED_EVENT_FAILED,
            create_account_code::LINKED_EVENT_CHAIN_OPEN,
        ))
    }

    async fn create_transfers(
        &self,
        transfers: Vec<Transfer>,
    ) -> Result<Vec<CreateResult>, EngineError> {
        let mut state = self.state.lock().await;
        Ok(run_batch(
            &mut state,
            &transfers,
            |t| t.has_flag(transfer_flags::LINKED),
            apply_transfer,
            create_transfer_code::LINKED_EVENT_FAILED,
            create_transfer_code::LINKED_EVENT_CHAIN_OPEN,
        ))
    }

    async fn lookup_accounts(&self, ids: Vec<u128>) -> Result<Vec<Account>, EngineError> {
        let state = self.state.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.accounts.get(id).copied())
            .collect())
    }

    async fn lookup_transfers(&self, ids: Vec<u128>) -> Result<Vec<Transfer>, EngineError> {
        let state = self.state.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.transfers.get(id).copied())
            .collect())
    }

    async fn get_account_balances(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<AccountBalance>, EngineError> {
        let state = self.state.lock().await;
        let snapshots: Vec<AccountBalance> = state
            .history
            .iter()
            .filter(|entry| {
                entry.account_id == filter.account_id
                    && account_filter_matches(&entry.cause, &filter)
            })
            .map(|entry| entry.balance)
            .collect();
        Ok(bounded(
            snapshots,
            filter.limit,
            filter.flags & filter_flags::REVERSED != 0,
        ))
    }

    async fn get_account_transfers(
        &self,
        filter: AccountFilter,
    ) -> Result<Vec<Transfer>, EngineError> {
        let state = self.state.lock().await;
        let mut transfers: Vec<Transfer> = state
            .transfers
            .values()
            .filter(|t| account_filter_matches(t, &filter))
            .copied()
            .collect();
        transfers.sort_by_key(|t| t.timestamp);
        Ok(bounded(
            transfers,
            filter.limit,
            filter.flags & filter_flags::REVERSED != 0,
        ))
    }

    async fn query_accounts(&self, filter: QueryFilter) -> Result<Vec<Account>, EngineError> {
        let state = self.state.lock().await;
        let mut accounts: Vec<Account> = state
            .accounts
            .values()
            .filter(|a| {
                (filter.ledger == 0 || a.ledger == filter.ledger)
                    && (filter.code == 0 || a.code == filter.code)
                    && (filter.user_data_128 == 0 || a.user_data_128 == filter.user_data_128)
                    && (filter.user_data_64 == 0 || a.user_data_64 == filter.user_data_64)
                    && (filter.user_data_32 == 0 || a.user_data_32 == filter.user_data_32)
                    && a.timestamp >= filter.timestamp_min
                    && a.timestamp <= filter.timestamp_max
            })
            .copied()
            .collect();
        accounts.sort_by_key(|a| a.timestamp);
        Ok(bounded(
            accounts,
            filter.limit,
            filter.flags & query_filter_flags::REVERSED != 0,
        ))
    }

    async fn query_transfers(&self, filter: QueryFilter) -> Result<Vec<Transfer>, EngineError> {
        let state = self.state.lock().await;
        let mut transfers: Vec<Transfer> = state
            .transfers
            .values()
            .filter(|t| {
                (filter.ledger == 0 || t.ledger == filter.ledger)
                    && (filter.code == 0 || t.code == filter.code)
                    && (filter.user_data_128 == 0 || t.user_data_128 == filter.user_data_128)
                    && (filter.user_data_64 == 0 || t.user_data_64 == filter.user_data_64)
                    && (filter.user_data_32 == 0 || t.user_data_32 == filter.user_data_32)
                    && t.timestamp >= filter.timestamp_min
                    && t.timestamp <= filter.timestamp_max
            })
            .copied()
            .collect();
        transfers.sort_by_key(|t| t.timestamp);
        Ok(bounded(
            transfers,
            filter.limit,
            filter.flags & query_filter_flags::REVERSED != 0,
        ))
    }
}
