//! Account endpoints: batch create, point lookup, balance history, transfer
//! history, and the generic query. All require the Active tier.

use std::sync::Arc;

use axum::{Extension, Json, Router, routing::post};

use ledgerbridge_core::{Account, WireUint};
use ledgerbridge_engine::LedgerEngine;

use crate::app::bridge::{self, BatchOutcome};
use crate::app::dto::{
    AccountCreateRequest, AccountFilterRequest, AccountResponse, BalanceResponse, Envelope,
    QueryFilterRequest, TransferResponse,
};
use crate::app::errors::{ApiError, ApiJson};
use crate::app::services::AppServices;
use crate::context::{self, CurrentUser};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_accounts))
        .route("/lookup", post(lookup_accounts))
        .route("/balances", post(get_account_balances))
        .route("/transfers", post(get_account_transfers))
        .route("/query", post(query_accounts))
}

/// POST /v1/accounts: batch create.
///
/// The whole batch goes to the engine as one call, in submission order; the
/// response translates the engine's sparse failure list.
pub async fn create_accounts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(body): ApiJson<Vec<AccountCreateRequest>>,
) -> Result<Json<Envelope<Vec<AccountResponse>>>, ApiError> {
    context::require_active(&current)?;

    let records: Vec<Account> = body
        .iter()
        .map(AccountCreateRequest::normalize)
        .collect::<Result<_, _>>()?;

    let results = services.engine.create_accounts(records).await?;
    Ok(Json(match bridge::classify_account_results(results) {
        BatchOutcome::Success => {
            Envelope::success("All accounts created successfully", Some(vec![]))
        }
        BatchOutcome::PartialFailure(errors) => Envelope::partial_error(
            "Some accounts failed to create",
            bridge::errors_json(&errors),
        ),
    }))
}

/// POST /v1/accounts/lookup: id list in, found records out.
pub async fn lookup_accounts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(ids): ApiJson<Vec<WireUint>>,
) -> Result<Json<Envelope<Vec<AccountResponse>>>, ApiError> {
    context::require_active(&current)?;

    let ids: Vec<u128> = ids
        .iter()
        .map(|id| id.as_u128("id"))
        .collect::<Result<_, _>>()?;

    let accounts = services.engine.lookup_accounts(ids).await?;
    let data: Vec<AccountResponse> = accounts.into_iter().map(AccountResponse::from).collect();
    Ok(Json(Envelope::success(
        format!("Found {} accounts", data.len()),
        Some(data),
    )))
}

/// POST /v1/accounts/balances: balance history for a history-tracked
/// account.
pub async fn get_account_balances(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(filter): ApiJson<AccountFilterRequest>,
) -> Result<Json<Envelope<Vec<BalanceResponse>>>, ApiError> {
    context::require_active(&current)?;

    let balances = services
        .engine
        .get_account_balances(filter.normalize()?)
        .await?;
    let data: Vec<BalanceResponse> = balances.into_iter().map(BalanceResponse::from).collect();
    Ok(Json(Envelope::success(
        "Balances retrieved successfully",
        Some(data),
    )))
}

/// POST /v1/accounts/transfers: transfers touching the account.
pub async fn get_account_transfers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(filter): ApiJson<AccountFilterRequest>,
) -> Result<Json<Envelope<Vec<TransferResponse>>>, ApiError> {
    context::require_active(&current)?;

    let transfers = services
        .engine
        .get_account_transfers(filter.normalize()?)
        .await?;
    let data: Vec<TransferResponse> = transfers.into_iter().map(TransferResponse::from).collect();
    Ok(Json(Envelope::success(
        format!("Found {} related transfers", data.len()),
        Some(data),
    )))
}

/// POST /v1/accounts/query: anchor-free filter query.
pub async fn query_accounts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(filter): ApiJson<QueryFilterRequest>,
) -> Result<Json<Envelope<Vec<AccountResponse>>>, ApiError> {
    context::require_active(&current)?;

    let accounts = services.engine.query_accounts(filter.normalize()?).await?;
    let data: Vec<AccountResponse> = accounts.into_iter().map(AccountResponse::from).collect();
    Ok(Json(Envelope::success(
        format!("Query returned {} accounts", data.len()),
        Some(data),
    )))
}
