//! Transfer endpoints: batch create, point lookup, and the generic query.
//! All require the Active tier.

use std::sync::Arc;

use axum::{Extension, Json, Router, routing::post};

use ledgerbridge_core::{Transfer, WireUint};
use ledgerbridge_engine::LedgerEngine;

use crate::app::bridge::{self, BatchOutcome};
use crate::app::dto::{Envelope, QueryFilterRequest, TransferCreateRequest, TransferResponse};
use crate::app::errors::{ApiError, ApiJson};
use crate::app::services::AppServices;
use crate::context::{self, CurrentUser};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_transfers))
        .route("/lookup", post(lookup_transfers))
        .route("/query", post(query_transfers))
}

/// POST /v1/transfers: batch create, one engine call, submission order
/// preserved.
pub async fn create_transfers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(body): ApiJson<Vec<TransferCreateRequest>>,
) -> Result<Json<Envelope<Vec<TransferResponse>>>, ApiError> {
    context::require_active(&current)?;

    let records: Vec<Transfer> = body
        .iter()
        .map(TransferCreateRequest::normalize)
        .collect::<Result<_, _>>()?;

    let results = services.engine.create_transfers(records).await?;
    Ok(Json(match bridge::classify_transfer_results(results) {
        BatchOutcome::Success => {
            Envelope::success("All transfers created successfully", Some(vec![]))
        }
        BatchOutcome::PartialFailure(errors) => Envelope::partial_error(
            "Some transfers failed to create",
            bridge::errors_json(&errors),
        ),
    }))
}

/// POST /v1/transfers/lookup
pub async fn lookup_transfers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(ids): ApiJson<Vec<WireUint>>,
) -> Result<Json<Envelope<Vec<TransferResponse>>>, ApiError> {
    context::require_active(&current)?;

    let ids: Vec<u128> = ids
        .iter()
        .map(|id| id.as_u128("id"))
        .collect::<Result<_, _>>()?;

    let transfers = services.engine.lookup_transfers(ids).await?;
    let data: Vec<TransferResponse> = transfers.into_iter().map(TransferResponse::from).collect();
    Ok(Json(Envelope::success(
        format!("Found {} transfers", data.len()),
        Some(data),
    )))
}

/// POST /v1/transfers/query
pub async fn query_transfers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(filter): ApiJson<QueryFilterRequest>,
) -> Result<Json<Envelope<Vec<TransferResponse>>>, ApiError> {
    context::require_active(&current)?;

    let transfers = services.engine.query_transfers(filter.normalize()?).await?;
    let data: Vec<TransferResponse> = transfers.into_iter().map(TransferResponse::from).collect();
    Ok(Json(Envelope::success(
        format!("Query returned {} transfers", data.len()),
        Some(data),
    )))
}
