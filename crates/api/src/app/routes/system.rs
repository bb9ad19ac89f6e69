use axum::Json;
use chrono::Utc;

/// Liveness only; no auth, no dependencies touched.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().timestamp(),
    }))
}
