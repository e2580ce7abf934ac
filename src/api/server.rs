use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

/// GET /api/health - 健康检查
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let database_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    if !database_ok {
        tracing::warn!("Health check: database unreachable");
    }

    let status = if database_ok { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (
        status,
        Json(json!({
            "status": if database_ok { "ok" } else { "degraded" },
            "version": env!("CARGO_PKG_VERSION"),
            "build_time": env!("BUILD_TIME"),
        })),
    )
}
