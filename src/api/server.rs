use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

/// GET /api/health - 健康检查
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let uptime = (chrono::Utc::now() - state.started_at).num_seconds();

    Json(json!({
        "status": "ok",
        "message": "Dish search service is running",
        "version": env!("CARGO_PKG_VERSION"),
        "build_time": env!("BUILD_TIME"),
        "uptime_seconds": uptime,
    }))
}
