use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Check if services are working
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    let selection = state.store.snapshot();
    status["checks"]["drivers"] = json!(selection.drivers.len());
    status["checks"]["session_empty"] = json!(selection.is_empty());

    match state.geocoder_cache {
        Some(ref cache) => {
            let stats = cache.get_stats().await;
            status["checks"]["geocoder_cache"] = json!({
                "backend": cache.backend_name(),
                "stats": stats,
            });
        }
        None => {
            status["checks"]["geocoder_cache"] = json!("disabled");
        }
    }

    Json(status)
}
