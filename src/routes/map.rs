use crate::models::MapSnapshot;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /map
/// Region and markers for the current selection, recomputed on every call
pub async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapSnapshot> {
    let selection = state.store.snapshot();
    let snapshot = state.projector.project(&selection);

    tracing::debug!(
        markers = snapshot.markers.len(),
        "Map snapshot: center ({:.4}, {:.4}), {} markers",
        snapshot.region.latitude, snapshot.region.longitude, snapshot.markers.len()
    );

    Json(snapshot)
}
