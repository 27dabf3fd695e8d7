use crate::error::Result;
use crate::models::{Location, SearchField, SelectedPlace};
use crate::services::autocomplete::SearchView;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub index: usize,
}

/// GET /search/{field}
pub async fn get_search(
    State(state): State<Arc<AppState>>,
    Path(field): Path<SearchField>,
) -> Json<SearchView> {
    Json(state.search(field).view())
}

/// POST /search/{field}/text
/// Feed the field's current text. Results show up on later GETs once the
/// debounce elapses and the geocoder answers.
pub async fn update_text(
    State(state): State<Arc<AppState>>,
    Path(field): Path<SearchField>,
    Json(request): Json<TextRequest>,
) -> Json<SearchView> {
    let search = state.search(field);
    search.on_text_change(&request.text);
    Json(search.view())
}

/// POST /search/{field}/select
/// Pick one of the visible predictions and store it as the field's location
pub async fn select_prediction(
    State(state): State<Arc<AppState>>,
    Path(field): Path<SearchField>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<SelectedPlace>> {
    let store = state.store.clone();
    let place = state.search(field).select_index(request.index, |place| {
        let location = Location::new(place.coordinate(), Some(place.address.clone()));
        match field {
            SearchField::Origin => store.set_user_location(Some(location)),
            SearchField::Destination => store.set_destination_location(Some(location)),
        };
    })?;

    tracing::info!(
        field = ?field,
        "Selected '{}' at ({:.4}, {:.4})",
        place.address, place.latitude, place.longitude
    );

    Ok(Json(place))
}
