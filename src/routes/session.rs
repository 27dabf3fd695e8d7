use crate::error::{AppError, Result};
use crate::models::{Driver, Location, SelectionState};
use crate::AppState;
use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

fn validate_location(location: &Option<Location>) -> Result<()> {
    if let Some(location) = location {
        location
            .coordinate
            .validate()
            .map_err(AppError::Validation)?;
    }
    Ok(())
}

/// GET /session
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SelectionState> {
    Json((*state.store.snapshot()).clone())
}

/// PUT /location/user
pub async fn set_user_location(
    State(state): State<Arc<AppState>>,
    Json(location): Json<Option<Location>>,
) -> Result<Json<SelectionState>> {
    validate_location(&location)?;
    Ok(Json((*state.store.set_user_location(location)).clone()))
}

/// PUT /location/destination
pub async fn set_destination_location(
    State(state): State<Arc<AppState>>,
    Json(location): Json<Option<Location>>,
) -> Result<Json<SelectionState>> {
    validate_location(&location)?;
    Ok(Json((*state.store.set_destination_location(location)).clone()))
}

/// PUT /drivers
/// Replace the roster. One bad entry rejects the whole roster.
pub async fn set_drivers(
    State(state): State<Arc<AppState>>,
    Json(drivers): Json<Vec<Driver>>,
) -> Result<Json<SelectionState>> {
    for driver in &drivers {
        driver.validate().map_err(AppError::Validation)?;
    }
    Ok(Json((*state.store.set_drivers(drivers)).clone()))
}

#[derive(Debug, Deserialize)]
pub struct SelectDriverRequest {
    pub driver_id: Option<i64>,
}

/// PUT /drivers/selected
pub async fn select_driver(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectDriverRequest>,
) -> Result<Json<SelectionState>> {
    let selection = state.store.select_roster_driver(request.driver_id)?;
    Ok(Json((*selection).clone()))
}

/// Failure payload forwarded from the identity provider.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderFailure {
    #[serde(default)]
    pub errors: Vec<ProviderErrorEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderErrorEntry {
    #[serde(default)]
    pub long_message: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProviderFailure {
    fn into_error(self) -> AppError {
        let message = self
            .errors
            .into_iter()
            .next()
            .and_then(|e| e.long_message.or(e.message));
        AppError::provider(message.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SignOutRequest {
    #[serde(default)]
    pub provider_error: Option<ProviderFailure>,
}

/// POST /session/sign-out
/// Clears the session, unless the identity provider reported a failure, in
/// which case the session is kept and the failure becomes a notice.
pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SelectionState>> {
    let request: SignOutRequest = if body.is_empty() {
        SignOutRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::InvalidRequest(format!("Invalid sign-out body: {}", e)))?
    };
    if let Some(failure) = request.provider_error {
        return Err(failure.into_error());
    }

    Ok(Json(clear_session(&state)))
}

/// POST /session/reset
pub async fn reset_session(State(state): State<Arc<AppState>>) -> Json<SelectionState> {
    Json(clear_session(&state))
}

/// POST /session/ride-completed
pub async fn ride_completed(State(state): State<Arc<AppState>>) -> Json<SelectionState> {
    tracing::info!("Ride completed, clearing selection");
    Json(clear_session(&state))
}

/// Empty both search fields and the store, so no field shows an address the
/// store no longer holds.
fn clear_session(state: &AppState) -> SelectionState {
    state.origin_search.reset();
    state.destination_search.reset();
    (*state.store.reset()).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PROVIDER_FALLBACK_MESSAGE;

    #[test]
    fn provider_failure_prefers_long_message() {
        let failure: ProviderFailure = serde_json::from_str(
            r#"{"errors": [{"message": "short", "longMessage": "Password is incorrect."}]}"#,
        )
        .unwrap();
        let notice = failure.into_error().notice().unwrap();
        assert_eq!(notice.message, "Password is incorrect.");
    }

    #[test]
    fn provider_failure_without_message_uses_fallback() {
        let failure: ProviderFailure = serde_json::from_str(r#"{"errors": []}"#).unwrap();
        let notice = failure.into_error().notice().unwrap();
        assert_eq!(notice.message, PROVIDER_FALLBACK_MESSAGE);
    }
}
