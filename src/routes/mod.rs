pub mod debug;
pub mod map;
pub mod search;
pub mod session;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/map", get(map::get_map))
        .route("/session", get(session::get_session))
        .route("/session/reset", post(session::reset_session))
        .route("/session/sign-out", post(session::sign_out))
        .route("/session/ride-completed", post(session::ride_completed))
        .route("/location/user", put(session::set_user_location))
        .route("/location/destination", put(session::set_destination_location))
        .route("/drivers", put(session::set_drivers))
        .route("/drivers/selected", put(session::select_driver))
        .route("/search/{field}", get(search::get_search))
        .route("/search/{field}/text", post(search::update_text))
        .route("/search/{field}/select", post(search::select_prediction))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
