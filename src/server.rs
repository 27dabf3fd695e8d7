use crate::config::Config;
use crate::AppState;

use axum::Router;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct ServerHandle {
    pub port: u16,
    pub shutdown_tx: oneshot::Sender<()>,
}

/// Router with the API nested under `/api/v1`, permissive CORS and request
/// tracing.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api/v1", crate::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Start the API on a background task. Port 0 binds an ephemeral port; the
/// handle carries the one actually bound.
pub async fn start_server(
    config: Config,
) -> Result<ServerHandle, Box<dyn std::error::Error + Send + Sync>> {
    let state = Arc::new(AppState::from_config(&config));
    let app = build_app(state);

    // Bind listener
    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();
    tracing::info!("Server listening on http://{}:{}", config.host, actual_port);

    // Graceful shutdown channel
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
        {
            tracing::error!("Server stopped with error: {}", e);
        }
    });

    Ok(ServerHandle {
        port: actual_port,
        shutdown_tx,
    })
}
