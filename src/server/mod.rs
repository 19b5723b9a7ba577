//! HTTP surface: the monitoring service posts transition events here and
//! clients read the registry, the live notification and the last
//! transient status message.

mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/landmarks", get(handlers::landmark_list))
        .route("/api/geofences", get(handlers::geofences))
        .route("/api/events", post(handlers::post_event))
        .route(
            "/api/notification",
            get(handlers::current_notification).delete(handlers::dismiss_notification),
        )
        .route("/api/status/registration", post(handlers::registration_status))
        .route("/api/status/connection", post(handlers::connection_failure))
        .route("/api/status/permission-denied", post(handlers::permission_denied))
        .route("/api/flash", get(handlers::last_flash))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, state: Arc<AppState>) -> std::io::Result<()> {
    let app = build_router(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("geofence server listening on http://{} (Ctrl+C to stop)", addr);

    axum::serve(listener, app).await
}
