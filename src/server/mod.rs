//! # HTTP Print Agent
//!
//! Local HTTP endpoint the laundry web app calls to print on a thermal
//! printer attached to this machine.
//!
//! ## Usage
//!
//! ```bash
//! cleanlink serve --listen 0.0.0.0:3491 --device /dev/rfcomm0 --token s3cret
//! ```
//!
//! ## Routes
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /ping` | liveness, used by the web app to find the agent |
//! | `GET /check` | open and close the configured device |
//! | `GET /devices` | list candidate printer ports |
//! | `POST /print` | compose a request and write it to the device |
//! | `POST /preview` | compose a request and return the raw bytes |
//!
//! Every route allows cross-origin calls, since the web app is served from
//! another origin.

mod handlers;
mod state;

pub use handlers::status::AGENT_NAME;
pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::CleanlinkError;

/// Build the router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/ping", get(handlers::status::ping))
        .route("/check", get(handlers::status::check))
        .route("/devices", get(handlers::status::devices))
        .route("/print", post(handlers::print::print))
        .route("/preview", post(handlers::print::preview))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use cleanlink::server::{serve, AppState, ServerConfig};
///
/// # async fn example() -> Result<(), cleanlink::error::CleanlinkError> {
/// let config = ServerConfig {
///     device: "/dev/rfcomm0".to_string(),
///     listen_addr: "0.0.0.0:3491".to_string(),
///     token: Some("s3cret".to_string()),
///     unknown_modes: Default::default(),
///     qr: Default::default(),
///     text: Default::default(),
/// };
///
/// serve(AppState::serial(config)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(state: AppState) -> Result<(), CleanlinkError> {
    let listen_addr = state.config.listen_addr.clone();

    if state.config.token.is_none() {
        tracing::warn!("no token configured, print requests are not authenticated");
    }
    tracing::info!(
        listen = %listen_addr,
        device = %state.config.device,
        unknown_modes = ?state.config.unknown_modes,
        "cleanlink agent starting"
    );

    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| CleanlinkError::Server(format!("Failed to bind to {}: {}", listen_addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| CleanlinkError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
