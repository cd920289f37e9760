//! Liveness, device check and device listing.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;

use super::super::state::AppState;
use super::{ApiError, join_error};

/// Name reported by `/ping` so web clients can recognize the agent.
pub const AGENT_NAME: &str = "cleanlink-printer";

/// Handle GET /ping.
pub async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok", "agent": AGENT_NAME }))
}

/// Handle GET /check - probe the configured device.
///
/// Always answers 200; the outcome is in the `status` field. Waits for any
/// job in progress, since COM ports only admit one open handle.
pub async fn check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let device = state.config.device.clone();
    let transport = state.transport.clone();
    let guard = state.locks.acquire(&device).await;
    let probe = {
        let device = device.clone();
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            transport.probe(&device)
        })
        .await
    };

    let body = match probe {
        Ok(Ok(())) => json!({
            "status": "ok",
            "message": "Printer detected and accessible",
            "com": device,
        }),
        Ok(Err(e)) => {
            tracing::warn!(device = %device, error = %e, "printer check failed");
            json!({ "status": "error", "message": e.to_string(), "com": device })
        }
        Err(e) => json!({
            "status": "error",
            "message": format!("Task error: {e}"),
            "com": device,
        }),
    };
    Json(body)
}

/// Handle GET /devices - list candidate printer devices.
///
/// Discovery may open the configured device, so it runs under that
/// device's lock.
pub async fn devices(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let discovery = state.discovery.clone();
    let guard = state.locks.acquire(&state.config.device).await;
    let devices = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        discovery.discover()
    })
    .await
    .map_err(join_error)??;

    tracing::debug!(count = devices.len(), "devices discovered");
    Ok(Json(json!({ "status": "ok", "devices": devices })))
}
