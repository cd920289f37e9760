//! Print and preview handlers.
//!
//! Both take the raw body and decode it themselves so any malformed JSON is a
//! 400, whatever the Content-Type header says.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::header,
    response::IntoResponse,
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::error::CleanlinkError;
use crate::mode::Mode;
use crate::request::PrintRequest;

use super::super::state::AppState;
use super::{ApiError, join_error};

/// Decode, authorize and resolve a request.
fn accept(state: &AppState, body: &[u8]) -> Result<(PrintRequest, Mode), ApiError> {
    let request: PrintRequest = serde_json::from_slice(body).map_err(CleanlinkError::from)?;

    if !state.authorized(&request.token) {
        tracing::warn!("print request rejected: bad token");
        return Err(CleanlinkError::Unauthorized.into());
    }

    let mode = state.resolver.resolve(&request)?;
    Ok((request, mode))
}

/// Handle POST /print - compose the job and write it to the configured device.
pub async fn print(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let (request, mode) = accept(&state, &body)?;
    let device = state.config.device.clone();

    // Held until the write finishes so jobs for one device never interleave.
    let guard = state.locks.acquire(&device).await;

    let task_state = state.clone();
    let task_device = device.clone();
    let written = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        let data = task_state.composer.compose_bytes(&request, mode);
        if data.is_empty() {
            return Err(CleanlinkError::NothingToPrint(mode));
        }
        task_state.transport.send(&task_device, &data)?;
        Ok(data.len())
    })
    .await
    .map_err(join_error)?;

    match written {
        Ok(bytes) => {
            tracing::info!(device = %device, mode = %mode, bytes, "job printed");
            Ok(Json(json!({
                "status": "printed",
                "com": device,
                "mode": mode.as_str(),
                "bytes": bytes,
            })))
        }
        Err(e) => {
            tracing::error!(device = %device, mode = %mode, error = %e, "print failed");
            Err(e.into())
        }
    }
}

/// Handle POST /preview - return the composed bytes without printing.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let (request, mode) = accept(&state, &body)?;

    let data = state.composer.compose_bytes(&request, mode);
    if data.is_empty() {
        return Err(CleanlinkError::NothingToPrint(mode).into());
    }

    tracing::debug!(mode = %mode, bytes = data.len(), "preview composed");
    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], data))
}
