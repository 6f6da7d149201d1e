//! HTTP handlers for the notification intake service

use axum::{
    Json,
    body::Bytes,
    extract::State as AxumState,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::{error, info};

use crate::SharedState;
use crate::error::NotifyError;

pub async fn root() -> &'static str {
    "build_notify"
}

/// Handles the build event POST request: one event in, one card out.
pub async fn handle_event(
    AxumState(state): AxumState<SharedState>,
    body: Bytes,
) -> impl IntoResponse {
    state.received.fetch_add(1, Ordering::Relaxed);

    let event: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            info!("Could not parse JSON body: {:?}", e);
            state.failed.fetch_add(1, Ordering::Relaxed);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("invalid JSON body: {}", e) })),
            );
        }
    };

    match state.notifier.handle(&event).await {
        Ok(result) => {
            if result.delivered {
                state.delivered.fetch_add(1, Ordering::Relaxed);
            } else {
                state.failed.fetch_add(1, Ordering::Relaxed);
            }
            (StatusCode::OK, Json(json!(result)))
        }
        Err(NotifyError::MalformedEvent(msg)) => {
            error!("Rejected malformed event: {}", msg);
            state.failed.fetch_add(1, Ordering::Relaxed);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("malformed event: {}", msg) })),
            )
        }
        Err(e) => {
            error!("Invocation failed: {}", e);
            state.failed.fetch_add(1, Ordering::Relaxed);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

/// Returns the current server status with invocation counters
pub async fn status(AxumState(state): AxumState<SharedState>) -> impl IntoResponse {
    Json(json!({
        "server": {
            "name": "build_notify",
            "version": env!("CARGO_PKG_VERSION"),
            "started_at": state.started_at,
            "uptime_seconds": state.start_time.elapsed().as_secs(),
        },
        "invocations": {
            "received": state.received.load(Ordering::Relaxed),
            "delivered": state.delivered.load(Ordering::Relaxed),
            "failed": state.failed.load(Ordering::Relaxed),
        }
    }))
}
