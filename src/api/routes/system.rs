//! System handlers: health, progress websocket, OpenAPI, action stub.

use crate::api::{ApiDoc, AppState};
use axum::{
    Json,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::{IntoResponse, Response},
};
use serde_json::json;
use tokio::sync::broadcast;
use utoipa::OpenApi;

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// POST /perform-action - Stub acknowledgment
#[utoipa::path(
    post,
    path = "/perform-action",
    tag = "system",
    responses(
        (status = 200, description = "Action acknowledged", body = crate::types::ActionOutcome)
    )
)]
pub async fn perform_action() -> impl IntoResponse {
    Json(crate::types::ActionOutcome {
        success: true,
        message: "Action performed".to_string(),
    })
}

/// GET /openapi.json - OpenAPI specification
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI 3.1 specification")
    )
)]
pub async fn openapi_spec() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// GET /progress - Websocket upgrade for progress observation
///
/// Each accepted connection becomes an observer on the progress channel and
/// receives every subsequently published event as a `{"progress": n}` text
/// frame. No events are replayed on connect.
pub async fn progress_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_progress_socket(socket, state))
}

/// Pump progress events into one websocket until either side goes away.
///
/// Dropping the broadcast receiver on return is what removes this observer
/// from the channel; a slow client lags and skips rather than stalling the
/// publisher.
async fn handle_progress_socket(mut socket: WebSocket, state: AppState) {
    let mut events = state.service.subscribe();
    tracing::debug!("progress observer connected");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let payload = match serde_json::to_string(&event) {
                        Ok(payload) => payload,
                        Err(e) => {
                            tracing::error!("failed to encode progress event: {}", e);
                            continue;
                        }
                    };
                    if socket.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "progress observer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                // inbound frames are ignored; the channel is push-only
                Some(Ok(_)) => {}
                Some(Err(_)) | None => break,
            },
        }
    }

    tracing::debug!("progress observer disconnected");
}
