//! HTTP server
//!
//! Endpoints:
//! - `POST /webhook` - Cloudflare notification webhooks (tunnel health)
//! - `GET /healthz` - liveness probe
//!
//! The webhook handler shares the integration context with the resync
//! loop through a mutex, so a webhook-triggered tunnel fetch never
//! interleaves with a running sweep.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{error, info};

use harbormap_cloudflare::{CloudflareError, Integration, WebhookOutcome};

use crate::sink::NdjsonSink;

pub struct AppState {
    pub integration: Mutex<Integration>,
    pub sink: NdjsonSink,
}

/// Bind the server socket.
///
/// Called from `main` before the resync loop starts, so a port that is
/// already taken (or privileged) is a fatal startup error instead of a
/// silently missing endpoint.
pub async fn bind(port: u16) -> Result<TcpListener, anyhow::Error> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    Ok(listener)
}

pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<(), anyhow::Error> {
    let app = Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/healthz", get(healthz_handler))
        .with_state(state);

    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn webhook_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    let integration = state.integration.lock().await;
    match integration.handle_webhook(&payload, &state.sink).await {
        Ok(WebhookOutcome::TunnelUpserted { tunnel_id }) => {
            info!(tunnel_id, "Webhook upserted tunnel");
            (StatusCode::OK, "ok".to_string())
        }
        Ok(WebhookOutcome::Ignored { alert_name }) => {
            (StatusCode::OK, format!("ignored alert {alert_name}"))
        }
        Err(e @ CloudflareError::MissingField(_)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        Err(e) => {
            error!("Webhook handling failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn healthz_handler() -> impl IntoResponse {
    StatusCode::OK
}
