//! Webhook handler
//!
//! Cloudflare notification webhooks arrive as JSON with the alert name
//! under `data.alert_name`. Only tunnel-health alerts are acted on: the
//! affected tunnel is refetched by id and upserted into the catalog.
//! Every other alert name is a no-op, not an error.

use serde_json::Value;

use harbormap_core::{BatchSink, ObjectKind, record::normalize_record};

use crate::error::{CloudflareError, Result};
use crate::integration::Integration;

/// The only alert this integration reacts to
pub const TUNNEL_HEALTH_EVENT: &str = "tunnel_health_event";

/// What the handler did with an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The affected tunnel was refetched and upserted
    TunnelUpserted { tunnel_id: String },
    /// Unrecognized alert name; nothing was fetched
    Ignored { alert_name: String },
}

impl Integration {
    /// Handle one inbound webhook event.
    ///
    /// A payload missing `data.alert_name` (or, for tunnel-health
    /// events, the tunnel/account ids) fails with
    /// [`CloudflareError::MissingField`].
    pub async fn handle_webhook(
        &self,
        payload: &Value,
        sink: &dyn BatchSink,
    ) -> Result<WebhookOutcome> {
        let alert_name = payload
            .pointer("/data/alert_name")
            .and_then(Value::as_str)
            .ok_or(CloudflareError::MissingField("data.alert_name"))?;

        if alert_name != TUNNEL_HEALTH_EVENT {
            tracing::debug!(alert_name, "Ignoring unhandled alert");
            return Ok(WebhookOutcome::Ignored {
                alert_name: alert_name.to_string(),
            });
        }

        let tunnel_id = payload
            .pointer("/data/tunnel_id")
            .and_then(Value::as_str)
            .ok_or(CloudflareError::MissingField("data.tunnel_id"))?;
        let tunnel_name = payload
            .pointer("/data/tunnel_name")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>");
        let account_id = payload
            .get("account_id")
            .and_then(Value::as_str)
            .ok_or(CloudflareError::MissingField("account_id"))?;

        tracing::info!(tunnel_id, tunnel_name, "Tunnel health event");

        let mut tunnel = self.api().get_tunnel(account_id, tunnel_id).await?;
        normalize_record(&mut tunnel);
        sink.upsert(ObjectKind::ZerotrustTunnel, tunnel).await?;

        Ok(WebhookOutcome::TunnelUpserted {
            tunnel_id: tunnel_id.to_string(),
        })
    }
}
