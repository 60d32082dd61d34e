mod common;

use std::sync::Arc;

use serde_json::json;

use common::{MockApi, RecordingSink};
use harbormap_cloudflare::{CloudflareApi, CloudflareError, Integration, WebhookOutcome};
use harbormap_core::ObjectKind;

fn integration(api: &Arc<MockApi>) -> Integration {
    Integration::with_api(Arc::clone(api) as Arc<dyn CloudflareApi>, "acc1")
}

#[tokio::test]
async fn tunnel_health_event_refetches_and_upserts() {
    let api = Arc::new(MockApi::new());
    let sink = RecordingSink::new();
    let integration = integration(&api);

    let payload = json!({
        "account_id": "acc1",
        "data": {
            "alert_name": "tunnel_health_event",
            "tunnel_id": "t1",
            "tunnel_name": "edge-tunnel",
        },
    });

    let outcome = integration.handle_webhook(&payload, &sink).await.unwrap();

    assert_eq!(
        outcome,
        WebhookOutcome::TunnelUpserted {
            tunnel_id: "t1".to_string()
        }
    );
    assert_eq!(api.call_log().get_tunnel, 1);

    let upserts = sink.upserts();
    assert_eq!(upserts.len(), 1);
    assert_eq!(upserts[0].0, ObjectKind::ZerotrustTunnel);
    assert_eq!(upserts[0].1["id"], "t1");
    // Timestamps are normalized before the upsert
    assert_eq!(upserts[0].1["created_at"], "2024-05-01T10:00:00.000000Z");
}

#[tokio::test]
async fn other_alerts_are_a_no_op() {
    let api = Arc::new(MockApi::new());
    let sink = RecordingSink::new();
    let integration = integration(&api);

    let payload = json!({
        "account_id": "acc1",
        "data": { "alert_name": "http_alert_edge_notification" },
    });

    let outcome = integration.handle_webhook(&payload, &sink).await.unwrap();

    assert!(matches!(outcome, WebhookOutcome::Ignored { .. }));
    assert_eq!(api.call_log().get_tunnel, 0);
    assert!(sink.upserts().is_empty());
}

#[tokio::test]
async fn missing_alert_name_is_an_error() {
    let api = Arc::new(MockApi::new());
    let sink = RecordingSink::new();
    let integration = integration(&api);

    let result = integration
        .handle_webhook(&json!({ "data": {} }), &sink)
        .await;

    assert!(matches!(
        result,
        Err(CloudflareError::MissingField("data.alert_name"))
    ));
    assert_eq!(api.call_log().get_tunnel, 0);
}

#[tokio::test]
async fn tunnel_health_event_without_ids_is_an_error() {
    let api = Arc::new(MockApi::new());
    let sink = RecordingSink::new();
    let integration = integration(&api);

    let payload = json!({
        "data": { "alert_name": "tunnel_health_event" },
    });

    let result = integration.handle_webhook(&payload, &sink).await;

    assert!(matches!(result, Err(CloudflareError::MissingField(_))));
    assert!(sink.upserts().is_empty());
}
