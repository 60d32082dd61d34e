#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use harbormap_cloudflare::client::{CloudflareApi, Page};
use harbormap_cloudflare::error::{CloudflareError, Result};
use harbormap_core::{BatchSink, ObjectKind, RawRecord};

pub fn record(value: Value) -> RawRecord {
    value.as_object().expect("record must be an object").clone()
}

/// Number of calls made against each mock endpoint
#[derive(Debug, Default, Clone)]
pub struct CallLog {
    pub get_account: u32,
    pub list_zones: u32,
    pub list_dns_records: u32,
    pub list_tunnels: u32,
    pub list_access_applications: u32,
    pub get_tunnel: u32,
    pub get_tunnel_configuration: u32,
}

/// In-memory Cloudflare API double
///
/// Listings are stored as explicit pages so pagination behavior is
/// observable; `fail_tunnel_config` injects a non-not-found error for
/// one tunnel id.
#[derive(Default)]
pub struct MockApi {
    pub account: Mutex<RawRecord>,
    pub zones: Mutex<Vec<Vec<RawRecord>>>,
    pub dns_records: Mutex<HashMap<String, Vec<RawRecord>>>,
    pub tunnels: Mutex<Vec<Vec<RawRecord>>>,
    pub access_applications: Mutex<Vec<Vec<RawRecord>>>,
    pub tunnel_configurations: Mutex<HashMap<String, RawRecord>>,
    pub fail_tunnel_config: Mutex<Option<String>>,
    pub calls: Mutex<CallLog>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_zones(&self, pages: Vec<Vec<RawRecord>>) {
        *self.zones.lock().unwrap() = pages;
    }

    pub fn set_tunnels(&self, pages: Vec<Vec<RawRecord>>) {
        *self.tunnels.lock().unwrap() = pages;
    }

    pub fn set_access_applications(&self, pages: Vec<Vec<RawRecord>>) {
        *self.access_applications.lock().unwrap() = pages;
    }

    pub fn set_dns_records(&self, zone_id: &str, records: Vec<RawRecord>) {
        self.dns_records
            .lock()
            .unwrap()
            .insert(zone_id.to_string(), records);
    }

    pub fn set_tunnel_configuration(&self, tunnel_id: &str, config: RawRecord) {
        self.tunnel_configurations
            .lock()
            .unwrap()
            .insert(tunnel_id.to_string(), config);
    }

    pub fn call_log(&self) -> CallLog {
        self.calls.lock().unwrap().clone()
    }

    fn page_of(pages: &[Vec<RawRecord>], page: u32) -> Page {
        let index = page.saturating_sub(1) as usize;
        Page {
            records: pages.get(index).cloned().unwrap_or_default(),
            has_more: (index + 1) < pages.len(),
        }
    }
}

#[async_trait]
impl CloudflareApi for MockApi {
    async fn get_account(&self, account_id: &str) -> Result<RawRecord> {
        self.calls.lock().unwrap().get_account += 1;
        let account = self.account.lock().unwrap().clone();
        if account.is_empty() {
            return Ok(record(json!({ "id": account_id, "name": "Mock account" })));
        }
        Ok(account)
    }

    async fn list_zones(&self, _account_id: &str, page: u32) -> Result<Page> {
        self.calls.lock().unwrap().list_zones += 1;
        Ok(Self::page_of(&self.zones.lock().unwrap(), page))
    }

    async fn list_dns_records(&self, zone_id: &str, page: u32) -> Result<Page> {
        self.calls.lock().unwrap().list_dns_records += 1;
        let records = self
            .dns_records
            .lock()
            .unwrap()
            .get(zone_id)
            .cloned()
            .unwrap_or_default();
        Ok(Self::page_of(&[records], page))
    }

    async fn list_tunnels(&self, _account_id: &str, page: u32) -> Result<Page> {
        self.calls.lock().unwrap().list_tunnels += 1;
        Ok(Self::page_of(&self.tunnels.lock().unwrap(), page))
    }

    async fn list_access_applications(&self, _account_id: &str, page: u32) -> Result<Page> {
        self.calls.lock().unwrap().list_access_applications += 1;
        Ok(Self::page_of(&self.access_applications.lock().unwrap(), page))
    }

    async fn get_tunnel(&self, _account_id: &str, tunnel_id: &str) -> Result<RawRecord> {
        self.calls.lock().unwrap().get_tunnel += 1;
        Ok(record(json!({
            "id": tunnel_id,
            "name": "mock-tunnel",
            "created_at": "2024-05-01T10:00:00Z",
        })))
    }

    async fn get_tunnel_configuration(
        &self,
        _account_id: &str,
        tunnel_id: &str,
    ) -> Result<RawRecord> {
        self.calls.lock().unwrap().get_tunnel_configuration += 1;
        if self
            .fail_tunnel_config
            .lock()
            .unwrap()
            .as_deref()
            .is_some_and(|id| id == tunnel_id)
        {
            return Err(CloudflareError::Api {
                code: 1000,
                message: "injected failure".to_string(),
            });
        }
        self.tunnel_configurations
            .lock()
            .unwrap()
            .get(tunnel_id)
            .cloned()
            .ok_or_else(|| CloudflareError::NotFound(format!("tunnel {tunnel_id}")))
    }
}

/// Sink that records every submitted batch and upserted record
#[derive(Default)]
pub struct RecordingSink {
    pub batches: Mutex<Vec<(ObjectKind, Vec<RawRecord>)>>,
    pub upserts: Mutex<Vec<(ObjectKind, RawRecord)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> Vec<(ObjectKind, Vec<RawRecord>)> {
        self.batches.lock().unwrap().clone()
    }

    pub fn upserts(&self) -> Vec<(ObjectKind, RawRecord)> {
        self.upserts.lock().unwrap().clone()
    }
}

#[async_trait]
impl BatchSink for RecordingSink {
    async fn submit(&self, kind: ObjectKind, batch: Vec<RawRecord>) -> harbormap_core::Result<()> {
        self.batches.lock().unwrap().push((kind, batch));
        Ok(())
    }

    async fn upsert(&self, kind: ObjectKind, record: RawRecord) -> harbormap_core::Result<()> {
        self.upserts.lock().unwrap().push((kind, record));
        Ok(())
    }
}
