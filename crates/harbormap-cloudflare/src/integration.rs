//! Resync handlers
//!
//! The [`Integration`] context owns the API handle and the snapshot
//! cache and exposes one resync entry point per object kind. Vendor
//! calls are awaited sequentially; there is no fan-out across zones or
//! tunnels, no retry, and no internal timeout. The owner is expected to
//! serialize resync invocations for a given kind.

use std::sync::Arc;

use serde_json::Value;

use harbormap_core::{BatchSink, ObjectKind, RawRecord, SnapshotCache, record::normalize_record};

use crate::client::{CloudflareApi, CloudflareClient};
use crate::config::CloudflareConfig;
use crate::error::{CloudflareError, Result};

/// Kinds backed by a cached listing
#[derive(Debug, Clone, Copy)]
enum CachedKind {
    Zones,
    Tunnels,
    AccessApplications,
}

/// Top-level integration context
pub struct Integration {
    api: Arc<dyn CloudflareApi>,
    account_id: String,
    cache: SnapshotCache,
}

impl Integration {
    /// Build an integration over the live API.
    ///
    /// Fails with [`CloudflareError::MissingCredentials`] before any
    /// vendor call when no usable credential form is configured.
    pub fn new(config: &CloudflareConfig) -> Result<Self> {
        let client = CloudflareClient::new(config)?;
        Ok(Self::with_api(Arc::new(client), config.account_id.clone()))
    }

    /// Build an integration over an arbitrary API implementation
    pub fn with_api(api: Arc<dyn CloudflareApi>, account_id: impl Into<String>) -> Self {
        Self {
            api,
            account_id: account_id.into(),
            cache: SnapshotCache::new(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub(crate) fn api(&self) -> &Arc<dyn CloudflareApi> {
        &self.api
    }

    /// Fetch the zone listing, from cache unless `force_refresh`
    pub async fn fetch_zones(&mut self, force_refresh: bool) -> Result<Vec<RawRecord>> {
        self.fetch_cached(CachedKind::Zones, force_refresh).await
    }

    /// Fetch the tunnel listing, from cache unless `force_refresh`
    pub async fn fetch_tunnels(&mut self, force_refresh: bool) -> Result<Vec<RawRecord>> {
        self.fetch_cached(CachedKind::Tunnels, force_refresh).await
    }

    /// Fetch the access application listing, from cache unless `force_refresh`
    pub async fn fetch_access_applications(
        &mut self,
        force_refresh: bool,
    ) -> Result<Vec<RawRecord>> {
        self.fetch_cached(CachedKind::AccessApplications, force_refresh)
            .await
    }

    /// Run one resync for `kind`, emitting batches through `sink` as
    /// they are produced.
    pub async fn resync(&mut self, kind: ObjectKind, sink: &dyn BatchSink) -> Result<()> {
        tracing::info!(kind = %kind, "Starting resync");
        match kind {
            ObjectKind::Account => {
                let mut account = self.api.get_account(&self.account_id).await?;
                normalize_record(&mut account);
                sink.submit(kind, vec![account]).await?;
            }
            ObjectKind::Zone => {
                let zones = self.fetch_zones(true).await?;
                sink.submit(kind, zones).await?;
            }
            ObjectKind::DnsRecord => {
                self.resync_dns_records(sink).await?;
            }
            ObjectKind::ZerotrustAccessApplication => {
                let apps = self.fetch_access_applications(true).await?;
                sink.submit(kind, apps).await?;
            }
            ObjectKind::ZerotrustTunnel => {
                let tunnels = self.fetch_tunnels(true).await?;
                sink.submit(kind, tunnels).await?;
            }
            ObjectKind::ZerotrustTunnelConfiguration => {
                self.resync_tunnel_configurations(sink).await?;
            }
        }
        tracing::info!(kind = %kind, "Resync complete");
        Ok(())
    }

    /// One batch of DNS records per zone, each record tagged with its
    /// owning `zone_id`. A zone without records still emits its (empty)
    /// batch, so the sink sees every zone that was visited.
    async fn resync_dns_records(&mut self, sink: &dyn BatchSink) -> Result<()> {
        let zones = self.fetch_zones(false).await?;
        for zone in zones {
            let Some(zone_id) = zone.get("id").and_then(Value::as_str) else {
                tracing::warn!("Skipping zone without id field");
                continue;
            };

            let mut batch = Vec::new();
            let mut page = 1;
            loop {
                let listing = self.api.list_dns_records(zone_id, page).await?;
                for mut record in listing.records {
                    record.insert("zone_id".to_string(), Value::String(zone_id.to_string()));
                    normalize_record(&mut record);
                    batch.push(record);
                }
                if !listing.has_more {
                    break;
                }
                page += 1;
            }

            tracing::debug!(zone_id, records = batch.len(), "DNS record batch");
            sink.submit(ObjectKind::DnsRecord, batch).await?;
        }
        Ok(())
    }

    /// One batch per tunnel. A tunnel whose configuration lookup comes
    /// back not-found emits an empty batch instead of failing the run;
    /// any other error aborts the remaining tunnels.
    async fn resync_tunnel_configurations(&mut self, sink: &dyn BatchSink) -> Result<()> {
        let tunnels = self.fetch_tunnels(false).await?;
        for tunnel in tunnels {
            let Some(tunnel_id) = tunnel.get("id").and_then(Value::as_str) else {
                tracing::warn!("Skipping tunnel without id field");
                continue;
            };

            match self
                .api
                .get_tunnel_configuration(&self.account_id, tunnel_id)
                .await
            {
                Ok(mut config) => {
                    normalize_record(&mut config);
                    sink.submit(ObjectKind::ZerotrustTunnelConfiguration, vec![config])
                        .await?;
                }
                Err(CloudflareError::NotFound(_)) => {
                    tracing::debug!(tunnel_id, "Tunnel has no configuration");
                    sink.submit(ObjectKind::ZerotrustTunnelConfiguration, Vec::new())
                        .await?;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    async fn fetch_cached(
        &mut self,
        kind: CachedKind,
        force_refresh: bool,
    ) -> Result<Vec<RawRecord>> {
        let api = Arc::clone(&self.api);
        let account_id = self.account_id.clone();

        let listing = match kind {
            CachedKind::Zones => &mut self.cache.zones,
            CachedKind::Tunnels => &mut self.cache.tunnels,
            CachedKind::AccessApplications => &mut self.cache.access_applications,
        };

        if !force_refresh && listing.is_populated() {
            tracing::debug!(?kind, records = listing.len(), "Serving cached listing");
            return Ok(listing.records().to_vec());
        }

        listing.begin_refresh();
        let mut page = 1;
        loop {
            let result = match kind {
                CachedKind::Zones => api.list_zones(&account_id, page).await?,
                CachedKind::Tunnels => api.list_tunnels(&account_id, page).await?,
                CachedKind::AccessApplications => {
                    api.list_access_applications(&account_id, page).await?
                }
            };
            for mut record in result.records {
                normalize_record(&mut record);
                listing.push(record);
            }
            if !result.has_more {
                break;
            }
            page += 1;
        }
        listing.mark_populated();

        tracing::debug!(?kind, records = listing.len(), "Listing refreshed");
        Ok(listing.records().to_vec())
    }
}
