//! Snapshot cache for listing endpoints
//!
//! One process-wide listing per cached kind, empty at startup, populated
//! on first fetch and fully replaced on forced refresh. The cache is an
//! explicit struct owned by the integration context (never a global), so
//! the no-overlapping-resync assumption lives with the owner that
//! enforces it.

use crate::kind::ObjectKind;
use crate::record::RawRecord;

/// The last-fetched listing for one kind, plus a populated flag
///
/// The flag is distinct from emptiness: a source that genuinely has no
/// records caches an empty, populated listing and is not refetched on a
/// non-forced fetch.
#[derive(Debug, Clone, Default)]
pub struct CachedListing {
    records: Vec<RawRecord>,
    populated: bool,
}

impl CachedListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Discard the listing ahead of a forced refresh.
    ///
    /// Leaves the listing unpopulated until [`mark_populated`] is called,
    /// so a refresh aborted by a vendor error is refetched next time.
    ///
    /// [`mark_populated`]: CachedListing::mark_populated
    pub fn begin_refresh(&mut self) {
        self.records.clear();
        self.populated = false;
    }

    /// Append one record during a refresh
    pub fn push(&mut self, record: RawRecord) {
        self.records.push(record);
    }

    /// Mark the refresh complete; the listing now counts as a snapshot
    pub fn mark_populated(&mut self) {
        self.populated = true;
    }
}

/// Per-kind snapshot store for the cached listings
///
/// Only the kinds the integration actually caches have an entry here;
/// accounts, DNS records and tunnel configurations are refetched on
/// every resync.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCache {
    pub zones: CachedListing,
    pub tunnels: CachedListing,
    pub access_applications: CachedListing,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached listing for `kind`, if that kind is cached at all
    pub fn listing(&self, kind: ObjectKind) -> Option<&CachedListing> {
        match kind {
            ObjectKind::Zone => Some(&self.zones),
            ObjectKind::ZerotrustTunnel => Some(&self.tunnels),
            ObjectKind::ZerotrustAccessApplication => Some(&self.access_applications),
            ObjectKind::Account
            | ObjectKind::DnsRecord
            | ObjectKind::ZerotrustTunnelConfiguration => None,
        }
    }
}
