//! Batch sink trait
//!
//! Resync handlers emit records in batches (one batch per zone, per
//! tunnel, or one batch for a whole listing) and hand each batch to the
//! sink as soon as it is produced. The host collector can therefore
//! start persisting early batches while later ones are still being
//! fetched, and batches already submitted survive a later failure.

use async_trait::async_trait;

use crate::error::Result;
use crate::kind::ObjectKind;
use crate::record::RawRecord;

/// Destination for normalized records
///
/// Implemented by the catalog writer in the daemon and by recording
/// mocks in tests.
#[async_trait]
pub trait BatchSink: Send + Sync {
    /// Submit one resync batch for `kind`.
    ///
    /// Empty batches are submitted too; they carry the information that
    /// a sub-item (e.g. a zone with no records) was visited.
    async fn submit(&self, kind: ObjectKind, batch: Vec<RawRecord>) -> Result<()>;

    /// Upsert a single record outside a resync (webhook path)
    async fn upsert(&self, kind: ObjectKind, record: RawRecord) -> Result<()>;
}
