//! NDJSON catalog sink
//!
//! Writes one JSON line per record to stdout, tagged with its kind. The
//! real catalog collector consumes these lines; keeping the sink behind
//! [`BatchSink`] means the ingestion code never learns what is on the
//! other side.

use std::io::Write;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use harbormap_core::{BatchSink, CoreError, ObjectKind, RawRecord};

#[derive(Debug, Default)]
pub struct NdjsonSink;

impl NdjsonSink {
    pub fn new() -> Self {
        Self
    }

    fn write_line(kind: ObjectKind, record: &RawRecord) -> harbormap_core::Result<()> {
        let line = json!({ "kind": kind.as_str(), "record": record });
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer(&mut stdout, &line)?;
        writeln!(stdout).map_err(|e| CoreError::SinkError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl BatchSink for NdjsonSink {
    async fn submit(&self, kind: ObjectKind, batch: Vec<RawRecord>) -> harbormap_core::Result<()> {
        info!(kind = %kind, records = batch.len(), "Submitting batch");
        for record in &batch {
            Self::write_line(kind, record)?;
        }
        Ok(())
    }

    async fn upsert(&self, kind: ObjectKind, record: RawRecord) -> harbormap_core::Result<()> {
        info!(kind = %kind, "Upserting record");
        Self::write_line(kind, &record)
    }
}
