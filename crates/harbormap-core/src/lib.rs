//! harbormap core building blocks
//!
//! This crate provides the vendor-agnostic pieces of harbormap:
//! the closed set of object kinds, raw record normalization, the
//! per-kind snapshot cache, and the batch sink that carries records
//! into the host catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  harbormapd                      │
//! │        (resync loop + webhook endpoint)          │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               harbormap-core                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          Sink Abstraction                 │   │
//! │  │  trait BatchSink { ... }                  │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  ObjectKind  │  │ SnapshotCache │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────────┐
//! │ harbormap-cloudflare │
//! │   (vendor client)  │
//! └───────────────────┘
//! ```

pub mod cache;
pub mod error;
pub mod kind;
pub mod record;
pub mod sink;

// Re-exports
pub use cache::{CachedListing, SnapshotCache};
pub use error::{CoreError, Result};
pub use kind::ObjectKind;
pub use record::{RawRecord, normalize_timestamps};
pub use sink::BatchSink;
