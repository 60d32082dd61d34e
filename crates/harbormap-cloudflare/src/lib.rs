//! Cloudflare integration for harbormap
//!
//! This crate polls the Cloudflare v4 REST API and turns the responses
//! into normalized catalog records. It covers accounts, zones, DNS
//! records, Zero Trust tunnels, tunnel configurations and access
//! applications, plus a webhook handler for tunnel-health alerts.
//!
//! # Requirements
//!
//! - `CF_API_TOKEN`, or the `CF_EMAIL` + `CF_API_KEY` pair
//! - `CF_ACCOUNT_ID` for all account-scoped calls
//!
//! # Example
//!
//! ```ignore
//! use harbormap_cloudflare::{CloudflareConfig, Integration};
//! use harbormap_core::ObjectKind;
//!
//! let config = CloudflareConfig::from_env()?;
//! let mut integration = Integration::new(&config)?;
//!
//! // Run one resync, pushing batches into the catalog sink
//! integration.resync(ObjectKind::Zone, &sink).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod integration;
pub mod webhook;

pub use client::{CloudflareApi, CloudflareClient, Page};
pub use config::{CloudflareConfig, Credentials};
pub use error::{CloudflareError, Result};
pub use integration::Integration;
pub use webhook::WebhookOutcome;
