mod server;
mod sink;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::Mutex;
use tracing::{error, info};

use harbormap_cloudflare::{CloudflareConfig, Integration};
use harbormap_core::ObjectKind;

use crate::server::AppState;
use crate::sink::NdjsonSink;

#[derive(Parser)]
#[command(name = "harbormapd")]
#[command(about = "Ingest Cloudflare resources into a host catalog", long_about = None)]
struct Cli {
    /// Port for the webhook / health endpoint
    #[arg(short, long, env = "HARBORMAP_PORT", default_value = "8000")]
    port: u16,

    /// Seconds between full resync sweeps
    #[arg(long, env = "HARBORMAP_RESYNC_INTERVAL", default_value = "300")]
    resync_interval: u64,

    /// Comma-separated kinds to resync (default: all)
    #[arg(long, env = "HARBORMAP_KINDS")]
    kinds: Option<String>,

    /// Run one resync sweep and exit (no server, no loop)
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let kinds = parse_kinds(cli.kinds.as_deref())?;

    let config = CloudflareConfig::from_env().context("Reading Cloudflare configuration")?;
    // Fails fast when neither credential form is configured
    let integration = Integration::new(&config).context("Initializing Cloudflare integration")?;
    info!(account_id = %config.account_id, "Starting harbormapd");

    let state = Arc::new(AppState {
        integration: Mutex::new(integration),
        sink: NdjsonSink::new(),
    });

    if cli.once {
        run_sweep(&state, &kinds).await;
        return Ok(());
    }

    // Bind before entering the loop: a taken port is fatal, not a
    // daemon quietly running without its webhook endpoint.
    let listener = server::bind(cli.port).await?;
    let server_state = Arc::clone(&state);
    tokio::spawn(async move {
        if let Err(e) = server::serve(listener, server_state).await {
            error!("HTTP server terminated: {e}");
        }
    });

    let mut interval = tokio::time::interval(Duration::from_secs(cli.resync_interval));
    loop {
        interval.tick().await;
        run_sweep(&state, &kinds).await;
    }
}

/// Run one resync per configured kind, sequentially.
///
/// A failed kind is logged and does not stop the sweep; the next kind
/// still runs. Holding the lock across the whole sweep serializes
/// resyncs against the webhook path.
async fn run_sweep(state: &AppState, kinds: &[ObjectKind]) {
    let mut integration = state.integration.lock().await;
    for &kind in kinds {
        if let Err(e) = integration.resync(kind, &state.sink).await {
            error!(kind = %kind, "Resync failed: {e}");
        }
    }
}

fn parse_kinds(raw: Option<&str>) -> anyhow::Result<Vec<ObjectKind>> {
    let Some(raw) = raw else {
        return Ok(ObjectKind::ALL.to_vec());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| ObjectKind::from_str(s).with_context(|| format!("Invalid kind: {s}")))
        .collect()
}
