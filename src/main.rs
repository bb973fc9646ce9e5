//! Shopify Webhooks Dashboard
//!
//! Serves the dashboard UI on loopback and proxies its webhook calls to the
//! store's Admin API, attaching the access token server-side.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser (dashboard UI)
//!         │
//!         ▼
//!   ┌───────────┐  /api/webhooks*  ┌──────────┐   ┌────────────┐   ┌────────────┐
//!   │   http    │─────────────────▶│ routing  │──▶│  upstream  │──▶│ Shopify    │
//!   │  server   │                  │ dispatch │   │ translate  │   │ Admin API  │
//!   └─────┬─────┘                  └──────────┘   │ + client   │◀──│            │
//!         │ other paths                           └─────┬──────┘   └────────────┘
//!         ▼                                             │
//!   static assets                               http::response (relay)
//! ```

use clap::Parser;

use webhooks_dashboard::config::Cli;
use webhooks_dashboard::lifecycle;
use webhooks_dashboard::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: webhooks-dashboard --store <store> --api-key <api-key>");
            std::process::exit(1);
        }
    };

    logging::init(&config.observability);
    tracing::info!("webhooks-dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        store = %config.upstream.store,
        api_version = %config.upstream.api_version,
        "Configuration loaded"
    );

    if let Err(e) = lifecycle::run(config).await {
        tracing::error!(error = %e, "Fatal error");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
