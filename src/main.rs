//! Scotty MCP server - main entry point.
//!
//! Serves the `eats_*`, `maps_*` and `courses_*` tools over stdio (default)
//! or TCP.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use scotty_mcp::dining::LocalClock;
use scotty_mcp::mcp::{McpRouter, McpServer};
use scotty_mcp::tools::build_registry;
use scotty_mcp::types::Transport;
use scotty_mcp::Config;

#[derive(Debug, Parser)]
#[command(name = "scotty-mcp", version, about = "CMU dining, courses and maps tools over MCP")]
struct Args {
    /// TOML config file.
    #[arg(long, env = "SCOTTY_CONFIG")]
    config: Option<PathBuf>,

    /// Transport to serve on (stdio or tcp).
    #[arg(long, env = "SCOTTY_TRANSPORT")]
    transport: Option<Transport>,

    /// TCP bind address; implies the tcp transport.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(transport) = args.transport {
        config.server.transport = transport;
    }
    if let Some(listen) = args.listen {
        config.server.listen_addr = listen;
        config.server.transport = Transport::Tcp;
    }

    // Initialize observability
    scotty_mcp::observability::init_tracing(&config.observability);

    let registry = build_registry(&config.upstream, Arc::new(LocalClock))?;
    tracing::info!(
        "Registered {} tools (dining={}, courses={}, maps={})",
        registry.catalog().len(),
        config.upstream.dining_base_url,
        config.upstream.courses_base_url,
        config.upstream.maps_base_url,
    );

    let router = McpRouter::new(Arc::new(registry), config.server.server_name.clone());
    let server = McpServer::new(router, config.transport.clone());

    match config.server.transport {
        Transport::Stdio => server.serve_stdio().await?,
        Transport::Tcp => {
            let addr = config.server.listen_addr.parse()?;
            let shutdown = server.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Received Ctrl-C");
                    shutdown.shutdown();
                }
            });
            server.serve_tcp(addr).await?;
        }
    }

    Ok(())
}
