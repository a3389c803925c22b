use anyhow::Result;
use clap::Parser;
use quinn::Endpoint;
use std::net::SocketAddr;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{info, warn};

use common::{
    config::{DEFAULT_CERT_PATH, DEFAULT_KEY_PATH, TlsPaths},
    constants::{DEFAULT_SERVER_ADDR, GAME_SCENE},
};
use server::{
    config::{configure_server, init_tracing},
    host::{HostCommand, host_task},
};

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Parser)]
#[command(author, version, about = "Dedicated session host", long_about = None)]
struct Args {
    // Address to bind the host to
    #[arg(short, long, default_value = DEFAULT_SERVER_ADDR)]
    bind: String,

    // Scene every client is sent to
    #[arg(short, long, default_value = GAME_SCENE)]
    scene: String,

    // PEM certificate chain
    #[arg(long, default_value = DEFAULT_CERT_PATH)]
    cert: String,

    // PEM private key
    #[arg(long, default_value = DEFAULT_KEY_PATH)]
    key: String,
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let addr: SocketAddr = args.bind.parse()?;
    let server_config = configure_server(&TlsPaths {
        cert: args.cert,
        key: args.key,
    })?;
    let endpoint = Endpoint::server(server_config, addr)?;
    info!("dedicated host listening on {addr}, scene {}", args.scene);

    let scene = if args.scene.is_empty() {
        warn!("no scene configured, clients will stay in their menu");
        None
    } else {
        Some(args.scene)
    };

    let (to_host, from_app) = unbounded_channel();
    let host = tokio::spawn(host_task(endpoint, from_app, scene));

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");
    let _ = to_host.send(HostCommand::Shutdown);
    host.await?;

    Ok(())
}
