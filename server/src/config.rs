use anyhow::{Context, Result};
use quinn::ServerConfig;
use tracing_subscriber::{EnvFilter, fmt};

use common::config::{ALPN_PROTOCOL, TlsPaths, load_certs, load_private_key, quic_server_config};

const DEFAULT_LOG_FILTER: &str = "info";

// ============================================================================
// Connection Configuration
// ============================================================================

pub fn configure_server(tls: &TlsPaths) -> Result<ServerConfig> {
    let certs = load_certs(&tls.cert)?;
    let private_key = load_private_key(&tls.key)?;

    let mut crypto = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, private_key)
        .context("failed to configure TLS")?;
    crypto.alpn_protocols = vec![ALPN_PROTOCOL.to_vec()];

    quic_server_config(crypto)
}

// ============================================================================
// Logging
// ============================================================================

// Only used by the dedicated host; an embedding app installs its own subscriber
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt().with_env_filter(filter).init();
}
