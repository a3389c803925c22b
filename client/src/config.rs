use anyhow::{Context, Result};
use quinn::ClientConfig;

use common::config::{ALPN_PROTOCOL, TlsPaths, load_certs, quic_client_config};

// ============================================================================
// Connection Configuration
// ============================================================================

// The host's certificate is trusted directly as the only root
pub fn configure_client(tls: &TlsPaths) -> Result<ClientConfig> {
    let certs = load_certs(&tls.cert)?;

    let mut roots = rustls::RootCertStore::empty();
    for cert in certs {
        roots.add(cert).context("failed to add certificate to root store")?;
    }

    let mut crypto = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    crypto.alpn_protocols = vec![ALPN_PROTOCOL.to_vec()];

    quic_client_config(crypto)
}
