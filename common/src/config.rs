use anyhow::{Context, Result, ensure};
use quinn::{
    TransportConfig,
    crypto::rustls::{QuicClientConfig, QuicServerConfig},
};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use std::{path::Path, sync::Arc, time::Duration};

// ============================================================================
// Constants
// ============================================================================

const IDLE_TIMEOUT_SECS: u64 = 5;
const KEEPALIVE_INTERVAL_SECS: u64 = 2;

pub const ALPN_PROTOCOL: &[u8] = b"fps-session";
pub const DEFAULT_CERT_PATH: &str = "cert.pem";
pub const DEFAULT_KEY_PATH: &str = "key.pem";

// Server name the host certificate is issued for
pub const SERVER_NAME: &str = "localhost";

// ============================================================================
// TLS Material
// ============================================================================

/// Where to find the PEM certificate chain and private key of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: String,
    pub key: String,
}

impl Default for TlsPaths {
    fn default() -> Self {
        Self {
            cert: DEFAULT_CERT_PATH.to_string(),
            key: DEFAULT_KEY_PATH.to_string(),
        }
    }
}

pub fn load_certs(path: impl AsRef<Path>) -> Result<Vec<CertificateDer<'static>>> {
    let path = path.as_ref();
    let cert = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    rustls_pemfile::certs(&mut &cert[..])
        .collect::<Result<Vec<_>, _>>()
        .context("failed to parse certificates")
}

pub fn load_private_key(path: impl AsRef<Path>) -> Result<PrivateKeyDer<'static>> {
    let path = path.as_ref();
    let key = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    rustls_pemfile::private_key(&mut &key[..])
        .context("failed to read private key")?
        .ok_or_else(|| anyhow::anyhow!("no private key found in {}", path.display()))
}

// ============================================================================
// QUIC Transport
// ============================================================================

/// Connection liveness settings shared by host and client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportSettings {
    pub idle_timeout: Duration,
    pub keep_alive: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(IDLE_TIMEOUT_SECS),
            keep_alive: Duration::from_secs(KEEPALIVE_INTERVAL_SECS),
        }
    }
}

impl TransportSettings {
    pub fn build(self) -> Result<Arc<TransportConfig>> {
        ensure!(
            self.keep_alive < self.idle_timeout,
            "keepalive interval {:?} must be shorter than the idle timeout {:?}",
            self.keep_alive,
            self.idle_timeout
        );

        let mut transport = TransportConfig::default();
        transport.max_idle_timeout(Some(self.idle_timeout.try_into().context("invalid idle timeout")?));
        transport.keep_alive_interval(Some(self.keep_alive));
        Ok(Arc::new(transport))
    }
}

pub fn quic_client_config(crypto: rustls::ClientConfig) -> Result<quinn::ClientConfig> {
    let crypto = QuicClientConfig::try_from(crypto).context("failed to create QUIC client config")?;
    let mut config = quinn::ClientConfig::new(Arc::new(crypto));
    config.transport_config(TransportSettings::default().build()?);
    Ok(config)
}

pub fn quic_server_config(crypto: rustls::ServerConfig) -> Result<quinn::ServerConfig> {
    let crypto = QuicServerConfig::try_from(crypto).context("failed to create QUIC server config")?;
    let mut config = quinn::ServerConfig::with_crypto(Arc::new(crypto));
    config.transport_config(TransportSettings::default().build()?);
    Ok(config)
}
