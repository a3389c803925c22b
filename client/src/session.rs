use anyhow::{Context, Result, anyhow, bail};
use bevy::log::info;
use quinn::Endpoint;
use std::net::SocketAddr;
use tokio::{
    runtime::Handle,
    sync::mpsc::{UnboundedSender, unbounded_channel},
};

use crate::{
    config::configure_client,
    net::{SessionEvent, client_session_task},
};
use common::{
    config::{SERVER_NAME, TlsPaths},
    session::SessionManager,
};
use server::{
    config::configure_server,
    host::{HostCommand, host_task},
};

// ============================================================================
// Session Settings
// ============================================================================

#[derive(Debug, Clone)]
pub struct SessionSettings {
    // Address a client connects to
    pub server_addr: String,
    // Address a host listens on
    pub bind_addr: String,
    pub player_name: String,
    pub tls: TlsPaths,
}

// ============================================================================
// QUIC Session Manager
// ============================================================================

/// Runs the session on the app's tokio runtime. Hosting embeds the server crate's host task;
/// joining spawns a client connection task. Both report back through session events.
pub struct QuicSessionManager {
    runtime: Handle,
    settings: SessionSettings,
    to_bevy: UnboundedSender<SessionEvent>,
    host: Option<UnboundedSender<HostCommand>>,
    client_endpoint: Option<Endpoint>,
}

impl QuicSessionManager {
    #[must_use]
    pub fn new(runtime: Handle, settings: SessionSettings, to_bevy: UnboundedSender<SessionEvent>) -> Self {
        Self {
            runtime,
            settings,
            to_bevy,
            host: None,
            client_endpoint: None,
        }
    }
}

impl SessionManager for QuicSessionManager {
    fn start_host(&mut self) -> Result<()> {
        let addr: SocketAddr = self
            .settings
            .bind_addr
            .parse()
            .with_context(|| format!("invalid bind address {}", self.settings.bind_addr))?;
        let server_config = configure_server(&self.settings.tls)?;

        // quinn picks up the runtime from the current context
        let _guard = self.runtime.enter();
        let endpoint = Endpoint::server(server_config, addr).with_context(|| format!("failed to bind {addr}"))?;

        let (to_host, from_app) = unbounded_channel();
        self.runtime.spawn(host_task(endpoint, from_app, None));
        self.host = Some(to_host);
        info!("hosting session on {addr}");
        Ok(())
    }

    fn start_client(&mut self) -> Result<()> {
        let addr: SocketAddr = self
            .settings
            .server_addr
            .parse()
            .with_context(|| format!("invalid server address {}", self.settings.server_addr))?;
        let client_config = configure_client(&self.settings.tls)?;

        let _guard = self.runtime.enter();
        let mut endpoint = Endpoint::client("0.0.0.0:0".parse()?)?;
        endpoint.set_default_client_config(client_config);
        let connecting = endpoint
            .connect(addr, SERVER_NAME)
            .with_context(|| format!("failed to connect to {addr}"))?;

        self.runtime.spawn(client_session_task(
            connecting,
            self.settings.player_name.clone(),
            self.to_bevy.clone(),
        ));
        self.client_endpoint = Some(endpoint);
        info!("joining session at {addr}");
        Ok(())
    }

    fn load_scene(&mut self, name: &str) -> Result<()> {
        let Some(host) = &self.host else {
            bail!("only the host can load scenes");
        };

        host.send(HostCommand::LoadScene(name.to_string()))
            .map_err(|_| anyhow!("host task is not running"))?;

        // The host is a participant too
        self.to_bevy
            .send(SessionEvent::LoadScene(name.to_string()))
            .map_err(|_| anyhow!("app is no longer listening for session events"))?;
        Ok(())
    }
}

impl Drop for QuicSessionManager {
    fn drop(&mut self) {
        if let Some(host) = self.host.take() {
            let _ = host.send(HostCommand::Shutdown);
        }
    }
}
