use quinn::Endpoint;
use std::collections::HashMap;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info, warn};

use crate::net::{ClientId, ClientToHost, HostToClient, Registration, accept_connections_task};
use common::protocol::{ClientMessage, SLoadScene, SWelcome, ServerMessage};

// ============================================================================
// Host Commands
// ============================================================================

/// Requests from the embedding application to the running host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    LoadScene(String),
    Shutdown,
}

// ============================================================================
// Host State
// ============================================================================

pub struct ClientInfo {
    pub channel: UnboundedSender<HostToClient>,
    pub name: String,
}

/// Connected clients and the scene every one of them should be in.
#[derive(Default)]
pub struct HostState {
    clients: HashMap<ClientId, ClientInfo>,
    scene: Option<String>,
}

impl HostState {
    #[must_use]
    pub fn new(scene: Option<String>) -> Self {
        Self {
            clients: HashMap::new(),
            scene,
        }
    }

    #[must_use]
    pub fn scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    #[must_use]
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    #[must_use]
    pub fn client_name(&self, id: ClientId) -> Option<&str> {
        self.clients.get(&id).map(|info| info.name.as_str())
    }

    // Late joiners are sent straight to the active scene
    pub fn connect(&mut self, registration: Registration) {
        let Registration { id, name, channel } = registration;
        let _ = channel.send(HostToClient::Send(ServerMessage::Welcome(SWelcome { id: id.0 })));
        if let Some(scene) = &self.scene {
            let _ = channel.send(HostToClient::Send(load_scene_message(scene)));
        }
        info!("{name} joined as {:?}, {} client(s) connected", id, self.clients.len() + 1);
        self.clients.insert(id, ClientInfo { channel, name });
    }

    pub fn handle_message(&self, id: ClientId, msg: ClientMessage) {
        let Some(info) = self.clients.get(&id) else {
            warn!("message from unknown client {:?}", id);
            return;
        };

        match msg {
            ClientMessage::Hello(hello) if hello.name != info.name => {
                warn!("{:?} tried to rename itself to {}, keeping {}", id, hello.name, info.name);
            }
            ClientMessage::Hello(_) => debug!("{:?} repeated its hello", id),
        }
    }

    /// Apply one event from a connection task.
    pub fn handle_event(&mut self, id: ClientId, event: ClientToHost) {
        match event {
            ClientToHost::Registered(registration) => self.connect(registration),
            ClientToHost::Message(msg) => self.handle_message(id, msg),
            ClientToHost::Disconnected => self.disconnect(id),
        }
    }

    pub fn disconnect(&mut self, id: ClientId) {
        if self.clients.remove(&id).is_some() {
            info!("{:?} left, {} client(s) remaining", id, self.clients.len());
        }
    }

    pub fn load_scene(&mut self, scene: String) {
        info!("loading scene {scene} on {} client(s)", self.clients.len());
        let msg = load_scene_message(&scene);
        for info in self.clients.values() {
            let _ = info.channel.send(HostToClient::Send(msg.clone()));
        }
        self.scene = Some(scene);
    }

    pub fn shutdown(&mut self) {
        for (_, info) in self.clients.drain() {
            let _ = info.channel.send(HostToClient::Close);
        }
    }
}

fn load_scene_message(scene: &str) -> ServerMessage {
    ServerMessage::LoadScene(SLoadScene {
        scene: scene.to_string(),
    })
}

// ============================================================================
// Host Task
// ============================================================================

/// Run the host on an already bound endpoint until a shutdown is requested or the command channel
/// is dropped.
pub async fn host_task(endpoint: Endpoint, mut commands: UnboundedReceiver<HostCommand>, scene: Option<String>) {
    // Channel for sending from all connection tasks to the host
    let (to_host, mut from_clients) = unbounded_channel();

    tokio::spawn(accept_connections_task(endpoint.clone(), to_host));

    let mut state = HostState::new(scene);

    loop {
        tokio::select! {
            Some((id, event)) = from_clients.recv() => {
                state.handle_event(id, event);
            }

            cmd = commands.recv() => {
                match cmd {
                    Some(HostCommand::LoadScene(scene)) => state.load_scene(scene),
                    Some(HostCommand::Shutdown) | None => break,
                }
            }
        }
    }

    debug!("host shutting down");
    state.shutdown();
    endpoint.close(0u32.into(), b"host shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::protocol::CHello;

    fn drain(rx: &mut UnboundedReceiver<HostToClient>) -> Vec<HostToClient> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    fn register(state: &mut HostState, id: u32, name: &str) -> UnboundedReceiver<HostToClient> {
        let (channel, rx) = unbounded_channel();
        state.connect(Registration {
            id: ClientId(id),
            name: name.to_string(),
            channel,
        });
        rx
    }

    fn scene_msg(scene: &str) -> HostToClient {
        HostToClient::Send(load_scene_message(scene))
    }

    #[test]
    fn new_client_is_welcomed_without_scene() {
        let mut state = HostState::default();

        let mut rx = register(&mut state, 7, "ada");

        assert_eq!(
            drain(&mut rx),
            vec![HostToClient::Send(ServerMessage::Welcome(SWelcome { id: 7 }))]
        );
        assert_eq!(state.client_count(), 1);
        assert_eq!(state.client_name(ClientId(7)), Some("ada"));
    }

    #[test]
    fn late_joiner_receives_active_scene() {
        let mut state = HostState::new(Some("GameScene".to_string()));

        let mut rx = register(&mut state, 1, "ada");

        let received = drain(&mut rx);
        assert_eq!(received.len(), 2);
        assert_eq!(received[1], scene_msg("GameScene"));
    }

    #[test]
    fn scene_load_is_broadcast_to_everyone() {
        let mut state = HostState::default();
        let mut rx1 = register(&mut state, 1, "ada");
        let mut rx2 = register(&mut state, 2, "grace");
        drain(&mut rx1);
        drain(&mut rx2);

        state.load_scene("Arena".to_string());

        assert_eq!(drain(&mut rx1), vec![scene_msg("Arena")]);
        assert_eq!(drain(&mut rx2), vec![scene_msg("Arena")]);
        assert_eq!(state.scene(), Some("Arena"));
    }

    #[test]
    fn repeated_hello_keeps_registered_name() {
        let mut state = HostState::default();
        let _rx = register(&mut state, 3, "ada");

        state.handle_message(ClientId(3), ClientMessage::Hello(CHello { name: "eve".to_string() }));

        assert_eq!(state.client_name(ClientId(3)), Some("ada"));
    }

    #[test]
    fn disconnected_client_no_longer_receives_broadcasts() {
        let mut state = HostState::default();
        let mut rx = register(&mut state, 1, "ada");
        drain(&mut rx);

        state.disconnect(ClientId(1));
        state.load_scene("Arena".to_string());

        assert!(drain(&mut rx).is_empty());
        assert_eq!(state.client_count(), 0);
        assert_eq!(state.client_name(ClientId(1)), None);
    }

    #[test]
    fn client_dropping_right_after_hello_is_removed() {
        let mut state = HostState::default();
        let (to_host, mut from_clients) = unbounded_channel();
        let (channel, _rx) = unbounded_channel();

        // A connection task registers and immediately reports its peer gone
        let registration = Registration {
            id: ClientId(5),
            name: "ada".to_string(),
            channel,
        };
        to_host.send((ClientId(5), ClientToHost::Registered(registration))).unwrap();
        to_host.send((ClientId(5), ClientToHost::Disconnected)).unwrap();

        while let Ok((id, event)) = from_clients.try_recv() {
            state.handle_event(id, event);
        }

        assert_eq!(state.client_count(), 0);
        assert_eq!(state.client_name(ClientId(5)), None);
    }

    #[test]
    fn shutdown_closes_every_client() {
        let mut state = HostState::default();
        let mut rx = register(&mut state, 1, "ada");
        drain(&mut rx);

        state.shutdown();

        assert_eq!(drain(&mut rx), vec![HostToClient::Close]);
        assert_eq!(state.client_count(), 0);
    }
}
