use anyhow::Error;
use quinn::{Connection, ConnectionError, Endpoint, Incoming};
use std::time::Duration;
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    time::timeout,
};
use tracing::{debug, error, info, trace, warn};

use common::net::MessageStream;
use common::protocol::{ClientMessage, ServerMessage};

// A client that connects but never introduces itself is dropped after this long
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// Channel Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub u32);

/// A client that completed the hello handshake, handed to the host task.
#[derive(Debug)]
pub struct Registration {
    pub id: ClientId,
    pub name: String,
    pub channel: UnboundedSender<HostToClient>,
}

// Message from a connection task to the host. Everything about one client travels on the same
// channel, so registration is always seen before that client's traffic and disconnect.
#[derive(Debug)]
pub enum ClientToHost {
    Registered(Registration),
    Message(ClientMessage),
    Disconnected,
}

// Message from the host to a client link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostToClient {
    Send(ServerMessage),
    Close,
}

// ============================================================================
// Accept Connections Task
// ============================================================================

pub async fn accept_connections_task(endpoint: Endpoint, to_host: UnboundedSender<(ClientId, ClientToHost)>) {
    let mut next_client_id = 1u32;
    while let Some(incoming) = endpoint.accept().await {
        let id = ClientId(next_client_id);
        next_client_id = next_client_id.wrapping_add(1).max(1);

        tokio::spawn(serve_connection(id, incoming, to_host.clone()));
    }
    debug!("endpoint closed, no longer accepting connections");
}

async fn serve_connection(id: ClientId, incoming: Incoming, to_host: UnboundedSender<(ClientId, ClientToHost)>) {
    let connection = match incoming.await {
        Ok(connection) => connection,
        Err(e) => {
            warn!("failed to establish connection: {e}");
            return;
        }
    };
    debug!("{:?} connected from {}", id, connection.remote_address());

    let stream = MessageStream::new(&connection);
    let name = match timeout(HANDSHAKE_TIMEOUT, stream.recv::<ClientMessage>()).await {
        Ok(Ok(ClientMessage::Hello(hello))) => hello.name,
        Ok(Err(e)) => {
            log_receive_error(id, &e);
            return;
        }
        Err(_) => {
            warn!("{:?} sent no hello within {:?}, dropping", id, HANDSHAKE_TIMEOUT);
            connection.close(1u32.into(), b"handshake timeout");
            return;
        }
    };
    info!("{:?} introduced itself as {name}", id);

    let (channel, from_host) = unbounded_channel();
    let registration = Registration { id, name, channel };
    if to_host.send((id, ClientToHost::Registered(registration))).is_err() {
        debug!("host is gone, closing {:?}", id);
        connection.close(0u32.into(), b"host closing");
        return;
    }

    let link = ClientLink {
        id,
        connection: &connection,
        stream,
        to_host: &to_host,
    };
    link.run(from_host).await;

    debug!("{:?} link exiting", id);
    let _ = to_host.send((id, ClientToHost::Disconnected));
}

// ============================================================================
// Client Link
// ============================================================================

// Relays one registered client's traffic until either side stops
struct ClientLink<'a> {
    id: ClientId,
    connection: &'a Connection,
    stream: MessageStream<'a>,
    to_host: &'a UnboundedSender<(ClientId, ClientToHost)>,
}

impl ClientLink<'_> {
    async fn run(&self, mut from_host: UnboundedReceiver<HostToClient>) {
        loop {
            let keep_going = tokio::select! {
                result = self.stream.recv::<ClientMessage>() => self.forward(result),
                cmd = from_host.recv() => self.execute(cmd).await,
            };
            if !keep_going {
                break;
            }
        }
    }

    fn forward(&self, result: Result<ClientMessage, Error>) -> bool {
        match result {
            Ok(msg) => {
                trace!("received from {:?}: {:?}", self.id, msg);
                self.to_host
                    .send((self.id, ClientToHost::Message(msg)))
                    .map_err(|e| error!("error sending to host task: {e}"))
                    .is_ok()
            }
            Err(err) => {
                log_receive_error(self.id, &err);
                false
            }
        }
    }

    async fn execute(&self, cmd: Option<HostToClient>) -> bool {
        match cmd {
            Some(HostToClient::Send(msg)) => {
                trace!("sending to {:?}: {:?}", self.id, msg);
                self.stream
                    .send(&msg)
                    .await
                    .map_err(|e| warn!("error sending to {:?}: {e}", self.id))
                    .is_ok()
            }
            Some(HostToClient::Close) => {
                debug!("closing connection to {:?}", self.id);
                self.connection.close(0u32.into(), b"host closing");
                false
            }
            None => false,
        }
    }
}

fn log_receive_error(id: ClientId, err: &Error) {
    match err.downcast_ref::<ConnectionError>() {
        Some(ConnectionError::ApplicationClosed { .. }) => debug!("{:?} closed connection", id),
        Some(ConnectionError::TimedOut) => debug!("{:?} timed out", id),
        Some(ConnectionError::LocallyClosed) => debug!("{:?} locally closed", id),
        Some(_) => error!("connection error for {:?}: {err}", id),
        None => error!("error receiving from {:?}: {err}", id),
    }
}
