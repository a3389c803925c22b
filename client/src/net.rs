use bevy::log::{debug, error, info, warn};
use quinn::{Connecting, Connection, ConnectionError};
use tokio::sync::mpsc::UnboundedSender;

use common::net::MessageStream;
use common::protocol::{CHello, ClientMessage, ServerMessage};

// ============================================================================
// Session Events
// ============================================================================

/// Message from the network side of the session to the Bevy main thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Joined { id: u32 },
    LoadScene(String),
    Disconnected,
}

impl From<ServerMessage> for SessionEvent {
    fn from(msg: ServerMessage) -> Self {
        match msg {
            ServerMessage::Welcome(welcome) => Self::Joined { id: welcome.id },
            ServerMessage::LoadScene(load) => Self::LoadScene(load.scene),
        }
    }
}

// ============================================================================
// Client Network I/O Task
// ============================================================================

pub async fn client_session_task(connecting: Connecting, name: String, to_bevy: UnboundedSender<SessionEvent>) {
    let connection = match connecting.await {
        Ok(connection) => connection,
        Err(e) => {
            error!("failed to connect to host: {e}");
            let _ = to_bevy.send(SessionEvent::Disconnected);
            return;
        }
    };
    info!("connected to host at {}", connection.remote_address());

    network_io_task(&connection, name, &to_bevy).await;

    // Notify Bevy that we're disconnected
    let _ = to_bevy.send(SessionEvent::Disconnected);
}

async fn network_io_task(connection: &Connection, name: String, to_bevy: &UnboundedSender<SessionEvent>) {
    let stream = MessageStream::new(connection);

    if let Err(e) = stream.send(&ClientMessage::Hello(CHello { name })).await {
        error!("failed to send hello: {e}");
        return;
    }

    loop {
        match stream.recv::<ServerMessage>().await {
            Ok(msg) => {
                debug!("received from host: {:?}", msg);
                if to_bevy.send(msg.into()).is_err() {
                    // Bevy side closed, exit
                    connection.close(0u32.into(), b"client closing");
                    break;
                }
            }
            Err(e) => {
                if let Some(conn_err) = e.downcast_ref::<ConnectionError>() {
                    match conn_err {
                        ConnectionError::ApplicationClosed { .. } => warn!("host closed the connection"),
                        ConnectionError::TimedOut => warn!("host connection timed out"),
                        ConnectionError::LocallyClosed => debug!("connection to host closed locally"),
                        _ => error!("connection error: {e}"),
                    }
                } else {
                    error!("error receiving message: {e}");
                }
                break;
            }
        }
    }
}
