use bevy::prelude::*;
use tokio::sync::mpsc::{UnboundedReceiver, error::TryRecvError};

use crate::net::SessionEvent;
use common::{look::LookSettings, movement::MovementSettings};

// ============================================================================
// Client Resources
// ============================================================================

/// Resource wrapper for the channel from the session's network tasks
#[derive(Resource)]
pub struct SessionEventChannel(UnboundedReceiver<SessionEvent>);

impl SessionEventChannel {
    #[must_use]
    pub const fn new(receiver: UnboundedReceiver<SessionEvent>) -> Self {
        Self(receiver)
    }

    pub fn try_recv(&mut self) -> Result<SessionEvent, TryRecvError> {
        self.0.try_recv()
    }
}

/// Tuning applied to the local player when it spawns
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerSettings {
    pub look: LookSettings,
    pub movement: MovementSettings,
}

/// Line shown under the menu buttons
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuStatus(pub String);
