use anyhow::Result;
use bevy_ecs::prelude::Resource;
use thiserror::Error;
use tracing::{error, info, warn};

// ============================================================================
// Session Role
// ============================================================================

/// Role of this process in the multiplayer session. Set once at launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionRole {
    #[default]
    Unset,
    Host,
    Client,
}

// ============================================================================
// Session Manager
// ============================================================================

/// The networking runtime that owns the connection and host lifecycle.
pub trait SessionManager: Send + Sync {
    fn start_host(&mut self) -> Result<()>;

    fn start_client(&mut self) -> Result<()>;

    /// Switch every participant of the session to the named scene.
    fn load_scene(&mut self, name: &str) -> Result<()>;
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("session manager is not set up")]
    ManagerMissing,
    #[error("session already started as {0:?}")]
    AlreadyStarted(SessionRole),
    #[error("session manager failed: {0:#}")]
    Manager(anyhow::Error),
}

// ============================================================================
// Session Launcher
// ============================================================================

/// Starts the session as host or client from a menu action.
///
/// Both starts are single-shot: once a role is set, further starts are rejected. Failures are not
/// retried.
#[derive(Resource)]
pub struct SessionLauncher {
    manager: Option<Box<dyn SessionManager>>,
    role: SessionRole,
    game_scene: String,
}

impl SessionLauncher {
    pub fn new(manager: Option<Box<dyn SessionManager>>, game_scene: impl Into<String>) -> Self {
        Self {
            manager,
            role: SessionRole::Unset,
            game_scene: game_scene.into(),
        }
    }

    pub fn with_manager(manager: impl SessionManager + 'static, game_scene: impl Into<String>) -> Self {
        Self::new(Some(Box::new(manager)), game_scene)
    }

    #[must_use]
    pub const fn role(&self) -> SessionRole {
        self.role
    }

    #[must_use]
    pub fn game_scene(&self) -> &str {
        &self.game_scene
    }

    pub fn start_as_host(&mut self) -> Result<SessionRole, LaunchError> {
        self.check_unset()?;
        let Some(manager) = self.manager.as_mut() else {
            error!("session manager is not set up, cannot start host");
            return Err(LaunchError::ManagerMissing);
        };

        manager.start_host().map_err(LaunchError::Manager)?;
        self.role = SessionRole::Host;
        info!("started host");

        if self.game_scene.is_empty() {
            warn!("game scene name is not set, staying in the current scene");
        } else if let Err(e) = manager.load_scene(&self.game_scene) {
            // The host is already running at this point, so the role stays
            error!("failed to load scene {}: {e:#}", self.game_scene);
        }

        Ok(self.role)
    }

    pub fn start_as_client(&mut self) -> Result<SessionRole, LaunchError> {
        self.check_unset()?;
        let Some(manager) = self.manager.as_mut() else {
            error!("session manager is not set up, cannot start client");
            return Err(LaunchError::ManagerMissing);
        };

        manager.start_client().map_err(LaunchError::Manager)?;
        self.role = SessionRole::Client;
        info!("started client");

        Ok(self.role)
    }

    fn check_unset(&self) -> Result<(), LaunchError> {
        match self.role {
            SessionRole::Unset => Ok(()),
            role => Err(LaunchError::AlreadyStarted(role)),
        }
    }
}
