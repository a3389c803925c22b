use bevy::prelude::*;

use crate::{
    net::SessionEvent,
    resources::{MenuStatus, SessionEventChannel},
    states::AppState,
};
use common::session::SessionLauncher;

// ============================================================================
// Session Event Handling
// ============================================================================

// Decide which state a session event leads to, if any
#[must_use]
pub fn next_state_for(event: &SessionEvent, game_scene: &str, current: AppState) -> Option<AppState> {
    match event {
        SessionEvent::LoadScene(scene) if scene == game_scene && current != AppState::InGame => {
            Some(AppState::InGame)
        }
        SessionEvent::Disconnected if current == AppState::InGame => Some(AppState::Menu),
        _ => None,
    }
}

// Drain events from the network tasks and drive scene transitions
pub fn session_events_system(
    mut channel: ResMut<SessionEventChannel>,
    launcher: Res<SessionLauncher>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut status: ResMut<MenuStatus>,
) {
    let mut current = *state.get();

    while let Ok(event) = channel.try_recv() {
        match &event {
            SessionEvent::Joined { id } => {
                info!("joined session as client {id}");
                status.0 = "Joined, waiting for the host to load the game".to_string();
            }
            SessionEvent::LoadScene(scene) if scene != launcher.game_scene() => {
                warn!("host requested unknown scene {scene}, ignoring");
            }
            SessionEvent::LoadScene(scene) => {
                info!("loading scene {scene}");
            }
            SessionEvent::Disconnected => {
                warn!("disconnected from session");
                status.0 = "Disconnected from the session, restart to play again".to_string();
            }
        }

        if let Some(next) = next_state_for(&event, launcher.game_scene(), current) {
            next_state.set(next);
            current = next;
        }
    }
}
