use bevy::prelude::*;

use common::movement::AnimationSignal;

// ============================================================================
// Client Components
// ============================================================================

/// Speed parameter for the animation layer, written every tick by the movement system.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationSpeed(pub f32);

impl From<AnimationSignal> for AnimationSpeed {
    fn from(signal: AnimationSignal) -> Self {
        Self(signal.speed())
    }
}

/// Whether the character rested on the ground after its last move.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloorContact {
    pub grounded: bool,
}

// Menu actions
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Host,
    Join,
}
