use bevy_ecs::prelude::Component;
use bevy_math::{Quat, Vec3};

use crate::constants::{
    ANIMATION_SPEED_IDLE, ANIMATION_SPEED_RUN, ANIMATION_SPEED_WALK, GRAVITY, GROUNDED_VERTICAL_VELOCITY,
    IDLE_INPUT_THRESHOLD_SQUARED, RUN_SPEED, WALK_SPEED,
};

// ============================================================================
// Character Motor
// ============================================================================

/// Moves a capsule-shaped collider by a delta while resolving collisions.
///
/// The outcome of a move is never inspected by the caller; only the grounded flag is read back.
pub trait CharacterMotor {
    fn sweep_move(&mut self, delta: Vec3);

    fn is_grounded(&self) -> bool;
}

// ============================================================================
// Movement Data
// ============================================================================

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MovementSettings {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub gravity: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            run_speed: RUN_SPEED,
            gravity: GRAVITY,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementState {
    pub vertical_velocity: f32,
}

/// Directional input for one tick. `x` is the right axis and `z` the forward axis, both in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveInput {
    pub x: f32,
    pub z: f32,
    pub run: bool,
}

/// Right and forward directions of the actor in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorBasis {
    pub right: Vec3,
    pub forward: Vec3,
}

impl ActorBasis {
    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            right: rotation * Vec3::X,
            forward: rotation * Vec3::NEG_Z,
        }
    }
}

/// Locomotion state reported to the animation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationSignal {
    Idle,
    Walk,
    Run,
}

impl AnimationSignal {
    /// Value of the animator's speed parameter.
    #[must_use]
    pub const fn speed(self) -> f32 {
        match self {
            Self::Idle => ANIMATION_SPEED_IDLE,
            Self::Walk => ANIMATION_SPEED_WALK,
            Self::Run => ANIMATION_SPEED_RUN,
        }
    }
}

// ============================================================================
// Movement Update
// ============================================================================

/// Run one tick of movement: horizontal move first, then gravity.
pub fn update_movement<M: CharacterMotor + ?Sized>(
    state: &mut MovementState,
    settings: &MovementSettings,
    input: MoveInput,
    basis: ActorBasis,
    dt: f32,
    motor: &mut M,
) -> AnimationSignal {
    let signal = move_horizontal(settings, input, basis, dt, motor);
    apply_gravity(state, settings, dt, motor);
    signal
}

pub fn move_horizontal<M: CharacterMotor + ?Sized>(
    settings: &MovementSettings,
    input: MoveInput,
    basis: ActorBasis,
    dt: f32,
    motor: &mut M,
) -> AnimationSignal {
    let input_sq = input.x.mul_add(input.x, input.z * input.z);
    if input_sq < IDLE_INPUT_THRESHOLD_SQUARED {
        return AnimationSignal::Idle;
    }

    let (speed, signal) = if input.run {
        (settings.run_speed, AnimationSignal::Run)
    } else {
        (settings.walk_speed, AnimationSignal::Walk)
    };

    let direction = basis.right * input.x + basis.forward * input.z;
    motor.sweep_move(direction * speed * dt);
    signal
}

pub fn apply_gravity<M: CharacterMotor + ?Sized>(
    state: &mut MovementState,
    settings: &MovementSettings,
    dt: f32,
    motor: &mut M,
) {
    if motor.is_grounded() && state.vertical_velocity < 0.0 {
        state.vertical_velocity = GROUNDED_VERTICAL_VELOCITY;
    } else {
        state.vertical_velocity = settings.gravity.mul_add(dt, state.vertical_velocity);
    }

    motor.sweep_move(Vec3::new(0.0, state.vertical_velocity, 0.0) * dt);
}
