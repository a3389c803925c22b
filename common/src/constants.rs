// ============================================================================
// Look Defaults
// ============================================================================

pub const LOOK_SENSITIVITY: f32 = 100.0; // degrees per axis unit per second
pub const LOOK_CLAMP_ANGLE: f32 = 90.0; // degrees above/below the horizon
pub const LOOK_SMOOTHING_FACTOR: f32 = 0.1;
pub const LOOK_SMOOTHING_FACTOR_MIN: f32 = 0.01;
pub const LOOK_SMOOTHING_FACTOR_MAX: f32 = 1.0;

// ============================================================================
// Movement Defaults
// ============================================================================

pub const WALK_SPEED: f32 = 5.0; // meters per second
pub const RUN_SPEED: f32 = 10.0; // meters per second
pub const GRAVITY: f32 = -9.81; // meters per second squared

// Vertical velocity while standing on the ground, keeps the actor pressed onto it
pub const GROUNDED_VERTICAL_VELOCITY: f32 = -2.0;

// Squared input magnitude below which the actor is considered idle
pub const IDLE_INPUT_THRESHOLD_SQUARED: f32 = 0.01;

// Values of the animation speed parameter
pub const ANIMATION_SPEED_IDLE: f32 = 0.0;
pub const ANIMATION_SPEED_WALK: f32 = 0.3;
pub const ANIMATION_SPEED_RUN: f32 = 0.6;

// ============================================================================
// Session Defaults
// ============================================================================

pub const GAME_SCENE: &str = "GameScene";
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:7777";
