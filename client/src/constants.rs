// ============================================================================
// Client Constants
// ============================================================================

// Mouse motion arrives in pixels; scale to the axis units look sensitivity is tuned for
pub const MOUSE_AXIS_SCALE: f32 = 0.1;

// Player body
pub const PLAYER_HEIGHT: f32 = 1.8; // meters
pub const PLAYER_RADIUS: f32 = 0.35; // meters
pub const PLAYER_EYE_HEIGHT: f32 = 1.6; // camera height above the feet
pub const PLAYER_SPAWN: [f32; 3] = [0.0, 1.0, 0.0]; // feet position, dropped onto the floor by gravity

// First-person camera
pub const FPV_CAMERA_FOV_DEGREES: f32 = 75.0;

// Held item, relative to the camera
pub const HOLDABLE_OFFSET: [f32; 3] = [0.3, -0.25, -0.5];
pub const HOLDABLE_SIZE: [f32; 3] = [0.08, 0.08, 0.3];

// Ground plane
pub const FLOOR_HEIGHT: f32 = 0.0;
pub const FLOOR_SIZE: f32 = 60.0;
pub const GROUND_CONTACT_EPSILON: f32 = 1e-3;

// Scenery so movement is visible
pub const PILLAR_SPACING: f32 = 8.0;
pub const PILLAR_COUNT: i32 = 3; // per side of the origin, per axis
pub const PILLAR_SIZE: [f32; 3] = [0.6, 3.0, 0.6];

// Lighting
pub const LIGHT_AMBIENT_BRIGHTNESS: f32 = 200.0;
pub const LIGHT_DIRECTIONAL_BRIGHTNESS: f32 = 8000.0;

// Menu
pub const MENU_TITLE_FONT_SIZE: f32 = 40.0;
pub const MENU_BUTTON_FONT_SIZE: f32 = 24.0;
pub const MENU_STATUS_FONT_SIZE: f32 = 18.0;
pub const MENU_BUTTON_COLOR: [f32; 3] = [0.15, 0.15, 0.18];
pub const MENU_BUTTON_HOVER_COLOR: [f32; 3] = [0.25, 0.25, 0.3];
pub const MENU_BUTTON_PRESSED_COLOR: [f32; 3] = [0.35, 0.5, 0.35];

pub const LOG_FILTER: &str = "wgpu=error,naga=warn";
