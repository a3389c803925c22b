use bevy::prelude::*;

// ============================================================================
// Player Markers
// ============================================================================

// Marker component for the local player (yourself). Input systems only ever query this one.
#[derive(Component)]
pub struct LocalPlayerMarker;

// Marker component for the body model of a player
#[derive(Component)]
pub struct PlayerModelMarker;

// Marker component for items that stay visible in first person
#[derive(Component)]
pub struct HoldableMarker;

// ============================================================================
// Camera Markers
// ============================================================================

// Marker component for the first-person camera of the local player
#[derive(Component)]
pub struct PlayerCameraMarker;

// Marker component for the camera that renders the menu
#[derive(Component)]
pub struct MenuCameraMarker;

// ============================================================================
// Scene Markers
// ============================================================================

// Marker component for everything spawned for the game scene
#[derive(Component)]
pub struct GameSceneMarker;

// Marker component for everything spawned for the menu
#[derive(Component)]
pub struct MenuMarker;

// ============================================================================
// UI Markers
// ============================================================================

// Marker component for the menu status line
#[derive(Component)]
pub struct MenuStatusUIMarker;
