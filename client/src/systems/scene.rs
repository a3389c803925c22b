use bevy::prelude::*;

use common::cursor::CursorLock;

// ============================================================================
// Scene Lifecycle Systems
// ============================================================================

// Despawn everything tagged with the scene marker `M`
pub fn despawn_scene_system<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

// Hand the cursor back when leaving the game scene
pub fn release_cursor_system(mut cursor: ResMut<CursorLock>) {
    cursor.unlock();
}
