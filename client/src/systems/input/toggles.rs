use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use common::cursor::CursorLock;

// ============================================================================
// Input Toggle Systems
// ============================================================================

// Toggle cursor lock with Escape key
pub fn input_cursor_toggle_system(keyboard: Res<ButtonInput<KeyCode>>, mut cursor: ResMut<CursorLock>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        let locked = cursor.toggle();
        debug!("cursor {}", if locked { "locked" } else { "released" });
    }
}

// Mirror the lock flag onto the window cursor
pub fn cursor_apply_system(cursor: Res<CursorLock>, mut cursor_options: Single<&mut CursorOptions>) {
    if !cursor.is_changed() {
        return;
    }

    cursor_options.visible = cursor.cursor_visible();
    cursor_options.grab_mode = if cursor.is_locked() {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_cursor_follows_lock_flag() {
        let mut world = World::new();
        let window = world.spawn(CursorOptions::default()).id();
        world.insert_resource(CursorLock::locked());
        let apply = world.register_system(cursor_apply_system);

        world.run_system(apply).unwrap();
        let options = world.get::<CursorOptions>(window).unwrap();
        assert_eq!(options.grab_mode, CursorGrabMode::Locked);
        assert!(!options.visible);

        world.resource_mut::<CursorLock>().unlock();
        world.run_system(apply).unwrap();
        let options = world.get::<CursorOptions>(window).unwrap();
        assert_eq!(options.grab_mode, CursorGrabMode::None);
        assert!(options.visible);
    }

    #[test]
    fn escape_toggles_lock() {
        let mut world = World::new();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::Escape);
        world.insert_resource(keyboard);
        world.insert_resource(CursorLock::free());

        let toggle = world.register_system(input_cursor_toggle_system);
        world.run_system(toggle).unwrap();

        assert!(world.resource::<CursorLock>().is_locked());
    }
}
