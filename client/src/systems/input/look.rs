use bevy::{input::mouse::MouseMotion, prelude::*};

use crate::{
    constants::MOUSE_AXIS_SCALE,
    markers::{LocalPlayerMarker, PlayerCameraMarker},
};
use common::{
    cursor::CursorLock,
    look::{LookInput, LookSettings, RotationState, update_look},
};

// Convert accumulated mouse motion (pixels, +y down) into look axes (+dy up)
#[must_use]
pub fn look_input_from_motion(delta: Vec2) -> LookInput {
    LookInput {
        dx: delta.x * MOUSE_AXIS_SCALE,
        dy: -delta.y * MOUSE_AXIS_SCALE,
    }
}

// Mouse look: pitch goes to the camera, yaw to the body
pub fn input_look_system(
    mut mouse_motion: MessageReader<MouseMotion>,
    cursor: Res<CursorLock>,
    time: Res<Time>,
    mut player_query: Query<(&LookSettings, &mut RotationState, &mut Transform), With<LocalPlayerMarker>>,
    mut camera_query: Query<&mut Transform, (With<PlayerCameraMarker>, Without<LocalPlayerMarker>)>,
) {
    // Always drain, so motion made while the cursor was free is not applied later
    let delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if !cursor.is_locked() {
        return;
    }

    let Ok((settings, mut rotation, mut body_transform)) = player_query.single_mut() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let applied = update_look(&mut rotation, settings, look_input_from_motion(delta), time.delta_secs());
    body_transform.rotation = applied.body_rotation();
    camera_transform.rotation = applied.camera_rotation();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use std::time::Duration;

    const EPS: f32 = 1e-4;

    #[test]
    fn moving_mouse_up_is_positive_dy() {
        let input = look_input_from_motion(Vec2::new(10.0, -20.0));
        assert_eq!(input.dx, 10.0 * MOUSE_AXIS_SCALE);
        assert_eq!(input.dy, 20.0 * MOUSE_AXIS_SCALE);
    }

    fn look_world(cursor: CursorLock) -> (World, Entity, Entity) {
        let mut world = World::new();
        world.init_resource::<Messages<MouseMotion>>();
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_millis(100));
        world.insert_resource(time);
        world.insert_resource(cursor);

        let player = world
            .spawn((
                LookSettings::default(),
                RotationState::default(),
                Transform::default(),
                LocalPlayerMarker,
            ))
            .id();
        let camera = world.spawn((Transform::default(), PlayerCameraMarker)).id();
        (world, player, camera)
    }

    fn move_mouse(world: &mut World, delta: Vec2) {
        world.resource_mut::<Messages<MouseMotion>>().write(MouseMotion { delta });
    }

    #[test]
    fn yaw_turns_the_body_and_pitch_tilts_the_camera() {
        let (mut world, player, camera) = look_world(CursorLock::locked());
        let look = world.register_system(input_look_system);

        // 10 px right and 5 px up: 1 and 0.5 axis units, 100 deg/unit/s over 0.1 s
        move_mouse(&mut world, Vec2::new(10.0, -5.0));
        world.run_system(look).unwrap();

        let state = *world.get::<RotationState>(player).unwrap();
        assert!((state.yaw - 10.0).abs() < EPS);
        assert!((state.pitch + 5.0).abs() < EPS);

        let body = world.get::<Transform>(player).unwrap().rotation;
        assert!((body * Vec3::Y - Vec3::Y).length() < EPS);
        assert!(body.abs_diff_eq(Quat::from_rotation_y(-10f32.to_radians()), EPS));

        let camera = world.get::<Transform>(camera).unwrap().rotation;
        assert!((camera * Vec3::X - Vec3::X).length() < EPS);
        assert!(camera.abs_diff_eq(Quat::from_rotation_x(5f32.to_radians()), EPS));
    }

    #[test]
    fn motion_while_cursor_is_free_is_discarded() {
        let (mut world, player, camera) = look_world(CursorLock::free());
        let look = world.register_system(input_look_system);

        move_mouse(&mut world, Vec2::new(40.0, 25.0));
        world.run_system(look).unwrap();

        // Locking afterwards must not replay the drained motion
        world.resource_mut::<CursorLock>().lock();
        world.run_system(look).unwrap();

        assert_eq!(*world.get::<RotationState>(player).unwrap(), RotationState::default());
        assert_eq!(world.get::<Transform>(player).unwrap().rotation, Quat::IDENTITY);
        assert_eq!(world.get::<Transform>(camera).unwrap().rotation, Quat::IDENTITY);
    }
}
