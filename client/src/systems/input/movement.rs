use bevy::prelude::*;

use crate::{
    components::{AnimationSpeed, FloorContact},
    markers::LocalPlayerMarker,
    motor::FloorMotor,
};
use common::movement::{ActorBasis, MoveInput, MovementSettings, MovementState, update_movement};

// Build the movement axes from WASD and the run modifier from Shift
#[must_use]
pub fn move_input_from_keys(keyboard: &ButtonInput<KeyCode>) -> MoveInput {
    let mut input = MoveInput::default();
    if keyboard.pressed(KeyCode::KeyW) {
        input.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        input.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        input.x -= 1.0;
    }
    input.run = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    input
}

type LocalMovementQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static MovementSettings,
        &'static mut MovementState,
        &'static mut Transform,
        &'static mut FloorContact,
        &'static mut AnimationSpeed,
    ),
    With<LocalPlayerMarker>,
>;

// Handle WASD movement and gravity for the local player
pub fn input_movement_system(keyboard: Res<ButtonInput<KeyCode>>, time: Res<Time>, mut query: LocalMovementQuery) {
    let input = move_input_from_keys(&keyboard);
    let delta = time.delta_secs();

    for (settings, mut state, mut transform, mut contact, mut animation) in &mut query {
        let basis = ActorBasis::from_rotation(transform.rotation);
        let mut motor = FloorMotor::new(&mut transform, &mut contact);
        let signal = update_movement(&mut state, settings, input, basis, delta, &mut motor);
        *animation = signal.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_axes() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyA);

        let input = move_input_from_keys(&keyboard);
        assert_eq!(input, MoveInput { x: -1.0, z: 1.0, run: false });

        keyboard.press(KeyCode::ShiftLeft);
        keyboard.press(KeyCode::KeyD);
        let input = move_input_from_keys(&keyboard);
        assert_eq!(input, MoveInput { x: 0.0, z: 1.0, run: true });
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyS);

        assert_eq!(move_input_from_keys(&keyboard), MoveInput::default());
    }
}
