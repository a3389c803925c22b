use bevy::prelude::*;

use crate::{
    components::FloorContact,
    constants::{FLOOR_HEIGHT, GROUND_CONTACT_EPSILON},
};
use common::movement::CharacterMotor;

// ============================================================================
// Floor Motor
// ============================================================================

/// Moves a character's transform over a flat ground plane.
///
/// The transform's translation is the character's feet. Moves that would sink below the floor
/// stop on it, and the character counts as grounded while it rests there.
pub struct FloorMotor<'a> {
    transform: &'a mut Transform,
    contact: &'a mut FloorContact,
    floor_height: f32,
}

impl<'a> FloorMotor<'a> {
    pub const fn new(transform: &'a mut Transform, contact: &'a mut FloorContact) -> Self {
        Self {
            transform,
            contact,
            floor_height: FLOOR_HEIGHT,
        }
    }

    #[must_use]
    pub const fn with_floor_height(mut self, floor_height: f32) -> Self {
        self.floor_height = floor_height;
        self
    }
}

impl CharacterMotor for FloorMotor<'_> {
    fn sweep_move(&mut self, delta: Vec3) {
        let mut target = self.transform.translation + delta;
        if target.y < self.floor_height {
            target.y = self.floor_height;
        }
        self.transform.translation = target;
        self.contact.grounded = target.y - self.floor_height <= GROUND_CONTACT_EPSILON;
    }

    fn is_grounded(&self) -> bool {
        self.contact.grounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fall_stops_on_floor() {
        let mut transform = Transform::from_xyz(0.0, 0.5, 0.0);
        let mut contact = FloorContact::default();
        let mut motor = FloorMotor::new(&mut transform, &mut contact);

        motor.sweep_move(Vec3::new(0.0, -2.0, 0.0));

        assert!(motor.is_grounded());
        assert_eq!(transform.translation, Vec3::ZERO);
    }

    #[test]
    fn airborne_move_is_not_grounded() {
        let mut transform = Transform::from_xyz(0.0, 3.0, 0.0);
        let mut contact = FloorContact { grounded: true };
        let mut motor = FloorMotor::new(&mut transform, &mut contact);

        motor.sweep_move(Vec3::new(1.0, -1.0, 0.0));

        assert!(!motor.is_grounded());
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn horizontal_move_on_floor_stays_grounded() {
        let mut transform = Transform::from_xyz(0.0, 1.0, 0.0);
        let mut contact = FloorContact::default();
        let mut motor = FloorMotor::new(&mut transform, &mut contact).with_floor_height(1.0);

        motor.sweep_move(Vec3::new(0.5, 0.0, -0.5));

        assert!(motor.is_grounded());
        assert_eq!(transform.translation, Vec3::new(0.5, 1.0, -0.5));
    }
}
