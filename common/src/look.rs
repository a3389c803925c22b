use bevy_ecs::prelude::Component;
use bevy_math::{EulerRot, Quat};

use crate::constants::{
    LOOK_CLAMP_ANGLE, LOOK_SENSITIVITY, LOOK_SMOOTHING_FACTOR, LOOK_SMOOTHING_FACTOR_MAX, LOOK_SMOOTHING_FACTOR_MIN,
};

// ============================================================================
// Look Settings
// ============================================================================

/// Tuning of the mouse-look controller.
///
/// Angles are in degrees. Positive pitch looks down, positive yaw turns right.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct LookSettings {
    pub sensitivity: f32,
    pub clamp_angle: f32,
    pub invert_y: bool,
    pub smoothing: bool,
    smoothing_factor: f32,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self {
            sensitivity: LOOK_SENSITIVITY,
            clamp_angle: LOOK_CLAMP_ANGLE,
            invert_y: false,
            smoothing: false,
            smoothing_factor: LOOK_SMOOTHING_FACTOR,
        }
    }
}

impl LookSettings {
    #[must_use]
    pub fn with_smoothing(mut self, factor: f32) -> Self {
        self.smoothing = true;
        self.set_smoothing_factor(factor);
        self
    }

    #[must_use]
    pub const fn smoothing_factor(&self) -> f32 {
        self.smoothing_factor
    }

    // Factors outside (0, 1] would freeze or overshoot the view
    pub fn set_smoothing_factor(&mut self, factor: f32) {
        self.smoothing_factor = if factor.is_nan() {
            LOOK_SMOOTHING_FACTOR
        } else {
            factor.clamp(LOOK_SMOOTHING_FACTOR_MIN, LOOK_SMOOTHING_FACTOR_MAX)
        };
    }

    /// Largest pitch magnitude the view may reach, always finite and non-negative.
    #[must_use]
    pub fn pitch_limit(&self) -> f32 {
        pitch_limit(self.clamp_angle)
    }
}

// Negative limits mean the same as positive ones; non-finite ones fall back to the default
fn pitch_limit(clamp_angle: f32) -> f32 {
    if clamp_angle.is_finite() {
        clamp_angle.abs()
    } else {
        LOOK_CLAMP_ANGLE
    }
}

// ============================================================================
// Rotation State
// ============================================================================

/// Accumulated and smoothed view angles of one actor, in degrees.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub yaw: f32,
    pub pitch: f32,
    pub smoothed_yaw: f32,
    pub smoothed_pitch: f32,
}

impl RotationState {
    /// Start from an existing orientation. The pitch is clamped so the state is valid before the
    /// first update.
    #[must_use]
    pub fn from_angles(yaw: f32, pitch: f32, clamp_angle: f32) -> Self {
        let yaw = normalize_degrees(yaw);
        let limit = pitch_limit(clamp_angle);
        let pitch = normalize_degrees(pitch).clamp(-limit, limit);
        Self {
            yaw,
            pitch,
            smoothed_yaw: yaw,
            smoothed_pitch: pitch,
        }
    }

    /// Start from the body's world rotation and the camera's local rotation.
    #[must_use]
    pub fn from_rotations(body: Quat, camera: Quat, clamp_angle: f32) -> Self {
        Self::from_angles(yaw_from_rotation(body), pitch_from_rotation(camera), clamp_angle)
    }
}

/// Raw pointer deltas for one tick, in input axis units. Positive `dy` means the pointer moved up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookInput {
    pub dx: f32,
    pub dy: f32,
}

/// Angles to write onto the transforms after an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl AppliedRotation {
    /// Local rotation of the camera: pitch only, around X.
    #[must_use]
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_rotation_x(-self.pitch.to_radians())
    }

    /// World rotation of the body: yaw only, around Y.
    #[must_use]
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw.to_radians())
    }
}

// ============================================================================
// Look Update
// ============================================================================

pub fn update_look(state: &mut RotationState, settings: &LookSettings, input: LookInput, dt: f32) -> AppliedRotation {
    let scaled_x = input.dx * settings.sensitivity * dt;
    let mut scaled_y = input.dy * settings.sensitivity * dt;
    if settings.invert_y {
        scaled_y = -scaled_y;
    }

    state.yaw += scaled_x;
    state.pitch -= scaled_y;
    let limit = settings.pitch_limit();
    state.pitch = state.pitch.clamp(-limit, limit);

    if settings.smoothing {
        let factor = settings.smoothing_factor;
        state.smoothed_yaw = lerp(state.smoothed_yaw, state.yaw, factor);
        state.smoothed_pitch = lerp(state.smoothed_pitch, state.pitch, factor);
        AppliedRotation {
            yaw: state.smoothed_yaw,
            pitch: state.smoothed_pitch,
        }
    } else {
        AppliedRotation {
            yaw: state.yaw,
            pitch: state.pitch,
        }
    }
}

// Weighted form keeps `t == 1` exact
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from.mul_add(1.0 - t, to * t)
}

// ============================================================================
// Angle Helpers
// ============================================================================

// Wrap into (-180, 180]
fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

#[must_use]
pub fn yaw_from_rotation(rotation: Quat) -> f32 {
    let (yaw, _pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
    -yaw.to_degrees()
}

#[must_use]
pub fn pitch_from_rotation(rotation: Quat) -> f32 {
    let (_yaw, pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
    -pitch.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_math::Vec3;

    const EPS: f32 = 1e-4;

    #[test]
    fn pitch_stays_clamped_for_any_input() {
        let settings = LookSettings::default();
        let mut state = RotationState::default();

        for dy in [1.0e6, -1.0e6, 3.0, -250.0, 0.0] {
            update_look(&mut state, &settings, LookInput { dx: 0.0, dy }, 0.016);
            assert!(state.pitch >= -settings.clamp_angle && state.pitch <= settings.clamp_angle);
        }

        update_look(&mut state, &settings, LookInput { dx: 0.0, dy: 1.0e6 }, 1.0);
        assert!((state.pitch + settings.clamp_angle).abs() < EPS);
        update_look(&mut state, &settings, LookInput { dx: 0.0, dy: -1.0e6 }, 1.0);
        assert!((state.pitch - settings.clamp_angle).abs() < EPS);
    }

    #[test]
    fn unsmoothed_rotation_applies_raw_values() {
        let settings = LookSettings::default();
        let mut state = RotationState::default();

        let applied = update_look(&mut state, &settings, LookInput { dx: 2.0, dy: 0.25 }, 0.5);

        assert_eq!(state.yaw, 100.0);
        assert_eq!(state.pitch, -12.5);
        assert_eq!(applied.yaw, state.yaw);
        assert_eq!(applied.pitch, state.pitch);
    }

    #[test]
    fn full_smoothing_factor_matches_raw_after_one_tick() {
        let settings = LookSettings::default().with_smoothing(1.0);
        let mut state = RotationState::from_angles(30.0, 10.0, settings.clamp_angle);

        let applied = update_look(&mut state, &settings, LookInput { dx: 0.7, dy: -0.3 }, 0.02);

        assert_eq!(applied.yaw, state.yaw);
        assert_eq!(applied.pitch, state.pitch);
    }

    #[test]
    fn smoothing_lags_behind_raw_rotation() {
        let settings = LookSettings::default().with_smoothing(0.5);
        let mut state = RotationState::default();

        let applied = update_look(&mut state, &settings, LookInput { dx: 1.0, dy: 0.0 }, 1.0);

        assert_eq!(state.yaw, 100.0);
        assert_eq!(applied.yaw, 50.0);

        let applied = update_look(&mut state, &settings, LookInput::default(), 1.0);
        assert_eq!(applied.yaw, 75.0);
    }

    #[test]
    fn smoothing_factor_is_kept_in_range() {
        let mut settings = LookSettings::default();
        settings.set_smoothing_factor(0.0);
        assert_eq!(settings.smoothing_factor(), LOOK_SMOOTHING_FACTOR_MIN);
        settings.set_smoothing_factor(4.0);
        assert_eq!(settings.smoothing_factor(), LOOK_SMOOTHING_FACTOR_MAX);
        settings.set_smoothing_factor(f32::NAN);
        assert_eq!(settings.smoothing_factor(), LOOK_SMOOTHING_FACTOR);
    }

    #[test]
    fn negative_clamp_angle_limits_pitch_by_magnitude() {
        let mut settings = LookSettings::default();
        settings.clamp_angle = -10.0;
        let mut state = RotationState::from_angles(0.0, 45.0, settings.clamp_angle);
        assert_eq!(state.pitch, 10.0);

        for dy in [1.0e6, -1.0e6, 0.5] {
            update_look(&mut state, &settings, LookInput { dx: 0.0, dy }, 0.016);
            assert!(state.pitch >= -10.0 && state.pitch <= 10.0);
        }
    }

    #[test]
    fn non_finite_clamp_angle_uses_default_limit() {
        let mut settings = LookSettings::default();
        settings.clamp_angle = f32::NAN;
        assert_eq!(settings.pitch_limit(), LOOK_CLAMP_ANGLE);

        let mut state = RotationState::from_angles(0.0, 170.0, f32::INFINITY);
        assert_eq!(state.pitch, LOOK_CLAMP_ANGLE);

        update_look(&mut state, &settings, LookInput { dx: 0.0, dy: -1.0e6 }, 1.0);
        assert_eq!(state.pitch, LOOK_CLAMP_ANGLE);
    }

    #[test]
    fn invert_y_flips_pitch_direction() {
        let mut settings = LookSettings::default();
        let mut normal = RotationState::default();
        update_look(&mut normal, &settings, LookInput { dx: 0.0, dy: 0.1 }, 1.0);

        settings.invert_y = true;
        let mut inverted = RotationState::default();
        update_look(&mut inverted, &settings, LookInput { dx: 0.0, dy: 0.1 }, 1.0);

        assert!(normal.pitch < 0.0);
        assert_eq!(inverted.pitch, -normal.pitch);
    }

    #[test]
    fn pitch_and_yaw_rotate_separate_axes() {
        let applied = AppliedRotation { yaw: 90.0, pitch: 45.0 };

        // Camera pitch never moves the camera's X axis
        let camera_right = applied.camera_rotation() * Vec3::X;
        assert!((camera_right - Vec3::X).length() < EPS);

        // Body yaw never tilts the body's up axis
        let body_up = applied.body_rotation() * Vec3::Y;
        assert!((body_up - Vec3::Y).length() < EPS);

        // Positive yaw turns right: forward (-Z) ends up pointing at +X
        let body_forward = applied.body_rotation() * Vec3::NEG_Z;
        assert!((body_forward - Vec3::X).length() < EPS);

        // Positive pitch looks down
        let camera_forward = applied.camera_rotation() * Vec3::NEG_Z;
        assert!(camera_forward.y < 0.0);
    }

    #[test]
    fn initial_state_reads_existing_orientation() {
        let applied = AppliedRotation { yaw: -60.0, pitch: 20.0 };
        let state = RotationState::from_rotations(applied.body_rotation(), applied.camera_rotation(), 90.0);

        assert!((state.yaw + 60.0).abs() < EPS);
        assert!((state.pitch - 20.0).abs() < EPS);
        assert_eq!(state.smoothed_yaw, state.yaw);
        assert_eq!(state.smoothed_pitch, state.pitch);
    }

    #[test]
    fn initial_pitch_is_wrapped_and_clamped() {
        let state = RotationState::from_angles(370.0, 350.0, 30.0);
        assert!((state.yaw - 10.0).abs() < EPS);
        assert!((state.pitch + 10.0).abs() < EPS);

        let state = RotationState::from_angles(0.0, 80.0, 30.0);
        assert_eq!(state.pitch, 30.0);
    }
}
