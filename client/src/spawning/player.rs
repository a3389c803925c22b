use bevy::prelude::*;

use crate::{
    components::{AnimationSpeed, FloorContact},
    constants::*,
    markers::*,
    resources::PlayerSettings,
};
use common::{cursor::CursorLock, look::RotationState, movement::MovementState};

// ============================================================================
// Local Player Spawning
// ============================================================================

// Spawn the locally controlled actor: body, first-person camera, and a held item
pub fn spawn_local_player_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<PlayerSettings>,
    mut cursor: ResMut<CursorLock>,
) {
    let body_transform = Transform::from_translation(Vec3::from_array(PLAYER_SPAWN));
    let camera_transform = Transform::from_xyz(0.0, PLAYER_EYE_HEIGHT, 0.0);
    let rotation = RotationState::from_rotations(
        body_transform.rotation,
        camera_transform.rotation,
        settings.look.clamp_angle,
    );

    let body_mesh = meshes.add(Capsule3d::new(PLAYER_RADIUS, PLAYER_HEIGHT - 2.0 * PLAYER_RADIUS));
    let body_material = materials.add(Color::srgb(0.2, 0.4, 0.8));
    let holdable_mesh = meshes.add(Cuboid::new(HOLDABLE_SIZE[0], HOLDABLE_SIZE[1], HOLDABLE_SIZE[2]));
    let holdable_material = materials.add(Color::srgb(0.3, 0.3, 0.3));

    commands
        .spawn((
            body_transform,
            Visibility::default(),
            settings.look,
            rotation,
            settings.movement,
            MovementState::default(),
            FloorContact::default(),
            AnimationSpeed::default(),
            LocalPlayerMarker,
            GameSceneMarker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(body_mesh),
                MeshMaterial3d(body_material),
                Transform::from_xyz(0.0, PLAYER_HEIGHT / 2.0, 0.0),
                PlayerModelMarker,
            ));

            parent
                .spawn((
                    Camera3d::default(),
                    Projection::from(PerspectiveProjection {
                        fov: FPV_CAMERA_FOV_DEGREES.to_radians(),
                        ..default()
                    }),
                    camera_transform,
                    PlayerCameraMarker,
                ))
                .with_children(|camera| {
                    camera.spawn((
                        Mesh3d(holdable_mesh),
                        MeshMaterial3d(holdable_material),
                        Transform::from_translation(Vec3::from_array(HOLDABLE_OFFSET)),
                        HoldableMarker,
                    ));
                });
        });

    cursor.lock();
    info!("local player spawned");
}
