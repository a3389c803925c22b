use bevy::prelude::*;

use crate::{constants::*, markers::GameSceneMarker};

// ============================================================================
// World Spawning
// ============================================================================

// Floor, lights, and a grid of pillars for orientation
pub fn spawn_world_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.4, 0.35))),
        Transform::from_xyz(0.0, FLOOR_HEIGHT, 0.0),
        GameSceneMarker,
    ));

    let pillar_mesh = meshes.add(Cuboid::new(PILLAR_SIZE[0], PILLAR_SIZE[1], PILLAR_SIZE[2]));
    let pillar_material = materials.add(Color::srgb(0.6, 0.55, 0.5));
    for i in -PILLAR_COUNT..=PILLAR_COUNT {
        for j in -PILLAR_COUNT..=PILLAR_COUNT {
            if i == 0 && j == 0 {
                continue;
            }
            commands.spawn((
                Mesh3d(pillar_mesh.clone()),
                MeshMaterial3d(pillar_material.clone()),
                Transform::from_xyz(
                    i as f32 * PILLAR_SPACING,
                    FLOOR_HEIGHT + PILLAR_SIZE[1] / 2.0,
                    j as f32 * PILLAR_SPACING,
                ),
                GameSceneMarker,
            ));
        }
    }

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: LIGHT_AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: LIGHT_DIRECTIONAL_BRIGHTNESS,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        GameSceneMarker,
    ));
}
