use bevy::prelude::*;

use crate::markers::{HoldableMarker, LocalPlayerMarker};

// ============================================================================
// Local Player Visibility
// ============================================================================

// Hide the local player's own model so it does not block the first-person view. Held items stay
// visible.
pub fn local_player_hide_model_system(
    new_local_players: Query<Entity, Added<LocalPlayerMarker>>,
    children: Query<&Children>,
    mut meshes: Query<&mut Visibility, (With<Mesh3d>, Without<HoldableMarker>)>,
) {
    for player in &new_local_players {
        for descendant in children.iter_descendants(player) {
            if let Ok(mut visibility) = meshes.get_mut(descendant) {
                *visibility = Visibility::Hidden;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn mesh_child(world: &mut World, parent: Entity, holdable: bool) -> Entity {
        let mut child = world.spawn((Mesh3d::default(), Visibility::Visible, ChildOf(parent)));
        if holdable {
            child.insert(HoldableMarker);
        }
        child.id()
    }

    #[test]
    fn hides_body_meshes_but_not_holdables() {
        let mut world = World::new();
        let player = world.spawn(LocalPlayerMarker).id();
        let body = mesh_child(&mut world, player, false);
        let camera = world.spawn(ChildOf(player)).id();
        let held = mesh_child(&mut world, camera, true);
        let nested = mesh_child(&mut world, camera, false);

        world.run_system_once(local_player_hide_model_system).unwrap();

        assert_eq!(world.get::<Visibility>(body), Some(&Visibility::Hidden));
        assert_eq!(world.get::<Visibility>(nested), Some(&Visibility::Hidden));
        assert_eq!(world.get::<Visibility>(held), Some(&Visibility::Visible));
    }

    #[test]
    fn remote_players_keep_their_model() {
        let mut world = World::new();
        let remote = world.spawn(Transform::default()).id();
        let body = mesh_child(&mut world, remote, false);

        world.run_system_once(local_player_hide_model_system).unwrap();

        assert_eq!(world.get::<Visibility>(body), Some(&Visibility::Visible));
    }
}
