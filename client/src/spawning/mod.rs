mod player;
mod world;

pub use player::spawn_local_player_system;
pub use world::spawn_world_system;
