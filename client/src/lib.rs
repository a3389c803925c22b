pub mod components;
pub mod config;
pub mod constants;
pub mod markers;
pub mod motor;
pub mod net;
pub mod resources;
pub mod session;
pub mod spawning;
pub mod states;
pub mod systems;
