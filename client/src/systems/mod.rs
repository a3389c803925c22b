pub mod input;
pub mod menu;
pub mod players;
pub mod scene;
pub mod session;
